//! Format checks for contact details.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern is valid"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone pattern is valid"));

/// `local@domain.tld`, where local and domain are word characters, dots or
/// hyphens and the extension is one or more word characters.
pub fn validate_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

/// Optional `+`, optional single `1`, then 9 to 15 digits.
pub fn validate_phone(text: &str) -> bool {
    PHONE_RE.is_match(text)
}
