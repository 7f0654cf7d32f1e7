//! Answers captured from the candidate.

use serde::{Deserialize, Serialize};

/// Validated answers accumulated during one interview.
///
/// A field is set only after the candidate's answer passes the check for its
/// stage, and is never cleared afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tech_stack: Vec<String>,
}

impl CandidateRecord {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.tech_stack.is_empty()
    }
}

/// Split a comma-separated answer into trimmed technology names.
///
/// Items are kept in order and blank items are kept as empty strings, so
/// `"Go,,Rust"` yields three entries.
pub fn parse_tech_stack(answer: &str) -> Vec<String> {
    answer.split(',').map(|t| t.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tech_stack_is_split_and_trimmed_in_order() {
        assert_eq!(parse_tech_stack("Python, Go, Rust"), vec!["Python", "Go", "Rust"]);
        assert_eq!(parse_tech_stack("  C++  "), vec!["C++"]);
    }

    #[test]
    fn blank_items_are_kept_as_empty_strings() {
        assert_eq!(parse_tech_stack("Go,,Rust"), vec!["Go", "", "Rust"]);
        assert_eq!(parse_tech_stack(" , "), vec!["", ""]);
        assert_eq!(parse_tech_stack("Go,"), vec!["Go", ""]);
    }

    #[test]
    fn empty_record_serializes_to_empty_object() {
        let record = CandidateRecord::default();
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }
}
