//! Interview stages and the fixed progression between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One step of the interview script.
///
/// Determines both what the assistant is asked to do and which check (if
/// any) gates advancement on the candidate's next answer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Greeting,
    Name,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
    Questions,
    Farewell,
}

impl Stage {
    /// Every stage in script order.
    pub const ALL: [Stage; 10] = [
        Stage::Greeting,
        Stage::Name,
        Stage::Email,
        Stage::Phone,
        Stage::Experience,
        Stage::Position,
        Stage::Location,
        Stage::TechStack,
        Stage::Questions,
        Stage::Farewell,
    ];

    /// Snake-case name, also used inside the system prompt.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::Name => "name",
            Stage::Email => "email",
            Stage::Phone => "phone",
            Stage::Experience => "experience",
            Stage::Position => "position",
            Stage::Location => "location",
            Stage::TechStack => "tech_stack",
            Stage::Questions => "questions",
            Stage::Farewell => "farewell",
        }
    }

    /// Unconditional successor for stages that advance on any answer.
    ///
    /// `None` for stages gated by validation (email, phone, tech_stack) and
    /// for stages that never advance on their own (questions, farewell).
    pub fn successor(self) -> Option<Stage> {
        match self {
            Stage::Greeting => Some(Stage::Name),
            Stage::Name => Some(Stage::Email),
            Stage::Experience => Some(Stage::Position),
            Stage::Position => Some(Stage::Location),
            Stage::Location => Some(Stage::TechStack),
            Stage::Email
            | Stage::Phone
            | Stage::TechStack
            | Stage::Questions
            | Stage::Farewell => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Farewell
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interview stage: {0}")]
pub struct UnknownStage(pub String);

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_greeting() {
        assert_eq!(Stage::default(), Stage::Greeting);
    }

    #[test]
    fn successor_table() {
        assert_eq!(Stage::Greeting.successor(), Some(Stage::Name));
        assert_eq!(Stage::Name.successor(), Some(Stage::Email));
        assert_eq!(Stage::Experience.successor(), Some(Stage::Position));
        assert_eq!(Stage::Position.successor(), Some(Stage::Location));
        assert_eq!(Stage::Location.successor(), Some(Stage::TechStack));

        for gated in [
            Stage::Email,
            Stage::Phone,
            Stage::TechStack,
            Stage::Questions,
            Stage::Farewell,
        ] {
            assert_eq!(gated.successor(), None, "{gated} should have no successor");
        }
    }

    #[test]
    fn names_parse_back() {
        for stage in Stage::ALL {
            assert_eq!(stage.to_string().parse::<Stage>(), Ok(stage));
        }
        assert_eq!(
            "TechStack".parse::<Stage>(),
            Err(UnknownStage("TechStack".into()))
        );
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_value(Stage::TechStack).unwrap();
        assert_eq!(json, "tech_stack");
    }

    #[test]
    fn only_farewell_is_terminal() {
        let terminal: Vec<Stage> = Stage::ALL.into_iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![Stage::Farewell]);
    }
}
