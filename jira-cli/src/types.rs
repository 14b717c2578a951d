// ABOUTME: Type definitions and enums for the Jira CLI
// ABOUTME: Provides structured types for sprint state and release status

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SprintState {
    Active,
    Future,
    Closed,
    Unknown(String),
}

impl From<&str> for SprintState {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "active" => SprintState::Active,
            "future" => SprintState::Future,
            "closed" => SprintState::Closed,
            _ => SprintState::Unknown(s.to_string()),
        }
    }
}

impl From<String> for SprintState {
    fn from(s: String) -> Self {
        SprintState::from(s.as_str())
    }
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SprintState::Active => write!(f, "ACTIVE"),
            SprintState::Future => write!(f, "FUTURE"),
            SprintState::Closed => write!(f, "CLOSED"),
            SprintState::Unknown(s) => write!(f, "{}", s),
        }
    }
}
