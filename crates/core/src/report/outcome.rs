use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a reported outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Success => f.write_str("success"),
            OutcomeKind::Error => f.write_str("error"),
            OutcomeKind::Info => f.write_str("info"),
        }
    }
}

/// A human-readable status line. Never persisted, only routed to sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub message: String,
}

impl Outcome {
    pub fn new(kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Info, message)
    }
}

/// Which outcome kinds a sink accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    All,
    ErrorsOnly,
    SuccessesOnly,
    /// Only meaningful for the log sink.
    Disabled,
}

impl Verbosity {
    /// Whether a message of `kind` passes this policy.
    pub fn admits(self, kind: OutcomeKind) -> bool {
        match self {
            Verbosity::All => true,
            Verbosity::ErrorsOnly => kind == OutcomeKind::Error,
            Verbosity::SuccessesOnly => kind == OutcomeKind::Success,
            Verbosity::Disabled => false,
        }
    }

    pub fn is_disabled(self) -> bool {
        self == Verbosity::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [OutcomeKind; 3] = [OutcomeKind::Success, OutcomeKind::Error, OutcomeKind::Info];

    #[test]
    fn test_all_admits_everything() {
        assert!(KINDS.iter().all(|k| Verbosity::All.admits(*k)));
    }

    #[test]
    fn test_disabled_admits_nothing() {
        assert!(KINDS.iter().all(|k| !Verbosity::Disabled.admits(*k)));
    }

    #[test]
    fn test_errors_only() {
        assert!(Verbosity::ErrorsOnly.admits(OutcomeKind::Error));
        assert!(!Verbosity::ErrorsOnly.admits(OutcomeKind::Success));
        assert!(!Verbosity::ErrorsOnly.admits(OutcomeKind::Info));
    }

    #[test]
    fn test_successes_only() {
        assert!(Verbosity::SuccessesOnly.admits(OutcomeKind::Success));
        assert!(!Verbosity::SuccessesOnly.admits(OutcomeKind::Error));
        assert!(!Verbosity::SuccessesOnly.admits(OutcomeKind::Info));
    }

    #[test]
    fn test_outcome_constructors() {
        let outcome = Outcome::error("boom");
        assert_eq!(outcome.kind, OutcomeKind::Error);
        assert_eq!(outcome.message, "boom");
        assert_eq!(Outcome::info("x").kind, OutcomeKind::Info);
    }
}
