//! Error types for the roll engine.

use crate::mode::ModeKind;

/// Usage errors raised by the roll engine.
///
/// The engine has no I/O of its own, so every variant describes a caller
/// mistake. None of them are recoverable by retrying the same call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RollError {
    /// A derived value or reduction was requested before the roll executed.
    #[error("the roll has not been executed yet")]
    NotRolled,

    /// `roll` was called a second time on the same engine.
    #[error("the roll has already been executed")]
    AlreadyRolled,

    /// A mode-gated accessor was called while a different mode is active.
    #[error("{value} is not available for a {active} roll")]
    WrongMode {
        /// The derived value the caller asked for, e.g. "STUN".
        value: &'static str,
        /// The interpretation that is actually active.
        active: ModeKind,
    },

    /// The hit location was read but never requested, or the active mode
    /// does not use hit locations.
    #[error("no hit location was requested for this roll")]
    HitLocationNotRequested,

    /// A forced hit location name does not appear in the location table.
    #[error("unknown hit location: {0}")]
    UnknownLocation(String),

    /// A textual term could not be parsed.
    #[error("invalid term: {0}")]
    InvalidTerm(String),

    /// A configuration document is malformed.
    #[error("invalid config: {0}")]
    Config(String),
}

/// Convenience result type for roll engine operations.
pub type RollResult<T> = Result<T, RollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_mode_message_names_value_and_mode() {
        let err = RollError::WrongMode {
            value: "STUN multiplier",
            active: ModeKind::Normal,
        };
        assert_eq!(
            err.to_string(),
            "STUN multiplier is not available for a normal roll"
        );
    }

    #[test]
    fn unknown_location_message() {
        let err = RollError::UnknownLocation("tail".to_string());
        assert_eq!(err.to_string(), "unknown hit location: tail");
    }
}
