use thiserror::Error;

use crate::sim::GameStatus;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the per-frame hot path.
///
/// Particle update and draw never fail; this covers configuration,
/// game-state transitions and leaderboard records.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration value out of its valid range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Game action not allowed in the current status.
    #[error("cannot {action} while game is {status:?}")]
    InvalidTransition {
        action: &'static str,
        status: GameStatus,
    },

    /// Leaderboard record failed validation.
    #[error("invalid leaderboard record: {0}")]
    InvalidRecord(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidConfig("influence_radius must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid config"));
        assert!(msg.contains("influence_radius"));

        let e = Error::InvalidTransition {
            action: "start",
            status: GameStatus::Completed,
        };
        assert_eq!(format!("{e}"), "cannot start while game is Completed");
    }

    #[test]
    fn parse_errors_convert() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e: Error = err.into();
        assert!(matches!(e, Error::ConfigParse(_)));
    }
}
