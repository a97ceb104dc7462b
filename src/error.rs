use std::path::PathBuf;

use crate::board::{PitId, Side};

/// Errors returned when a pit selection is rejected. The game is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already complete")]
    GameOver,

    #[error("it is side {expected}'s turn, not side {got}'s")]
    WrongTurn { expected: Side, got: Side },

    #[error("pit {pit} is out of range (0..{pits})")]
    OutOfRange { pit: usize, pits: usize },

    #[error("pit {0} is empty")]
    EmptyPit(PitId),

    #[error("side {0} does not exist")]
    InvalidSide(usize),
}

/// Errors raised by the board primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("pit {0} is empty")]
    EmptyPit(PitId),

    #[error("rows differ in length ({first} and {second} pits)")]
    RowLengthMismatch { first: usize, second: usize },
}

/// The winner was queried while the game is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("winner queried before the game is complete")]
pub struct PreconditionError;

/// Errors that can occur when building or loading a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("unknown variant '{0}' (expected classic, congklak or bao)")]
    UnknownVariant(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::WrongTurn {
            expected: Side::Player,
            got: Side::Opponent,
        };
        assert_eq!(err.to_string(), "it is side 0's turn, not side 1's");

        let err = MoveError::EmptyPit(PitId::new(Side::Opponent, 3));
        assert_eq!(err.to_string(), "pit 1.3 is empty");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("stones_per_pit must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: stones_per_pit must be > 0"
        );
    }

    #[test]
    fn test_precondition_error_display() {
        assert_eq!(
            PreconditionError.to_string(),
            "winner queried before the game is complete"
        );
    }
}
