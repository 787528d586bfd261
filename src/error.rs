//! Faceoff Error Types
//!
//! Answer matching never fails; these cover game-state misuse and config I/O.

use thiserror::Error;

/// Central error type for Faceoff
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Not allowed in the {phase} phase: {action}")]
    Phase { phase: String, action: String },

    #[error("Unknown player index: {0}")]
    UnknownPlayer(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Faceoff operations
pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub(crate) fn phase(phase: impl std::fmt::Debug, action: &str) -> Self {
        GameError::Phase {
            phase: format!("{:?}", phase),
            action: action.to_string(),
        }
    }
}
