//! Error types for the oracle and environment crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("action {action} is out of range (must be 0-8)")]
    InvalidActionRange { action: usize },

    #[error("invalid move: position {position} is already occupied")]
    CellOccupied { position: usize },

    #[error("oracle queried for {player:?} on terminal board '{board}'")]
    OraclePreconditionViolated {
        board: String,
        player: crate::tictactoe::Player,
    },

    #[error("external actor failed to produce a legal move after {attempts} attempts")]
    ExternalActorExhausted { attempts: usize },

    #[error("could not extract a move from '{text}'")]
    UnparsableMove { text: String },

    #[error("episode already over; call reset() first")]
    EpisodeOver,

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("board string has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("external completion source '{source_name}' failed: {message}")]
    CompletionFailed {
        source_name: String,
        message: String,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
