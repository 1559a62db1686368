//! Error types for the fallible edges of the engine.
//!
//! The board, move generation and search never fail; these variants cover
//! text input handed in by callers (square names, side names, CLI values).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Square name is not `a1`..`h8`.
    #[error("invalid algebraic square: {0}")]
    InvalidSquare(String),

    /// Side name is not one of `w`, `b`, `white`, `black`.
    #[error("invalid side: {0} (expected white or black)")]
    InvalidSide(String),

    /// Move text does not match any generated move.
    #[error("move {0} is not available in this position")]
    UnknownMove(String),
}

/// Result type alias for engine operations that can fail.
pub type EngineResult<T> = Result<T, EngineError>;
