//! Error types for the engine.

use thiserror::Error;

use crate::board::Action;

/// Errors raised by board construction and move application.
///
/// Only [`Error::InvalidMove`] can come out of the core game logic; the
/// other variants come from parsing text coordinates and board strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell {action} is already occupied")]
    InvalidMove { action: Action },

    #[error("invalid coordinate '{0}' (expected A1..C3)")]
    InvalidCoord(String),

    #[error("invalid player '{0}' (expected X or O)")]
    InvalidPlayer(String),

    #[error("invalid board '{input}': {reason}")]
    InvalidBoard { input: String, reason: String },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("agent {agent} returned no move on a running game")]
    NoMove { agent: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
