// error.rs - Error types for the Game of Life core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    /// Coordinate outside `[0, size)` on either axis.
    #[error("coordinates ({x}, {y}) are outside the {size}x{size} grid")]
    OutOfRange { x: usize, y: usize, size: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
