//! Error types for destijl

use thiserror::Error;

/// Result type alias for destijl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for destijl
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry or stroke input that would produce garbage output
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Iteration count above the supported maximum
    #[error("Too many iterations: {requested} requested, at most {max} supported")]
    TooManyIterations { requested: i64, max: i64 },

    /// Seed shape could not be used (malformed rectangle or point)
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// Style colour the rasterizer cannot interpret
    #[error("Unknown colour: {0}")]
    UnknownColor(String),

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }
}
