//! # Error Types
//!
//! Custom error types for Stick Typer using `thiserror`.

use thiserror::Error;

/// Main error type for Stick Typer
#[derive(Debug, Error)]
pub enum StickTyperError {
    /// No gamepad with two analog sticks is connected
    #[error("No controllers detected. Please plug in a controller and restart the program.")]
    ControllerNotFound,

    /// Controller I/O errors (open, read, disconnect)
    #[error("Controller error: {0}")]
    Controller(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Transcript serialization errors
    #[error("Transcript error: {0}")]
    Transcript(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Stick Typer
pub type Result<T> = std::result::Result<T, StickTyperError>;
