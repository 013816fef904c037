//! # Error Types
//!
//! Custom error types for Feather Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for Feather Bridge
#[derive(Debug, Error)]
pub enum FeatherBridgeError {
    /// Degenerate scaling range: source low and high bounds are equal
    #[error("invalid scale range: from_low and from_high are both {0}")]
    InvalidRange(i32),

    /// Serial transport errors
    #[error("serial error: {0}")]
    Serial(String),

    /// No Feather device found on any candidate path
    #[error("no Feather device found (tried: {0})")]
    SerialPortNotFound(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Feather Bridge
pub type Result<T> = std::result::Result<T, FeatherBridgeError>;
