//! Unified error types for glyph_engine

use thiserror::Error;

/// Main error type for glyph engine and editor operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === Contract Violations ===
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("No edit pending to {operation}")]
    NoPendingOperation { operation: &'static str },

    // === Buffer Errors ===
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Pixel data length mismatch: expected {expected}, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    // === Import Errors ===
    #[error("Unsupported image: {description}")]
    UnsupportedImage { description: String },

    // === Logging ===
    #[error("Failed to start logger: {message}")]
    Logger { message: String },

    // === External Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to parse settings: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write settings: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

/// Result type alias for glyph engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Create an error for an undo/redo call with nothing to apply
    pub fn no_pending(operation: &'static str) -> Self {
        Self::NoPendingOperation { operation }
    }

    /// Whether this error reports a caller contract violation rather than an
    /// environmental failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::NoPendingOperation { .. }
                | Self::InvalidDimensions { .. }
                | Self::DataLengthMismatch { .. }
        )
    }
}
