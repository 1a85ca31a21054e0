//! Error types for eth008-core

/// Result type alias for core protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Payload exceeds the device's frame limit
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    /// Invalid session state transition
    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),
}
