//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] eth008_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] eth008_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] eth008_types::Error),

    #[error("Device not connected")]
    NotConnected,

    #[error("Authentication required - module is locked and no password was supplied")]
    AuthRequired,

    #[error("Authentication rejected - module remained locked")]
    AuthRejected,
}
