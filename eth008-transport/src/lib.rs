//! Transport layer for the ETH008 protocol
//!
//! Provides bounded-wait TCP communication with one relay module. The
//! protocol is strictly synchronous: one request frame out, one
//! fixed-length response back, nothing in flight in between.

pub mod error;
pub mod tcp;

pub use error::{Error, Result};
pub use tcp::TcpTransport;

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for a single device connection
///
/// Every send and receive is bounded by the caller-supplied wait budget;
/// exceeding it is a timeout error, never an indefinite block.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Connect to device
    async fn connect(&mut self) -> Result<()>;

    /// Disconnect from device
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send a complete frame
    ///
    /// The frame is written in one logical operation; a peer accepting
    /// fewer bytes than requested is an error, not a retry trigger.
    async fn send(&mut self, data: &[u8], wait: Duration) -> Result<()>;

    /// Receive exactly `len` bytes
    ///
    /// Accumulates until `len` bytes have arrived. A peer that closes the
    /// stream first yields [`Error::ShortRead`], distinct from
    /// [`Error::ReadTimeout`], so callers can tell "device hung up" from
    /// "device too slow".
    async fn receive_exact(&mut self, len: usize, wait: Duration) -> Result<BytesMut>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
