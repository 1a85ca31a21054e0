//! # eth008
//!
//! Control client for the ETH008 networked relay module.
//!
//! The ETH008 exposes eight relay outputs over a proprietary binary TCP
//! protocol: one opcode byte per request, a fixed-length response per
//! opcode, optional password protection with an unlock window.
//!
//! ## Features
//!
//! - Type-safe opcode and frame handling
//! - Bounded-wait socket I/O (no operation can hang)
//! - Password/unlock handshake with state verification
//! - Async API using Tokio
//!
//! ## Quick Start
//!
//! ```no_run
//! use eth008::Device;
//!
//! #[tokio::main]
//! async fn main() -> eth008::Result<()> {
//!     let mut device = Device::new("192.168.1.100", eth008::DEFAULT_PORT)
//!         .with_password("password");
//!
//!     device.connect().await?;
//!     device.authenticate().await?;
//!
//!     let info = device.get_info().await?;
//!     println!("{}", info);
//!
//!     println!("{}", device.get_output_states().await?);
//!     device.toggle_output(1).await?;
//!
//!     device.close().await?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;

// Re-exports
pub use device::Device;
pub use error::{Error, Result};

// Re-export types
pub use eth008_core::{Frame, Opcode, SessionState, DEFAULT_PORT};
pub use eth008_types::{ModuleInfo, OutputIndex, OutputStates};
