//! # eth008-core
//!
//! Core protocol implementation for the ETH008 networked relay module.
//!
//! This crate provides the low-level protocol primitives:
//! - Opcode table with fixed per-opcode response lengths
//! - Command frame encoding
//! - Session state machine

pub mod error;
pub mod frame;
pub mod opcode;
pub mod session;

pub use error::{Error, Result};
pub use frame::Frame;
pub use opcode::Opcode;
pub use session::{Session, SessionState};

/// Default device port
pub const DEFAULT_PORT: u16 = 17494;

/// Maximum frame size (device hard limit)
pub const MAX_FRAME_SIZE: usize = 100;
