//! Session state for an ETH008 connection
//!
//! A session tracks where one connection is in its lifecycle:
//! - Disconnected until the transport is up
//! - Locked or Unlocked depending on the module's unlock time
//! - Closed after logout, unconditionally, error paths included
//!
//! The protocol is strictly synchronous and a session is owned exclusively
//! by the one device handle driving it, so no interior locking is needed.

use crate::error::{Error, Result};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not connected
    Disconnected,

    /// Connected, password protection engaged (unlock time = 0)
    Locked,

    /// Connected and accepting control commands
    Unlocked,

    /// Logged out and disconnected; the session cannot be reused
    Closed,
}

/// Session lifecycle tracker
#[derive(Debug)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Create a new disconnected session
    pub fn new() -> Self {
        Self {
            state: SessionState::Disconnected,
        }
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if connected (locked or unlocked)
    pub fn is_connected(&self) -> bool {
        matches!(self.state, SessionState::Locked | SessionState::Unlocked)
    }

    /// Check if unlocked
    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, SessionState::Unlocked)
    }

    /// Enter the connected state from the initial unlock-time query
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSessionState`] unless the session is
    /// currently disconnected.
    pub fn mark_connected(&mut self, unlock_seconds: u8) -> Result<()> {
        if self.state != SessionState::Disconnected {
            return Err(Error::InvalidSessionState(format!(
                "cannot connect from state: {:?}",
                self.state
            )));
        }

        self.state = Self::state_for(unlock_seconds);
        Ok(())
    }

    /// Re-apply an unlock-time reading to a connected session
    ///
    /// An unlock time of 0 always forces Locked and any nonzero value
    /// always forces Unlocked; the device's answer is authoritative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSessionState`] if the session is not
    /// connected.
    pub fn apply_unlock_time(&mut self, unlock_seconds: u8) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::InvalidSessionState(format!(
                "cannot apply unlock time in state: {:?}",
                self.state
            )));
        }

        self.state = Self::state_for(unlock_seconds);
        Ok(())
    }

    /// Close the session
    ///
    /// Valid from any state; close is cleanup, not a gated transition.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }

    fn state_for(unlock_seconds: u8) -> SessionState {
        if unlock_seconds == 0 {
            SessionState::Locked
        } else {
            SessionState::Unlocked
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
