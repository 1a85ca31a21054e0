//! High-level device interface

use std::time::Duration;

use bytes::BytesMut;
use tracing::{debug, info, trace, warn};

use eth008_core::{Frame, Opcode, Session, SessionState};
use eth008_transport::{TcpTransport, Transport};
use eth008_types::{ModuleInfo, OutputIndex, OutputStates};

use crate::error::{Error, Result};

/// Pulse time for a permanent output change (no auto-revert)
const PERMANENT: u8 = 0;

/// Ack byte the module sends for an accepted password
const PASSWORD_ACCEPTED: u8 = 1;

/// ETH008 relay module
///
/// High-level session interface: connect, authenticate if the module is
/// password locked, run output/info operations, then log out and close.
/// The protocol is strictly synchronous, so exactly one request/response
/// cycle is ever in flight on the connection.
///
/// # Examples
///
/// ```no_run
/// use eth008::Device;
///
/// #[tokio::main]
/// async fn main() -> eth008::Result<()> {
///     let mut device = Device::new("192.168.1.100", 17494);
///
///     device.connect().await?;
///     device.authenticate().await?;
///
///     let states = device.get_output_states().await?;
///     println!("{}", states);
///
///     device.close().await?;
///     Ok(())
/// }
/// ```
pub struct Device {
    transport: Box<dyn Transport>,
    session: Session,
    timeout: Duration,
    password: Option<String>,
}

impl Device {
    /// Create a new device instance (TCP transport)
    pub fn new(ip: impl Into<String>, port: u16) -> Self {
        Self::with_transport(Box::new(TcpTransport::new(ip, port)))
    }

    /// Create a device instance over an existing transport
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            session: Session::new(),
            timeout: Duration::from_millis(500),
            password: None,
        }
    }

    /// Set the per-operation I/O wait budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the unlock password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.session.is_connected() && self.transport.is_connected()
    }

    /// Connect to the module
    ///
    /// Opens the transport and queries the unlock time once; the session
    /// starts out Locked (unlock time 0) or Unlocked (anything else).
    ///
    /// # Errors
    ///
    /// Returns an error if the network connection fails or the module does
    /// not answer the initial unlock-time query.
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connecting to {}...", self.transport.remote_addr());

        self.transport.connect().await?;

        let unlock_seconds = self.query_unlock_time().await?;
        self.session.mark_connected(unlock_seconds)?;

        info!(
            "Connected to {} ({:?})",
            self.transport.remote_addr(),
            self.session.state()
        );

        Ok(())
    }

    /// Query the remaining unlock time in seconds
    ///
    /// 0 means the module is locked. The reading always forces the session
    /// state: 0 to Locked, nonzero to Unlocked.
    pub async fn unlock_time(&mut self) -> Result<u8> {
        self.ensure_connected()?;

        let seconds = self.query_unlock_time().await?;
        self.session.apply_unlock_time(seconds)?;

        Ok(seconds)
    }

    /// Run the password handshake if the module is locked
    ///
    /// A locked module without a configured password is an immediate
    /// [`Error::AuthRequired`] with no wire I/O. Otherwise the password is
    /// sent verbatim and the unlock time re-queried: the module can ack a
    /// password yet remain locked, so the ack alone is never trusted.
    /// Authentication is not retried.
    ///
    /// # Errors
    ///
    /// [`Error::AuthRequired`] when locked with no password available,
    /// [`Error::AuthRejected`] when the password does not unlock the module.
    pub async fn authenticate(&mut self) -> Result<()> {
        self.ensure_connected()?;

        if self.session.is_unlocked() {
            debug!("Module already unlocked");
            return Ok(());
        }

        let Some(password) = self.password.clone() else {
            return Err(Error::AuthRequired);
        };

        debug!("Module is locked, sending password...");

        let frame = Frame::with_payload(Opcode::SendPassword, password.into_bytes())?;
        let ack = self.roundtrip(frame).await?;

        if ack[0] != PASSWORD_ACCEPTED {
            return Err(Error::AuthRejected);
        }

        // The ack only says the password was received; confirm the module
        // actually unlocked.
        let unlock_seconds = self.query_unlock_time().await?;
        self.session.apply_unlock_time(unlock_seconds)?;

        if !self.session.is_unlocked() {
            return Err(Error::AuthRejected);
        }

        info!("Module unlocked for {}s", unlock_seconds);
        Ok(())
    }

    /// Get module identification
    ///
    /// The three response bytes are surfaced positionally and exactly as
    /// received.
    pub async fn get_info(&mut self) -> Result<ModuleInfo> {
        self.ensure_unlocked()?;

        debug!("Getting module info...");

        let response = self.roundtrip(Frame::new(Opcode::GetInfo)).await?;
        let info = ModuleInfo::from_bytes([response[0], response[1], response[2]]);

        debug!("Module info: {}", info);

        Ok(info)
    }

    /// Get the digital output state bitmask
    pub async fn get_output_states(&mut self) -> Result<OutputStates> {
        self.ensure_unlocked()?;
        self.read_output_states().await
    }

    /// Set one output active or inactive (permanent, no auto-revert)
    ///
    /// # Errors
    ///
    /// An index outside 1-8 is rejected before any wire I/O.
    pub async fn set_output(&mut self, index: u8, active: bool) -> Result<()> {
        let index = OutputIndex::new(index)?;
        self.ensure_unlocked()?;

        self.write_output(index, active, PERMANENT).await
    }

    /// Set one output with a timed pulse
    ///
    /// The output reverts on its own after `pulse_time` (device-defined
    /// units); a pulse time of 0 makes the change permanent.
    pub async fn set_output_pulsed(&mut self, index: u8, active: bool, pulse_time: u8) -> Result<()> {
        let index = OutputIndex::new(index)?;
        self.ensure_unlocked()?;

        self.write_output(index, active, pulse_time).await
    }

    /// Toggle one output and return its new state
    ///
    /// The protocol has no toggle opcode, so this reads the current
    /// bitmask and then sends the set command for the opposite state: two
    /// round trips, not atomic. An external writer flipping the output
    /// between the two is a race inherent to the protocol.
    ///
    /// # Errors
    ///
    /// An index outside 1-8 is rejected before any wire I/O.
    pub async fn toggle_output(&mut self, index: u8) -> Result<bool> {
        let index = OutputIndex::new(index)?;
        self.ensure_unlocked()?;

        let states = self.read_output_states().await?;
        let desired = !states.is_active(index);

        debug!(
            "Toggling output {} ({} -> {})",
            index,
            if desired { "inactive" } else { "active" },
            if desired { "active" } else { "inactive" },
        );

        self.write_output(index, desired, PERMANENT).await?;

        Ok(desired)
    }

    /// Log out and close the connection
    ///
    /// Best-effort cleanup, safe to call on every exit path: the logout
    /// ack is read but its value is deliberately not checked, a failed
    /// logout is logged and does not prevent the disconnect, and the
    /// session always ends up Closed.
    pub async fn close(&mut self) -> Result<()> {
        if self.transport.is_connected() {
            debug!("Logging out...");

            if let Err(e) = self.roundtrip(Frame::new(Opcode::Logout)).await {
                warn!("Logout failed: {}", e);
            }
        }

        let disconnected = self.transport.disconnect().await;
        self.session.close();

        info!("Session closed");

        disconnected?;
        Ok(())
    }

    // Helper methods

    fn ensure_connected(&self) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(())
    }

    fn ensure_unlocked(&self) -> Result<()> {
        self.ensure_connected()?;

        if !self.session.is_unlocked() {
            return Err(Error::AuthRequired);
        }
        Ok(())
    }

    async fn query_unlock_time(&mut self) -> Result<u8> {
        let response = self.roundtrip(Frame::new(Opcode::GetUnlockTime)).await?;
        Ok(response[0])
    }

    async fn read_output_states(&mut self) -> Result<OutputStates> {
        let response = self.roundtrip(Frame::new(Opcode::GetDigitalOutputs)).await?;
        Ok(OutputStates::from_raw(response[0]))
    }

    async fn write_output(&mut self, index: OutputIndex, active: bool, pulse_time: u8) -> Result<()> {
        let opcode = if active {
            Opcode::SetOutputActive
        } else {
            Opcode::SetOutputInactive
        };

        let frame = Frame::with_payload(opcode, vec![index.get(), pulse_time])?;

        // Ack content carries no meaning beyond "the command completed"
        let _ack = self.roundtrip(frame).await?;
        Ok(())
    }

    /// One request/response cycle: send the frame, read the fixed-length
    /// response its opcode dictates.
    async fn roundtrip(&mut self, frame: Frame) -> Result<BytesMut> {
        trace!("Sending: {:?}", frame);

        let data = frame.encode();
        self.transport.send(&data, self.timeout).await?;

        let response = self
            .transport
            .receive_exact(frame.response_len(), self.timeout)
            .await?;

        trace!("Received: {:02X?}", response.as_ref());

        Ok(response)
    }
}
