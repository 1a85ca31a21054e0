//! ETH008 protocol opcode definitions

use std::fmt;

/// Protocol opcodes
///
/// Single-byte command codes from the ETH008 TCP/IP protocol documentation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // Module information
    GetInfo = 0x10,

    // Output control
    SetOutputActive = 0x20,
    SetOutputInactive = 0x21,
    GetDigitalOutputs = 0x24,

    // Password protection
    SendPassword = 0x79,
    GetUnlockTime = 0x7A,
    Logout = 0x7B,
}

impl Opcode {
    /// Expected response length in bytes for this opcode
    ///
    /// The wire format carries no length field; the device always answers
    /// with a fixed number of bytes determined by the request opcode.
    pub fn response_len(self) -> usize {
        match self {
            Self::GetInfo => 3,
            Self::SetOutputActive
            | Self::SetOutputInactive
            | Self::GetDigitalOutputs
            | Self::SendPassword
            | Self::GetUnlockTime
            | Self::Logout => 1,
        }
    }

    /// Get opcode name
    pub fn name(self) -> &'static str {
        match self {
            Self::GetInfo => "GET_INFO",
            Self::SetOutputActive => "SET_OUTPUT_ACTIVE",
            Self::SetOutputInactive => "SET_OUTPUT_INACTIVE",
            Self::GetDigitalOutputs => "GET_DIGITAL_OUTPUTS",
            Self::SendPassword => "SEND_PASSWORD",
            Self::GetUnlockTime => "GET_UNLOCK_TIME",
            Self::Logout => "LOGOUT",
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        opcode as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}
