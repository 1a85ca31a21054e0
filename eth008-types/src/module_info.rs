//! Module information structure

use std::fmt;

/// Module identification
///
/// The three bytes of the GetInfo response, mapped positionally. Byte
/// values are surfaced exactly as the module reported them; no range
/// validation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Module ID (19 for ETH008)
    pub module_id: u8,

    /// Hardware version
    pub hardware_version: u8,

    /// Firmware version
    pub firmware_version: u8,
}

impl ModuleInfo {
    /// Build from the raw 3-byte GetInfo response
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            module_id: bytes[0],
            hardware_version: bytes[1],
            firmware_version: bytes[2],
        }
    }
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Module[ID: {}, HW: {}, FW: {}]",
            self.module_id, self.hardware_version, self.firmware_version
        )
    }
}
