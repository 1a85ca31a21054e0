//! Digital output state types

use std::fmt;

use crate::error::{Error, Result};

/// Number of digital outputs on the module
pub const OUTPUT_COUNT: u8 = 8;

/// Validated digital output index (1-8)
///
/// Output numbering on the module is 1-based; bit positions in the state
/// bitmask are 0-based. Constructing an `OutputIndex` is the only place
/// the range is checked, so an out-of-range index can never reach the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputIndex(u8);

impl OutputIndex {
    /// Create a validated output index
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOutputIndex`] for 0 or anything above 8.
    pub fn new(index: u8) -> Result<Self> {
        if index == 0 || index > OUTPUT_COUNT {
            return Err(Error::InvalidOutputIndex(index));
        }
        Ok(Self(index))
    }

    /// The 1-based output number as sent on the wire
    pub fn get(self) -> u8 {
        self.0
    }

    /// The 0-based bit position in the output bitmask
    pub fn bit(self) -> u8 {
        self.0 - 1
    }
}

impl fmt::Display for OutputIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output state bitmask
///
/// One byte as reported by GetDigitalOutputs: bit r (0-indexed) carries
/// the state of relay r+1, where 1 = active/closed and 0 = inactive/open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStates(u8);

impl OutputStates {
    /// Wrap a raw bitmask byte
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// The raw bitmask byte
    pub fn raw(self) -> u8 {
        self.0
    }

    /// State of one output
    pub fn is_active(self, index: OutputIndex) -> bool {
        self.0 & (1 << index.bit()) != 0
    }

    /// Iterate over all eight outputs as (index, active) pairs
    pub fn iter(self) -> impl Iterator<Item = (OutputIndex, bool)> {
        (1..=OUTPUT_COUNT).map(move |i| {
            let index = OutputIndex(i);
            (index, self.is_active(index))
        })
    }
}

impl fmt::Display for OutputStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, active) in self.iter() {
            if index.get() > 1 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", index, if active { "ON" } else { "OFF" })?;
        }
        Ok(())
    }
}
