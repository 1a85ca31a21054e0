//! ETH008 command frame encoding

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::trace;

use crate::{
    error::{Error, Result},
    opcode::Opcode,
};

/// ETH008 command frame
///
/// # Frame Structure
///
/// ```text
/// ┌─────────────┬─────────────┐
/// │   Opcode    │   Payload   │
/// │   1 byte    │  0-98 bytes │
/// └─────────────┴─────────────┘
/// ```
///
/// There is no length field, no checksum and no framing marker: the device
/// reads the opcode byte and knows the rest of the request, and the engine
/// knows the fixed response length from [`Opcode::response_len`].
///
/// Each frame owns its own buffer; nothing is reused between calls.
///
/// # Examples
///
/// ```
/// use eth008_core::{Frame, Opcode};
///
/// let frame = Frame::new(Opcode::GetInfo);
/// assert_eq!(frame.encode().as_ref(), &[0x10]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command opcode
    pub opcode: Opcode,

    /// Request payload (opcode-specific, sent verbatim)
    pub payload: Bytes,
}

impl Frame {
    /// Maximum total frame size accepted by the device
    pub const MAX_FRAME_SIZE: usize = 100;

    /// Maximum payload size
    pub const MAX_PAYLOAD_SIZE: usize = 98;

    /// Create a new frame with empty payload
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            payload: Bytes::new(),
        }
    }

    /// Create a frame with payload
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooLarge`] if the payload exceeds
    /// [`Self::MAX_PAYLOAD_SIZE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use eth008_core::{Frame, Opcode};
    ///
    /// let frame = Frame::with_payload(Opcode::SetOutputActive, vec![1, 0]).unwrap();
    /// assert_eq!(frame.encode().as_ref(), &[0x20, 1, 0]);
    /// ```
    pub fn with_payload(opcode: Opcode, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();

        if payload.len() > Self::MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: Self::MAX_PAYLOAD_SIZE,
            });
        }

        Ok(Self { opcode, payload })
    }

    /// Encode frame to bytes
    ///
    /// The payload is appended verbatim after the opcode byte; password
    /// bytes in particular are not escaped or re-encoded.
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(1 + self.payload.len());

        buf.put_u8(self.opcode.into());
        buf.put_slice(&self.payload);

        trace!(
            opcode = %self.opcode,
            frame_len = buf.len(),
            response_len = self.response_len(),
            "Encoded frame"
        );

        buf
    }

    /// Expected response length for this frame's opcode
    pub fn response_len(&self) -> usize {
        self.opcode.response_len()
    }

    /// Get total frame size
    pub fn size(&self) -> usize {
        1 + self.payload.len()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("opcode", &self.opcode)
            .field("payload_len", &self.payload.len())
            .field("response_len", &self.response_len())
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame[{}](len={})", self.opcode, self.size())
    }
}
