//! Frame type and wire grammar constants.
//!
//! Every message on the link has the shape `$TYPE[,PAYLOAD]*`. The type
//! field and the payload are bounded so a [`Frame`] is a fixed-size value
//! that can live on the stack or in a static.

use heapless::Vec;

/// Marks the start of a frame. A `$` inside a frame body is ordinary data.
pub const START_BYTE: u8 = b'$';

/// Terminates a frame.
pub const END_BYTE: u8 = b'*';

/// Separates the type field from the payload, and payload fields from each
/// other.
pub const FIELD_SEPARATOR: u8 = b',';

/// Maximum length of the message type field, in bytes.
pub const MAX_TYPE_LEN: usize = 6;

/// Maximum length of the payload, in bytes.
pub const MAX_PAYLOAD_LEN: usize = 100;

/// One complete `$TYPE[,PAYLOAD]*` message.
///
/// Frames are only produced by [`FrameParser`](crate::FrameParser) when a
/// terminator arrives; a partially received message is never exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub(crate) msg_type: Vec<u8, MAX_TYPE_LEN>,
    pub(crate) payload: Vec<u8, MAX_PAYLOAD_LEN>,
}

impl Frame {
    /// The message type field. Empty for a `$,...*` frame.
    #[inline]
    #[must_use]
    pub fn msg_type(&self) -> &[u8] {
        &self.msg_type
    }

    /// The raw payload bytes. Empty for a type-only frame such as `$PING*`.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether this frame carries the given type.
    #[inline]
    #[must_use]
    pub fn is(&self, msg_type: &[u8]) -> bool {
        self.msg_type.as_slice() == msg_type
    }
}
