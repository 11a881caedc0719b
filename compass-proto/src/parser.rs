//! Byte-at-a-time parser for `$TYPE[,PAYLOAD]*` frames.

use core::mem;

use crate::frame::{Frame, END_BYTE, FIELD_SEPARATOR, START_BYTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Discarding bytes until a start marker arrives.
    AwaitStart,
    /// Accumulating the type field.
    ReadType,
    /// Accumulating the payload.
    ReadPayload,
}

/// Streaming frame parser.
///
/// Feed it one received byte at a time; a completed [`Frame`] is returned
/// exactly when its terminator arrives. Input that never forms a valid frame
/// is consumed silently, and memory use stays bounded by the frame limits: an
/// overlong type or payload drops the frame in progress, after which the
/// parser resynchronizes on the next start byte.
///
/// # Example
///
/// ```
/// use compass_proto::FrameParser;
///
/// let mut parser = FrameParser::new();
/// let mut parsed = None;
/// for &byte in b"$RATE,5*" {
///     if let Some(frame) = parser.feed(byte) {
///         parsed = Some(frame);
///     }
/// }
/// let frame = parsed.unwrap();
/// assert_eq!(frame.msg_type(), b"RATE");
/// assert_eq!(frame.payload(), b"5");
/// ```
#[derive(Debug)]
pub struct FrameParser {
    state: State,
    // In-progress frame, handed out by value on completion.
    frame: Frame,
}

impl FrameParser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::AwaitStart,
            frame: Frame {
                msg_type: heapless::Vec::new(),
                payload: heapless::Vec::new(),
            },
        }
    }

    /// Consume one byte of input, returning a frame if this byte completed
    /// one.
    ///
    /// Delimiters are checked before capacity, so a type field of exactly
    /// [`MAX_TYPE_LEN`](crate::MAX_TYPE_LEN) bytes followed directly by the
    /// terminator still parses.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        match self.state {
            State::AwaitStart => {
                if byte == START_BYTE {
                    self.frame.msg_type.clear();
                    self.state = State::ReadType;
                }
                None
            }
            State::ReadType => match byte {
                FIELD_SEPARATOR => {
                    self.frame.payload.clear();
                    self.state = State::ReadPayload;
                    None
                }
                END_BYTE => {
                    self.frame.payload.clear();
                    self.state = State::AwaitStart;
                    Some(mem::take(&mut self.frame))
                }
                _ => {
                    if self.frame.msg_type.push(byte).is_err() {
                        // Type field too long: drop the frame in progress.
                        self.state = State::AwaitStart;
                    }
                    None
                }
            },
            State::ReadPayload => match byte {
                END_BYTE => {
                    self.state = State::AwaitStart;
                    Some(mem::take(&mut self.frame))
                }
                _ => {
                    if self.frame.payload.push(byte).is_err() {
                        // Payload too long: drop the frame in progress.
                        self.state = State::AwaitStart;
                    }
                    None
                }
            },
        }
    }

    /// Drop any partial frame and wait for the next start byte.
    pub fn reset(&mut self) {
        self.state = State::AwaitStart;
    }
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}
