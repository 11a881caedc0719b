//! Outbound message encoding.

use core::fmt::Write;

use heapless::String;

/// Upper bound on an encoded message.
///
/// The widest case is `$MAG,` plus three full-range `i32` fields and the
/// terminator, 41 bytes; 48 leaves headroom and matches the transmit ring
/// sizing.
pub const MAX_MESSAGE_LEN: usize = 48;

/// Error code sent when a `RATE` command carries a value outside the
/// accepted set.
pub const ERR_INVALID_RATE: u8 = 1;

/// Every message the unit emits toward the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    /// Smoothed field vector in raw sensor counts: `$MAG,<x>,<y>,<z>*`.
    MagReport { x: i32, y: i32, z: i32 },
    /// Derived heading in whole degrees: `$YAW,<degrees>*`.
    YawReport { degrees: i32 },
    /// Semantic rejection of a received command: `$ERR,<code>*`.
    Error { code: u8 },
}

impl Message {
    /// Render the message as a wire frame.
    ///
    /// [`MAX_MESSAGE_LEN`] covers the widest encoding of every variant, so
    /// the write cannot fail.
    #[must_use]
    pub fn encode(&self) -> String<MAX_MESSAGE_LEN> {
        let mut out = String::new();
        let result = match *self {
            Message::MagReport { x, y, z } => write!(out, "$MAG,{},{},{}*", x, y, z),
            Message::YawReport { degrees } => write!(out, "$YAW,{}*", degrees),
            Message::Error { code } => write!(out, "$ERR,{}*", code),
        };
        debug_assert!(result.is_ok(), "encoded message exceeds MAX_MESSAGE_LEN");
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_encode_mag_report() {
        let msg = Message::MagReport { x: 10, y: -20, z: 30 };
        assert_eq!(msg.encode().as_str(), "$MAG,10,-20,30*");
    }

    #[test]
    fn test_encode_zero_vector() {
        let msg = Message::MagReport { x: 0, y: 0, z: 0 };
        assert_eq!(msg.encode().as_str(), "$MAG,0,0,0*");
    }

    #[test]
    fn test_encode_yaw_report() {
        assert_eq!(Message::YawReport { degrees: -43 }.encode().as_str(), "$YAW,-43*");
        assert_eq!(Message::YawReport { degrees: 180 }.encode().as_str(), "$YAW,180*");
        assert_eq!(Message::YawReport { degrees: 0 }.encode().as_str(), "$YAW,0*");
    }

    #[test]
    fn test_encode_error() {
        let msg = Message::Error { code: ERR_INVALID_RATE };
        assert_eq!(msg.encode().as_str(), "$ERR,1*");
    }

    #[test]
    fn test_widest_encoding_fits() {
        let msg = Message::MagReport {
            x: i32::MIN,
            y: i32::MIN,
            z: i32::MIN,
        };
        let encoded = msg.encode();
        assert_eq!(
            encoded.as_str(),
            "$MAG,-2147483648,-2147483648,-2147483648*"
        );
        assert!(encoded.len() <= MAX_MESSAGE_LEN);
    }
}
