//! Serial protocol types, parsing, and encoding for the compass unit.
//!
//! This crate provides everything needed to work with the unit's ASCII
//! protocol:
//!
//! - **Framing**: the wire grammar
//!   - [`Frame`] - One received `$TYPE[,PAYLOAD]*` message
//!   - [`FrameParser`] - Byte-at-a-time streaming parser
//!
//! - **Fields**: payload decoding
//!   - [`parse_signed_integer()`] - Permissive decimal field decode
//!   - [`skip_to_next_field()`] - Walk comma-separated fields
//!
//! - **Messages**: encoding of everything the unit sends
//!   - [`Message`] - `$MAG`, `$YAW` and `$ERR` reports
//!
//! # Protocol Format
//!
//! ```text
//! $TYPE[,PAYLOAD]*
//! ```
//!
//! - `$` - Start of frame (plain data when it appears inside a frame)
//! - `TYPE` - Message type, up to 6 bytes, terminated by `,` or `*`
//! - `PAYLOAD` - Optional comma-separated fields, up to 100 bytes
//! - `*` - End of frame
//!
//! There is no checksum and no escaping; the link relies on frame
//! resynchronization (`$` after damage) rather than integrity checks.
//!
//! # Examples
//!
//! ## Parsing a command
//!
//! ```
//! use compass_proto::{parse_signed_integer, FrameParser};
//!
//! let mut parser = FrameParser::new();
//! let mut rate = None;
//! for &byte in b"$RATE,4*" {
//!     if let Some(frame) = parser.feed(byte) {
//!         if frame.is(b"RATE") {
//!             rate = Some(parse_signed_integer(frame.payload()));
//!         }
//!     }
//! }
//! assert_eq!(rate, Some(4));
//! ```
//!
//! ## Encoding a report
//!
//! ```
//! use compass_proto::Message;
//!
//! let report = Message::MagReport { x: 10, y: -20, z: 30 };
//! assert_eq!(report.encode().as_str(), "$MAG,10,-20,30*");
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations; every
//! buffer is a fixed-capacity `heapless` container.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod fields;
pub mod frame;
pub mod messages;
pub mod parser;

// Re-export at crate root for convenience
pub use fields::{parse_signed_integer, skip_to_next_field};
pub use frame::{Frame, END_BYTE, FIELD_SEPARATOR, MAX_PAYLOAD_LEN, MAX_TYPE_LEN, START_BYTE};
pub use messages::{Message, ERR_INVALID_RATE, MAX_MESSAGE_LEN};
pub use parser::FrameParser;
