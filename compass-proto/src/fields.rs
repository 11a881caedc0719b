//! Payload field helpers.
//!
//! Payloads are comma-separated ASCII fields. These helpers walk and decode
//! them in place, without allocating or copying.

use crate::frame::FIELD_SEPARATOR;

/// Decode a signed decimal integer at the start of `field`.
///
/// Accepts an optional leading `+` or `-`, then folds bytes into
/// `value * 10 + (byte - b'0')` until a field separator or the end of the
/// slice. An empty field decodes to 0.
///
/// The decode is permissive to stay byte-compatible with the wire peers
/// this unit ships against: there is no digit validation and no
/// overflow guard. Non-digit bytes and over-range values produce a
/// deterministic but meaningless result (wrapping arithmetic, never a
/// panic); callers that care validate the decoded value against an accepted
/// set.
#[must_use]
pub fn parse_signed_integer(field: &[u8]) -> i32 {
    let (sign, digits) = match field.first() {
        Some(&b'-') => (-1i32, &field[1..]),
        Some(&b'+') => (1, &field[1..]),
        _ => (1, field),
    };

    let mut value: i32 = 0;
    for &byte in digits {
        if byte == FIELD_SEPARATOR {
            break;
        }
        value = value
            .wrapping_mul(10)
            .wrapping_add(i32::from(byte) - i32::from(b'0'));
    }
    value.wrapping_mul(sign)
}

/// Offset just past the next field separator at or after `offset`, or the
/// payload length when no separator remains.
#[must_use]
pub fn skip_to_next_field(payload: &[u8], mut offset: usize) -> usize {
    while offset < payload.len() && payload[offset] != FIELD_SEPARATOR {
        offset += 1;
    }
    if offset < payload.len() {
        offset += 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(parse_signed_integer(b"0"), 0);
        assert_eq!(parse_signed_integer(b"5"), 5);
        assert_eq!(parse_signed_integer(b"123"), 123);
    }

    #[test]
    fn test_parse_stops_at_separator() {
        assert_eq!(parse_signed_integer(b"123,456"), 123);
        assert_eq!(parse_signed_integer(b"7,"), 7);
    }

    #[test]
    fn test_parse_signs() {
        assert_eq!(parse_signed_integer(b"-45"), -45);
        assert_eq!(parse_signed_integer(b"+7,x"), 7);
        assert_eq!(parse_signed_integer(b"-0"), 0);
    }

    #[test]
    fn test_parse_empty_and_bare_sign() {
        assert_eq!(parse_signed_integer(b""), 0);
        assert_eq!(parse_signed_integer(b"-"), 0);
        assert_eq!(parse_signed_integer(b"+"), 0);
    }

    #[test]
    fn test_parse_is_permissive_not_validating() {
        // Documents the contract: garbage decodes to a deterministic value
        // rather than an error. `1x` folds to 1 * 10 + ('x' - '0') = 82.
        assert_eq!(parse_signed_integer(b"1x"), 82);
        // Rejection of such values happens at the accepted-set check, not
        // here.
    }

    #[test]
    fn test_parse_never_panics_on_overflow() {
        // Far past i32::MAX: wraps, does not panic.
        let _ = parse_signed_integer(b"99999999999999999999");
        let _ = parse_signed_integer(b"-99999999999999999999");
    }

    #[test]
    fn test_skip_to_next_field() {
        let payload = b"10,-20,30";
        assert_eq!(skip_to_next_field(payload, 0), 3);
        assert_eq!(skip_to_next_field(payload, 3), 7);
        assert_eq!(skip_to_next_field(payload, 7), 9);
        assert_eq!(skip_to_next_field(payload, 9), 9);
    }

    #[test]
    fn test_skip_on_field_without_separator() {
        assert_eq!(skip_to_next_field(b"42", 0), 2);
        assert_eq!(skip_to_next_field(b"", 0), 0);
    }

    #[test]
    fn test_walk_all_fields() {
        let payload = b"1,-2,3";
        let mut offset = 0;
        let mut values = [0i32; 3];
        for value in &mut values {
            *value = parse_signed_integer(&payload[offset..]);
            offset = skip_to_next_field(payload, offset);
        }
        assert_eq!(values, [1, -2, 3]);
    }
}
