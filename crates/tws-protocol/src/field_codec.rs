//! Field codec: typed value <-> wire field text.
//!
//! A field is a run of bytes without the delimiter. Its type is decided by
//! the call site, never by the field itself:
//!
//! ```text
//! int / long : base-10 text, empty = 0
//! bool       : int, nonzero = true
//! double     : base-10 floating text, empty = 0.0
//! *_max      : as above, but empty = unset sentinel
//! string     : raw bytes, no charset assumed
//! ```
//!
//! Encoding writes the canonical text followed by one delimiter. There is
//! no escaping: a delimiter inside a string field corrupts the stream, and
//! that is a limitation of the protocol, not of this codec.

use bytes::{BufMut, Bytes, BytesMut};
use tws_core::{UNSET_DOUBLE, UNSET_INTEGER, UNSET_LONG};

use crate::error::ProtocolError;
use crate::wire_types::DELIMITER;

// ============================================================================
// Decoding
// ============================================================================

/// Decode an `i32` field. An empty field is 0.
pub fn decode_int(field: &[u8]) -> Result<i32, ProtocolError> {
    if field.is_empty() {
        return Ok(0);
    }
    parse_text(field, "int")
}

/// Decode an `i64` field. An empty field is 0.
pub fn decode_long(field: &[u8]) -> Result<i64, ProtocolError> {
    if field.is_empty() {
        return Ok(0);
    }
    parse_text(field, "long")
}

/// Decode an `f64` field. An empty field is 0.0.
pub fn decode_double(field: &[u8]) -> Result<f64, ProtocolError> {
    if field.is_empty() {
        return Ok(0.0);
    }
    parse_text(field, "double")
}

/// Decode a boolean carried as an integer.
pub fn decode_bool(field: &[u8]) -> Result<bool, ProtocolError> {
    decode_int(field).map(|v| v != 0)
}

/// Decode an optional `i32`: empty is [`UNSET_INTEGER`].
pub fn decode_int_max(field: &[u8]) -> Result<i32, ProtocolError> {
    if field.is_empty() {
        return Ok(UNSET_INTEGER);
    }
    decode_int(field)
}

/// Decode an optional `i64`: empty is [`UNSET_LONG`].
pub fn decode_long_max(field: &[u8]) -> Result<i64, ProtocolError> {
    if field.is_empty() {
        return Ok(UNSET_LONG);
    }
    decode_long(field)
}

/// Decode an optional `f64`: empty is [`UNSET_DOUBLE`].
pub fn decode_double_max(field: &[u8]) -> Result<f64, ProtocolError> {
    if field.is_empty() {
        return Ok(UNSET_DOUBLE);
    }
    decode_double(field)
}

/// Decode a string field as raw bytes.
pub fn decode_string(field: &[u8]) -> Bytes {
    Bytes::copy_from_slice(field)
}

/// The two string-encoded booleans the protocol uses (`"true"` / anything else).
pub fn decode_text_bool(field: &[u8]) -> bool {
    field == b"true"
}

fn parse_text<T: std::str::FromStr>(field: &[u8], kind: &'static str) -> Result<T, ProtocolError> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .ok_or_else(|| ProtocolError::malformed(kind, field))
}

// ============================================================================
// Encoding
// ============================================================================

pub fn encode_int(out: &mut BytesMut, value: i32) {
    encode_raw(out, value.to_string().as_bytes());
}

pub fn encode_long(out: &mut BytesMut, value: i64) {
    encode_raw(out, value.to_string().as_bytes());
}

/// Shortest text that parses back to the same `f64`.
pub fn encode_double(out: &mut BytesMut, value: f64) {
    encode_raw(out, value.to_string().as_bytes());
}

pub fn encode_bool(out: &mut BytesMut, value: bool) {
    encode_raw(out, if value { b"1" } else { b"0" });
}

/// Append a string field verbatim.
pub fn encode_string(out: &mut BytesMut, value: &[u8]) {
    encode_raw(out, value);
}

fn encode_raw(out: &mut BytesMut, text: &[u8]) {
    out.reserve(text.len() + 1);
    out.put_slice(text);
    out.put_u8(DELIMITER);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plain_fields_are_zero() {
        assert_eq!(decode_int(b"").unwrap(), 0);
        assert_eq!(decode_long(b"").unwrap(), 0);
        assert_eq!(decode_double(b"").unwrap(), 0.0);
        assert!(!decode_bool(b"").unwrap());
    }

    #[test]
    fn empty_max_fields_are_unset() {
        assert_eq!(decode_int_max(b"").unwrap(), UNSET_INTEGER);
        assert_eq!(decode_long_max(b"").unwrap(), UNSET_LONG);
        assert_eq!(decode_double_max(b"").unwrap(), UNSET_DOUBLE);
    }

    #[test]
    fn max_fields_parse_like_plain_ones_when_present() {
        assert_eq!(decode_int_max(b"0").unwrap(), 0);
        assert_eq!(decode_double_max(b"-2.5").unwrap(), -2.5);
        assert_eq!(decode_long_max(b"9000000000").unwrap(), 9_000_000_000);
    }

    #[test]
    fn bool_is_any_nonzero_int() {
        assert!(decode_bool(b"1").unwrap());
        assert!(decode_bool(b"-3").unwrap());
        assert!(!decode_bool(b"0").unwrap());
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        let err = decode_int(b"12a").unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedField { kind: "int", .. }));
        assert!(decode_double(b"abc").is_err());
        assert!(decode_int(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn server_max_double_text_parses() {
        assert_eq!(decode_double(b"1.7976931348623157E308").unwrap(), f64::MAX);
    }

    #[test]
    fn encoders_terminate_every_field() {
        let mut out = BytesMut::new();
        encode_int(&mut out, 63);
        encode_bool(&mut out, true);
        encode_double(&mut out, 101.25);
        encode_string(&mut out, b"IBM");
        encode_long(&mut out, -7);
        assert_eq!(&out[..], b"63\01\0101.25\0IBM\0-7\0");
    }

    #[test]
    fn text_bool_only_accepts_true() {
        assert!(decode_text_bool(b"true"));
        assert!(!decode_text_bool(b"1"));
        assert!(!decode_text_bool(b"TRUE"));
    }
}
