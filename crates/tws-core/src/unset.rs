//! "Unset" sentinels for optional numeric fields.
//!
//! The wire carries a not-applicable numeric field as an empty field.
//! Decoders that know a field is optional map that empty field onto one
//! of these values, so that downstream code can tell "not set" apart
//! from a genuine zero.

/// Sentinel for an unset `f64` field.
pub const UNSET_DOUBLE: f64 = f64::MAX;

/// Sentinel for an unset `i32` field.
pub const UNSET_INTEGER: i32 = i32::MAX;

/// Sentinel for an unset `i64` field.
pub const UNSET_LONG: i64 = i64::MAX;

/// Returns `true` if `value` is the unset double sentinel.
pub fn is_unset_double(value: f64) -> bool {
    value == UNSET_DOUBLE
}
