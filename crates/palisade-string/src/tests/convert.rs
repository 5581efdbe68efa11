// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{ByteString, int_to_string, uint_to_string};

// =============================================================================
// uint_to_string()
// =============================================================================

#[test]
fn test_uint_zero() {
    assert_eq!(uint_to_string(0), "0");
}

#[test]
fn test_uint_small() {
    assert_eq!(uint_to_string(7), "7");
    assert_eq!(uint_to_string(42), "42");
    assert_eq!(uint_to_string(1000), "1000");
}

#[test]
fn test_uint_max_is_twenty_digits() {
    let s = uint_to_string(u64::MAX);
    assert_eq!(s, "18446744073709551615");
    assert_eq!(s.len(), 20);
}

// =============================================================================
// int_to_string()
// =============================================================================

#[test]
fn test_int_zero_and_positive() {
    assert_eq!(int_to_string(0), "0");
    assert_eq!(int_to_string(123), "123");
}

#[test]
fn test_int_negative() {
    assert_eq!(int_to_string(-1), "-1");
    assert_eq!(int_to_string(-987654), "-987654");
}

#[test]
fn test_int_extremes() {
    assert_eq!(int_to_string(i64::MAX), "9223372036854775807");
    assert_eq!(int_to_string(i64::MIN), "-9223372036854775808");
}

// =============================================================================
// From<u64>, From<i64>
// =============================================================================

#[test]
fn test_from_integers() {
    assert_eq!(ByteString::from(42u64), "42");
    assert_eq!(ByteString::from(-42i64), "-42");
    assert_eq!(ByteString::from(7u32), "7");
    assert_eq!(ByteString::from(i32::MIN), "-2147483648");
}
