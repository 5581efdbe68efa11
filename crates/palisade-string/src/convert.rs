// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::ByteString;

/// Scratch size for decimal formatting: sign + 20 digits (u64::MAX) with
/// room to spare.
const SCRATCH: usize = 25;

/// Formats an unsigned integer as decimal ASCII.
pub fn uint_to_string(value: u64) -> ByteString {
    let mut scratch = [0u8; SCRATCH];
    ByteString::from_bytes(format_into(&mut scratch, value, false))
}

/// Formats a signed integer as decimal ASCII, with a leading `-` for
/// negative values. `i64::MIN` formats correctly via its unsigned magnitude.
pub fn int_to_string(value: i64) -> ByteString {
    let mut scratch = [0u8; SCRATCH];
    ByteString::from_bytes(format_into(&mut scratch, value.unsigned_abs(), value < 0))
}

/// Writes the decimal digits of `magnitude` into the tail of `scratch`,
/// walking backwards, and returns the formatted sub-slice.
fn format_into(scratch: &mut [u8; SCRATCH], magnitude: u64, negative: bool) -> &[u8] {
    let mut pos = SCRATCH;
    let mut rest = magnitude;
    loop {
        pos -= 1;
        scratch[pos] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    if negative {
        pos -= 1;
        scratch[pos] = b'-';
    }
    &scratch[pos..]
}

impl From<u64> for ByteString {
    fn from(value: u64) -> Self {
        uint_to_string(value)
    }
}

impl From<i64> for ByteString {
    fn from(value: i64) -> Self {
        int_to_string(value)
    }
}

impl From<u32> for ByteString {
    fn from(value: u32) -> Self {
        uint_to_string(u64::from(value))
    }
}

impl From<i32> for ByteString {
    fn from(value: i32) -> Self {
        int_to_string(i64::from(value))
    }
}
