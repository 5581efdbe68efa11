// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable byte-string engine over injectable block allocation.
//!
//! [`ByteString`] owns a single heap buffer obtained from a
//! [`BlockAlloc`](palisade_alloc::BlockAlloc) strategy. It is a byte
//! container, not a text type: no encoding awareness, a single NUL terminator
//! kept after the logical contents, capacity always a multiple of 16 and
//! never shrunk implicitly.
//!
//! Out-of-range element reads answer with a shared immutable zero byte
//! instead of failing; `Option`-returning accessors are provided alongside
//! for callers who want to observe the bounds check.
//!
//! # Example
//!
//! ```rust
//! use palisade_string::ByteString;
//!
//! let s0 = ByteString::from("Initial string");
//! let s3 = s0.substr(8, 3);
//!
//! assert_eq!(s3, "str");
//! assert_eq!(s0.capacity() % 16, 0);
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod byte_string;
mod convert;

#[cfg(test)]
mod tests;

pub use byte_string::ByteString;
pub use convert::{int_to_string, uint_to_string};
