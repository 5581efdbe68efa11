// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Contiguous dynamic array engine over injectable block allocation.
//!
//! [`Vector`] keeps its elements in one heap block obtained from a
//! [`BlockAlloc`](palisade_alloc::BlockAlloc) strategy, growing by
//! reallocation with the same byte-size rounding discipline as the string
//! engine (requested byte sizes round up to the next multiple of 16, and
//! capacity is never reduced implicitly).
//!
//! Positional operations follow the clamped policy of the suite:
//! [`insert`](Vector::insert) clamps its position to the length,
//! [`remove`](Vector::remove) and [`pop`](Vector::pop) answer `Option`.
//!
//! Zero-sized element types are not supported; growth for them reports
//! allocator exhaustion instead of fabricating a buffer.
//!
//! # Example
//!
//! ```rust
//! use palisade_vec::Vector;
//!
//! let mut v: Vector<i32> = Vector::from_slice(&[1, 3]);
//! v.insert(1, 2);
//!
//! assert_eq!(v.as_slice(), [1, 2, 3]);
//! assert_eq!(v.remove(0), Some(1));
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod vector;

#[cfg(test)]
mod tests;

pub use vector::Vector;
