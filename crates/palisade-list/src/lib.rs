// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Doubly linked list engine over injectable block allocation.
//!
//! [`List`] stores each element in its own node obtained from a
//! [`BlockAlloc`](palisade_alloc::BlockAlloc) strategy. An empty list holds
//! no allocation at all: the head and tail links are simply null, so
//! creating a list is free and moving one never invalidates node addresses.
//!
//! Structural operations relink nodes instead of moving values:
//! [`splice_before`](CursorMut::splice_before) is O(1),
//! [`sort`](List::sort) is a stable merge sort over the links, and
//! [`merge`](List::merge) consumes another list without copying a single
//! element.
//!
//! Positional operations follow the clamped-cursor policy: a cursor step
//! past either end is a no-op, and removals from an empty list answer
//! `None` rather than failing.
//!
//! # Example
//!
//! ```rust
//! use palisade_list::List;
//!
//! let mut l: List<i32> = [15, 36, 17, 20, 39].into_iter().collect();
//! l.remove_if(|&v| v % 2 != 0);
//!
//! assert_eq!(l.iter().copied().collect::<Vec<_>>(), [36, 20]);
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod cursor;
mod iter;
mod list;

#[cfg(test)]
mod tests;

pub use cursor::CursorMut;
pub use iter::{IntoIter, Iter, IterMut};
pub use list::List;
