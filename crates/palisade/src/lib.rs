// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Guard-walled allocation and containers that survive hostile memory.</em></p>
//!
//! ---
//!
//! Palisade is a container suite built around one idea: every heap block a
//! container owns goes through an explicit, injectable allocation strategy,
//! and that strategy can fortify each block with sentinel walls that detect
//! overruns, underruns and mismatched frees the moment the block comes back.
//!
//! # Features
//!
//! - 🧱 **Guard walls** — [`GuardAlloc`](palisade_alloc::GuardAlloc) brackets
//!   every payload with sentinel words and verifies them on release
//! - 🔌 **Injectable allocation** — every container is generic over
//!   [`BlockAlloc`](palisade_alloc::BlockAlloc); production code uses
//!   [`SystemAlloc`](palisade_alloc::SystemAlloc), debugging swaps in the
//!   guard without touching container code
//! - 🪢 **Relinking, not copying** — list splice, merge and sort move nodes
//!   by pointer surgery; element addresses stay stable
//! - 🤫 **Silent clamping** — out-of-range positions clamp or answer
//!   `Option`/a shared NUL byte; the container surface never panics on bad
//!   indices
//! - 📦 **`no_std` compatible** — every crate in the suite builds with
//!   `alloc` only
//!
//! # Quick Start
//!
//! ```rust
//! use palisade::alloc::GuardAlloc;
//! use palisade::list::List;
//! use palisade::string::ByteString;
//!
//! // Containers default to the system allocator...
//! let s = ByteString::from("Initial string");
//! assert_eq!(s.substr(8, 3), "str");
//!
//! // ...and accept a guarded one for debugging builds.
//! let guard = GuardAlloc::new_counting();
//! let mut l: List<i32, GuardAlloc> = List::new_in(guard.clone());
//! l.extend([15, 36, 17, 20, 39]);
//! l.remove_if(|&v| v % 2 != 0);
//!
//! assert_eq!(l.iter().copied().collect::<Vec<_>>(), [36, 20]);
//! assert_eq!(guard.stats().live_blocks, 2);
//! drop(l);
//! assert_eq!(guard.stats().live_blocks, 0);
//! ```
//!
//! # Types
//!
//! - **[`ByteString`](palisade_string::ByteString)**: growable NUL-terminated
//!   byte string; capacity in 16-byte granules, shared-NUL reads for bad
//!   positions.
//! - **[`List<T>`](palisade_list::List)**: doubly linked list with a clamped
//!   [`CursorMut`](palisade_list::CursorMut), O(1) splice, stable merge sort.
//! - **[`Vector<T>`](palisade_vec::Vector)**: contiguous dynamic array with
//!   the same byte-granule growth discipline.
//! - **[`GuardAlloc`](palisade_alloc::GuardAlloc)**: wall-checking allocator
//!   reporting violations through a pluggable diagnostic sink.
//!
//! # License
//!
//! GPL-3.0-only

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod collections;

pub use palisade_alloc as alloc;
pub use palisade_list as list;
pub use palisade_string as string;
pub use palisade_vec as vec;
