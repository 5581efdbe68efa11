// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Injectable block allocation strategies for the Palisade container suite.
//!
//! Every Palisade container obtains its backing memory (string buffers,
//! vector buffers, list nodes) through the [`BlockAlloc`] trait instead of a
//! process-wide allocator symbol. Two strategies are provided:
//!
//! - [`SystemAlloc`]: a plain pass-through to the global allocator.
//! - [`GuardAlloc`]: a debugging allocator that brackets every block with
//!   sentinel guard walls and verifies them on release, reporting corruption
//!   through a [`DiagnosticSink`] without ever aborting.
//!
//! Both satisfy the same contract, so a container instantiated over either
//! behaves identically as long as no memory-safety rule is broken.
//!
//! # Example
//!
//! ```rust
//! use palisade_alloc::{AllocFlags, BlockAlloc, BlockLayout, GuardAlloc};
//!
//! let alloc = GuardAlloc::new_counting();
//! let layout = BlockLayout::bytes(48);
//!
//! let block = alloc.allocate(layout, AllocFlags::CLEAR).unwrap();
//! assert_eq!(alloc.stats().live_blocks, 1);
//!
//! // SAFETY: `block` came from `alloc` with this exact layout.
//! unsafe { alloc.release(block, layout) };
//!
//! assert_eq!(alloc.stats().live_blocks, 0);
//! assert_eq!(alloc.sink().total(), 0);
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod block;
mod error;
mod guard;
mod system;

#[cfg(test)]
mod tests;

pub use block::{AllocFlags, BlockLayout};
pub use error::AllocError;
pub use guard::{CountingSink, DiagnosticSink, GuardAlloc, GuardStats, Violation};
pub use system::SystemAlloc;

use core::ptr::NonNull;

/// A strategy object handing out raw blocks of memory.
///
/// This is the single seam between the containers and the machine: string
/// buffers, vector buffers and list nodes all come from here. The caller owns
/// the size bookkeeping — [`release`](BlockAlloc::release) must be given the
/// same layout the block was allocated with.
///
/// # Safety
///
/// Implementations must return blocks that are valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and unaliased until
/// released. [`release`](BlockAlloc::release) must accept any pointer
/// previously returned by [`allocate`](BlockAlloc::allocate) on the same
/// instance (or a clone of it) together with the original layout.
pub unsafe trait BlockAlloc {
    /// Allocates one block described by `layout`.
    ///
    /// With [`AllocFlags::CLEAR`] the payload is zero-filled before being
    /// handed out.
    ///
    /// # Errors
    ///
    /// [`AllocError::ZeroSized`] for empty layouts, [`AllocError::Exhausted`]
    /// when the underlying allocator fails.
    fn allocate(&self, layout: BlockLayout, flags: AllocFlags) -> Result<NonNull<u8>, AllocError>;

    /// Returns a block to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`allocate`](BlockAlloc::allocate) on this
    /// instance (or a clone sharing its state) and `layout` must equal the
    /// layout it was allocated with. The block must not be used afterwards.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: BlockLayout);
}
