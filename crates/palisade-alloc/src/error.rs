// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Error type for [`BlockAlloc`](crate::BlockAlloc) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The underlying allocator could not provide the requested block.
    ///
    /// This is the one genuinely fatal condition in the suite; containers
    /// funnel it into `handle_alloc_error` on their infallible surface and
    /// surface it as-is from their `try_` variants.
    #[error("allocation of {size} bytes failed")]
    Exhausted {
        /// Requested payload size in bytes.
        size: usize,
    },

    /// A zero-sized block was requested. Containers never make such requests;
    /// they track "no buffer" as a distinct state instead.
    #[error("zero-sized allocation request")]
    ZeroSized,

    /// The size/alignment pair cannot be represented as a real allocation.
    #[error("invalid block layout (size {size}, align {align})")]
    InvalidLayout {
        /// Requested size in bytes.
        size: usize,
        /// Requested alignment.
        align: usize,
    },
}
