// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::{alloc, alloc_zeroed, dealloc};
use core::ptr::NonNull;

use crate::{AllocError, AllocFlags, BlockAlloc, BlockLayout};

/// Pass-through strategy over the global allocator.
///
/// No sentinels, no bookkeeping; the default strategy for every container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemAlloc;

// SAFETY: blocks come straight from the global allocator with the requested
// layout and are returned to it unchanged.
unsafe impl BlockAlloc for SystemAlloc {
    fn allocate(&self, layout: BlockLayout, flags: AllocFlags) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Err(AllocError::ZeroSized);
        }

        let raw = layout.to_layout()?;
        let ptr = unsafe {
            // SAFETY: `raw` has non-zero size, checked above.
            if flags.is_clear() {
                alloc_zeroed(raw)
            } else {
                alloc(raw)
            }
        };

        NonNull::new(ptr).ok_or(AllocError::Exhausted {
            size: layout.size(),
        })
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: BlockLayout) {
        let raw = match layout.to_layout() {
            Ok(raw) => raw,
            // allocate() would have rejected this layout, so the pointer
            // cannot be one of ours; nothing sane to free.
            Err(_) => return,
        };

        unsafe {
            // SAFETY: per the trait contract `ptr` was returned by
            // `allocate` on this strategy with the same layout.
            dealloc(ptr.as_ptr(), raw);
        }
    }
}
