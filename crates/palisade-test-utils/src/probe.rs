// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::ptr::NonNull;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use palisade_alloc::{AllocError, AllocFlags, BlockAlloc, BlockLayout, SystemAlloc};

/// Instrumented allocator for container tests.
///
/// Forwards every request to [`SystemAlloc`], counting allocations and
/// releases, and can be armed to refuse allocation after a budget is spent
/// so fallible growth paths can be exercised deterministically.
///
/// Clones share the counters and the budget.
#[derive(Clone)]
pub struct ProbeAlloc {
    inner: SystemAlloc,
    state: Arc<ProbeState>,
}

struct ProbeState {
    allocations: AtomicUsize,
    releases: AtomicUsize,
    // usize::MAX means unlimited.
    budget: AtomicUsize,
}

impl Default for ProbeAlloc {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeAlloc {
    /// Creates a probe with an unlimited allocation budget.
    pub fn new() -> Self {
        Self::with_budget(usize::MAX)
    }

    /// Creates a probe that satisfies at most `budget` allocations and
    /// reports exhaustion afterwards.
    pub fn with_budget(budget: usize) -> Self {
        Self {
            inner: SystemAlloc,
            state: Arc::new(ProbeState {
                allocations: AtomicUsize::new(0),
                releases: AtomicUsize::new(0),
                budget: AtomicUsize::new(budget),
            }),
        }
    }

    /// Number of successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.state.allocations.load(Ordering::Relaxed)
    }

    /// Number of releases so far.
    pub fn releases(&self) -> usize {
        self.state.releases.load(Ordering::Relaxed)
    }

    /// Successful allocations minus releases.
    pub fn live(&self) -> usize {
        self.allocations() - self.releases()
    }
}

// SAFETY: forwards the SystemAlloc contract unchanged; bookkeeping does not
// touch the returned blocks.
unsafe impl BlockAlloc for ProbeAlloc {
    fn allocate(&self, layout: BlockLayout, flags: AllocFlags) -> Result<NonNull<u8>, AllocError> {
        let budget = self.state.budget.load(Ordering::Relaxed);
        if budget != usize::MAX {
            if budget == 0 {
                return Err(AllocError::Exhausted {
                    size: layout.size(),
                });
            }
            self.state.budget.store(budget - 1, Ordering::Relaxed);
        }
        let ptr = self.inner.allocate(layout, flags)?;
        self.state.allocations.fetch_add(1, Ordering::Relaxed);
        Ok(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: BlockLayout) {
        // SAFETY: caller upholds the BlockAlloc contract; the block came
        // from our inner SystemAlloc.
        unsafe { self.inner.release(ptr, layout) };
        self.state.releases.fetch_add(1, Ordering::Relaxed);
    }
}
