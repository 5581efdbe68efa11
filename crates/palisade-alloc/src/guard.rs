// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::{alloc, dealloc};
use alloc::sync::Arc;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use crate::{AllocError, AllocFlags, BlockAlloc, BlockLayout};

/// Sentinel word stamped before the payload.
pub const LEADING_WORD: u32 = 0xdead_beef;

/// Sentinel word stamped after the payload.
pub const TRAILING_WORD: u32 = 0xcafe_babe;

const LEADING_WORDS: usize = 3;
const TRAILING_WORDS: usize = 4;
const HEADER_BYTES: usize = 4 * (1 + LEADING_WORDS);
const TRAILER_BYTES: usize = 4 * TRAILING_WORDS;

/// A guard-wall violation detected at release time.
///
/// Detection, not prevention: by the time a violation is observed the damage
/// has already happened. Reporting never alters control flow and the block is
/// always freed afterwards.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The size supplied at release differs from the size recorded at
    /// allocation.
    #[error("size mismatch at release: recorded {recorded}, supplied {supplied}")]
    SizeMismatch {
        /// Size stored in the block header at allocation time.
        recorded: usize,
        /// Size the caller passed to `release`.
        supplied: usize,
    },

    /// The sentinel words before the payload were overwritten (buffer
    /// underrun).
    #[error("leading guard wall damaged")]
    LeadingWallDamaged,

    /// The sentinel words after the payload were overwritten (buffer
    /// overrun).
    #[error("trailing guard wall damaged")]
    TrailingWallDamaged,
}

/// Receiver for guard-wall violation reports.
///
/// A collaborator, not a control-flow mechanism: implementations must return
/// normally. The allocator continues (and frees the block) no matter what was
/// reported.
pub trait DiagnosticSink {
    /// Called once per violation detected at release time.
    fn report(&self, violation: Violation);
}

/// A [`DiagnosticSink`] that counts violations per kind.
#[derive(Debug, Default)]
pub struct CountingSink {
    size_mismatches: AtomicUsize,
    leading_damages: AtomicUsize,
    trailing_damages: AtomicUsize,
}

impl CountingSink {
    /// Creates a sink with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of size mismatches reported.
    pub fn size_mismatches(&self) -> usize {
        self.size_mismatches.load(Ordering::Relaxed)
    }

    /// Number of leading-wall damages reported.
    pub fn leading_damages(&self) -> usize {
        self.leading_damages.load(Ordering::Relaxed)
    }

    /// Number of trailing-wall damages reported.
    pub fn trailing_damages(&self) -> usize {
        self.trailing_damages.load(Ordering::Relaxed)
    }

    /// Total number of violations reported.
    pub fn total(&self) -> usize {
        self.size_mismatches() + self.leading_damages() + self.trailing_damages()
    }
}

impl DiagnosticSink for CountingSink {
    fn report(&self, violation: Violation) {
        let counter = match violation {
            Violation::SizeMismatch { .. } => &self.size_mismatches,
            Violation::LeadingWallDamaged => &self.leading_damages,
            Violation::TrailingWallDamaged => &self.trailing_damages,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Live-allocation snapshot of a [`GuardAlloc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardStats {
    /// Blocks allocated and not yet released.
    pub live_blocks: usize,
    /// Payload bytes allocated and not yet released.
    pub live_bytes: usize,
}

#[derive(Debug, Default)]
struct LiveCounters {
    blocks: AtomicUsize,
    bytes: AtomicUsize,
}

/// Guard-wall debugging allocator.
///
/// Every block is laid out as
///
/// ```text
/// [front pad][size: u32][3 x 0xdeadbeef][payload][4 x 0xcafebabe]
/// ```
///
/// where the front region is `max(16, align)` bytes so the payload keeps its
/// requested alignment, and the trailing wall starts at the payload end
/// rounded up to the next word boundary. At release the recorded size is
/// compared against the caller-supplied one and both walls are verified;
/// every discrepancy is handed to the [`DiagnosticSink`] and the block is
/// freed regardless.
///
/// Clones share the sink and the live-allocation counters, so a container
/// holding a clone releases against the same bookkeeping.
#[derive(Debug)]
pub struct GuardAlloc<S: DiagnosticSink = CountingSink> {
    sink: Arc<S>,
    live: Arc<LiveCounters>,
}

impl<S: DiagnosticSink> Clone for GuardAlloc<S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            live: Arc::clone(&self.live),
        }
    }
}

impl GuardAlloc<CountingSink> {
    /// Creates a guard allocator reporting into a fresh [`CountingSink`].
    pub fn new_counting() -> Self {
        Self::new(CountingSink::new())
    }
}

impl Default for GuardAlloc<CountingSink> {
    fn default() -> Self {
        Self::new_counting()
    }
}

impl<S: DiagnosticSink> GuardAlloc<S> {
    /// Creates a guard allocator reporting into `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
            live: Arc::new(LiveCounters::default()),
        }
    }

    /// The diagnostic sink violations are reported to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Snapshot of the live-allocation counters.
    ///
    /// After a container instantiated over this allocator is dropped,
    /// `stats().live_blocks` returning to zero means every block it took was
    /// returned.
    pub fn stats(&self) -> GuardStats {
        GuardStats {
            live_blocks: self.live.blocks.load(Ordering::Relaxed),
            live_bytes: self.live.bytes.load(Ordering::Relaxed),
        }
    }

    fn front_bytes(layout: BlockLayout) -> usize {
        layout.align().max(HEADER_BYTES)
    }

    fn trailer_offset(layout: BlockLayout) -> usize {
        Self::front_bytes(layout) + round_up_word(layout.size())
    }

    fn raw_layout(layout: BlockLayout) -> Result<core::alloc::Layout, AllocError> {
        let total = Self::trailer_offset(layout) + TRAILER_BYTES;
        let align = layout.align().max(4);
        core::alloc::Layout::from_size_align(total, align).map_err(|_| {
            AllocError::InvalidLayout {
                size: layout.size(),
                align: layout.align(),
            }
        })
    }
}

// SAFETY: the payload region handed out lies strictly between the walls of a
// block obtained from the global allocator; it is valid, aligned (the front
// region is a multiple of the requested alignment) and unaliased until
// released, where the whole block is returned to the global allocator.
unsafe impl<S: DiagnosticSink> BlockAlloc for GuardAlloc<S> {
    fn allocate(&self, layout: BlockLayout, flags: AllocFlags) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Err(AllocError::ZeroSized);
        }
        // The header records the payload size in a single word.
        if layout.size() > u32::MAX as usize {
            return Err(AllocError::InvalidLayout {
                size: layout.size(),
                align: layout.align(),
            });
        }

        let raw = Self::raw_layout(layout)?;
        let base = unsafe {
            // SAFETY: `raw` has non-zero size (walls alone are 32 bytes).
            alloc(raw)
        };
        let base = NonNull::new(base).ok_or(AllocError::Exhausted {
            size: layout.size(),
        })?;

        let front = Self::front_bytes(layout);
        unsafe {
            // SAFETY: all offsets computed below stay inside the `raw`
            // block; the header and trailer offsets are word-aligned because
            // `front` and the rounded payload size are multiples of 4 and
            // `base` is aligned to at least 4.
            let payload = base.as_ptr().add(front);

            let header = payload.sub(HEADER_BYTES).cast::<u32>();
            header.write(layout.size() as u32);
            for i in 0..LEADING_WORDS {
                header.add(1 + i).write(LEADING_WORD);
            }

            let trailer = base.as_ptr().add(Self::trailer_offset(layout)).cast::<u32>();
            for i in 0..TRAILING_WORDS {
                trailer.add(i).write(TRAILING_WORD);
            }

            if flags.is_clear() {
                payload.write_bytes(0, layout.size());
            }

            self.live.blocks.fetch_add(1, Ordering::Relaxed);
            self.live.bytes.fetch_add(layout.size(), Ordering::Relaxed);

            // SAFETY: `payload` is within the non-null `base` block.
            Ok(NonNull::new_unchecked(payload))
        }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: BlockLayout) {
        let front = Self::front_bytes(layout);
        unsafe {
            // SAFETY: per the trait contract `ptr` is a payload pointer
            // produced by `allocate`, so the size header and leading wall
            // sit in the 16 bytes before it.
            let payload = ptr.as_ptr();
            let header = payload.sub(HEADER_BYTES).cast::<u32>();

            let recorded = header.read() as usize;
            if recorded != layout.size() {
                self.sink.report(Violation::SizeMismatch {
                    recorded,
                    supplied: layout.size(),
                });
            }

            // The block was created from the recorded size, so the layout
            // handed back to the global allocator is derived from it, not
            // from what the caller claims now.
            let raw = match Self::raw_layout(BlockLayout::new(recorded, layout.align())) {
                Ok(raw) => raw,
                Err(_) => return,
            };

            if (0..LEADING_WORDS).any(|i| header.add(1 + i).read() != LEADING_WORD) {
                self.sink.report(Violation::LeadingWallDamaged);
            }

            let trailer = payload
                .sub(front)
                .add(Self::trailer_offset(layout))
                .cast::<u32>();
            if (0..TRAILING_WORDS).any(|i| trailer.add(i).read() != TRAILING_WORD) {
                self.sink.report(Violation::TrailingWallDamaged);
            }

            self.live.blocks.fetch_sub(1, Ordering::Relaxed);
            self.live.bytes.fetch_sub(recorded, Ordering::Relaxed);

            // SAFETY: `payload - front` is the base pointer returned by the
            // global allocator for this block.
            dealloc(payload.sub(front), raw);
        }
    }
}

fn round_up_word(n: usize) -> usize {
    (n + 3) & !3
}
