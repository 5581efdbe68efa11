// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::mem::{align_of, size_of};

use crate::AllocError;

/// Size and alignment of a requested block.
///
/// A thin mirror of [`core::alloc::Layout`] that is allowed to describe
/// impossible requests (overflowing array sizes saturate to `usize::MAX`);
/// such requests fail at allocation time instead of panicking at the call
/// site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    size: usize,
    align: usize,
}

impl BlockLayout {
    pub(crate) const fn new(size: usize, align: usize) -> Self {
        Self { size, align }
    }

    /// Layout for `size` raw bytes, byte-aligned.
    pub const fn bytes(size: usize) -> Self {
        Self { size, align: 1 }
    }

    /// Layout for `n` contiguous values of `T`.
    pub const fn array<T>(n: usize) -> Self {
        Self {
            size: n.saturating_mul(size_of::<T>()),
            align: align_of::<T>(),
        }
    }

    /// Layout for a single value of `T`.
    pub const fn single<T>() -> Self {
        Self {
            size: size_of::<T>(),
            align: align_of::<T>(),
        }
    }

    /// Size of the block in bytes.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Required alignment of the block.
    pub const fn align(&self) -> usize {
        self.align
    }

    pub(crate) fn to_layout(self) -> Result<Layout, AllocError> {
        Layout::from_size_align(self.size, self.align).map_err(|_| AllocError::InvalidLayout {
            size: self.size,
            align: self.align,
        })
    }
}

/// Allocation request flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocFlags(u8);

impl AllocFlags {
    /// No special treatment; the payload contents are unspecified.
    pub const ANY: Self = Self(0);

    /// Zero-fill the payload before handing the block out.
    pub const CLEAR: Self = Self(1);

    /// Whether the zero-fill flag is set.
    pub const fn is_clear(&self) -> bool {
        self.0 & Self::CLEAR.0 != 0
    }
}

impl core::ops::BitOr for AllocFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
