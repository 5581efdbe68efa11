// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::slice;

use palisade_alloc::{AllocError, AllocFlags, BlockAlloc, BlockLayout, SystemAlloc};

/// Capacity granularity in bytes.
const GRANULE: usize = 16;

/// A growable contiguous array over an injectable allocator.
///
/// Capacity is measured in elements but negotiated in bytes: a growth
/// request is rounded up to the next 16-byte multiple before allocation, so
/// small element types get batched headroom for free. The buffer is
/// allocated lazily, doubled on growth and never shrunk implicitly.
pub struct Vector<T, A: BlockAlloc = SystemAlloc> {
    buf: Option<NonNull<T>>,
    capacity: usize,
    length: usize,
    alloc: A,
    marker: PhantomData<T>,
}

// SAFETY: the buffer is exclusively owned; moving the vector moves plain
// values and a pointer nothing else references.
unsafe impl<T: Send, A: BlockAlloc + Send> Send for Vector<T, A> {}
// SAFETY: shared access only reads through the pointer.
unsafe impl<T: Sync, A: BlockAlloc + Sync> Sync for Vector<T, A> {}

impl<T> Vector<T> {
    /// Creates an empty vector. No buffer is allocated until first use.
    pub fn new() -> Self {
        Self::new_in(SystemAlloc)
    }

    /// Creates an empty vector with room for at least `n` elements.
    pub fn with_capacity(n: usize) -> Self {
        let mut v = Self::new();
        v.reserve(n);
        v
    }

    /// Creates a vector of `n` clones of `value`.
    pub fn repeat(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut v = Self::with_capacity(n);
        for _ in 0..n {
            v.push(value.clone());
        }
        v
    }

    /// Creates a vector holding a copy of `src`.
    pub fn from_slice(src: &[T]) -> Self
    where
        T: Clone,
    {
        let mut v = Self::with_capacity(src.len());
        v.extend(src.iter().cloned());
        v
    }
}

impl<T, A: BlockAlloc> Vector<T, A> {
    /// Creates an empty vector that will allocate through `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            buf: None,
            capacity: 0,
            length: 0,
            alloc,
            marker: PhantomData,
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the vector has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Element capacity of the current buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self.buf {
            Some(p) => unsafe {
                // SAFETY: `length` initialized elements live at `p`.
                slice::from_raw_parts(p.as_ptr(), self.length)
            },
            None => &[],
        }
    }

    /// The elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.buf {
            Some(p) => unsafe {
                // SAFETY: `length` initialized elements at `p`, exclusively
                // borrowed through `self`.
                slice::from_raw_parts_mut(p.as_ptr(), self.length)
            },
            None => &mut [],
        }
    }

    /// Ensures room for at least `n` elements.
    pub fn reserve(&mut self, n: usize) {
        if self.try_reserve(n).is_err() {
            grow_failed::<T>(n);
        }
    }

    /// Fallible [`reserve`](Vector::reserve), surfacing allocator
    /// exhaustion instead of treating it as fatal.
    pub fn try_reserve(&mut self, n: usize) -> Result<(), AllocError> {
        if n <= self.capacity {
            return Ok(());
        }
        if mem::size_of::<T>() == 0 {
            return Err(AllocError::ZeroSized);
        }

        // Doubling keeps push amortized; the byte rounding supplies the
        // headroom for small elements.
        let target = n.max(self.capacity * 2);
        let bytes = round_up(target.saturating_mul(mem::size_of::<T>()));
        let elems = bytes / mem::size_of::<T>();

        let new = self
            .alloc
            .allocate(BlockLayout::array::<T>(elems), AllocFlags::ANY)?
            .cast::<T>();
        if let Some(old) = self.buf.take() {
            unsafe {
                // SAFETY: both buffers are live and disjoint; `length`
                // initialized elements move over.
                ptr::copy_nonoverlapping(old.as_ptr(), new.as_ptr(), self.length);
                self.alloc
                    .release(old.cast::<u8>(), BlockLayout::array::<T>(self.capacity));
            }
        }
        self.buf = Some(new);
        self.capacity = elems;
        Ok(())
    }

    /// Appends `value`.
    pub fn push(&mut self, value: T) {
        self.reserve(self.length + 1);
        unsafe {
            // SAFETY: capacity > length after the reserve.
            self.ptr().add(self.length).write(value);
        }
        self.length += 1;
    }

    /// Removes and returns the last element; `None` on an empty vector.
    pub fn pop(&mut self) -> Option<T> {
        if self.length == 0 {
            return None;
        }
        self.length -= 1;
        // SAFETY: the slot at the old last index holds an initialized
        // element that the shrunk length no longer covers.
        Some(unsafe { self.ptr().add(self.length).read() })
    }

    /// Inserts `value` before position `pos` (clamped to the length),
    /// shifting the tail one slot up.
    pub fn insert(&mut self, pos: usize, value: T) {
        let pos = pos.min(self.length);
        self.reserve(self.length + 1);
        unsafe {
            // SAFETY: capacity > length; the shifted range stays inside the
            // buffer and the move is overlap-safe.
            let p = self.ptr();
            ptr::copy(p.add(pos), p.add(pos + 1), self.length - pos);
            p.add(pos).write(value);
        }
        self.length += 1;
    }

    /// Removes and returns the element at `pos`; `None` for out-of-range
    /// positions.
    pub fn remove(&mut self, pos: usize) -> Option<T> {
        if pos >= self.length {
            return None;
        }
        unsafe {
            // SAFETY: pos < length; the element is read out before the
            // overlap-safe tail shift reuses its slot.
            let p = self.ptr();
            let value = p.add(pos).read();
            ptr::copy(p.add(pos + 1), p.add(pos), self.length - pos - 1);
            self.length -= 1;
            Some(value)
        }
    }

    /// Resizes to `n` elements, cloning `value` into any new slots.
    pub fn resize(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        if n <= self.length {
            self.truncate(n);
            return;
        }
        self.reserve(n);
        while self.length < n {
            unsafe {
                // SAFETY: capacity >= n > length.
                self.ptr().add(self.length).write(value.clone());
            }
            self.length += 1;
        }
    }

    /// Drops every element past the first `n`; a no-op when `n >= len()`.
    pub fn truncate(&mut self, n: usize) {
        if n >= self.length {
            return;
        }
        let tail = self.length - n;
        // Shrink before dropping so a panicking destructor cannot expose
        // the dead tail.
        self.length = n;
        unsafe {
            // SAFETY: the `tail` elements past `n` are initialized and no
            // longer reachable through the vector.
            let p = self.ptr().add(n);
            ptr::drop_in_place(slice::from_raw_parts_mut(p, tail));
        }
    }

    /// Drops all elements, keeping the buffer.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchanges contents with `other`.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    fn ptr(&self) -> *mut T {
        match self.buf {
            Some(p) => p.as_ptr(),
            // Callers only reach this after a successful reserve.
            None => unreachable!("Vector buffer not allocated"),
        }
    }
}

const fn round_up(size: usize) -> usize {
    (size + (GRANULE - 1)) & !(GRANULE - 1)
}

fn grow_failed<T>(n: usize) -> ! {
    let layout = Layout::array::<T>(n).unwrap_or(Layout::new::<T>());
    alloc::alloc::handle_alloc_error(layout)
}

impl<T, A: BlockAlloc> Drop for Vector<T, A> {
    fn drop(&mut self) {
        self.clear();
        if let Some(p) = self.buf.take() {
            unsafe {
                // SAFETY: `p` was allocated by `self.alloc` for exactly
                // `capacity` elements.
                self.alloc
                    .release(p.cast::<u8>(), BlockLayout::array::<T>(self.capacity));
            }
        }
    }
}

impl<T, A: BlockAlloc + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: BlockAlloc + Clone> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        let mut out = Self::new_in(self.alloc.clone());
        out.reserve(self.length);
        out.extend(self.iter().cloned());
        out
    }
}

impl<T, A: BlockAlloc> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: BlockAlloc> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: BlockAlloc + Default> FromIterator<T> for Vector<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new_in(A::default());
        v.extend(iter);
        v
    }
}

impl<T, A: BlockAlloc> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.reserve(self.length.saturating_add(low));
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T, A: BlockAlloc> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, A: BlockAlloc> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: PartialEq, A: BlockAlloc, B: BlockAlloc> PartialEq<Vector<T, B>> for Vector<T, A> {
    fn eq(&self, other: &Vector<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, A: BlockAlloc, const N: usize> PartialEq<[T; N]> for Vector<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, A: BlockAlloc> PartialEq<&[T]> for Vector<T, A> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: Eq, A: BlockAlloc> Eq for Vector<T, A> {}

impl<T: fmt::Debug, A: BlockAlloc> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
