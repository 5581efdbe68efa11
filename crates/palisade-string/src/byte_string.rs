// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::slice;

use alloc::string::String;
use palisade_alloc::{AllocError, AllocFlags, BlockAlloc, BlockLayout, SystemAlloc};

/// Shared immutable zero byte answered for out-of-range reads.
static NUL: u8 = 0;

/// Capacity granularity: every buffer size is a multiple of this.
const GRANULE: usize = 16;

const fn round_up(size: usize) -> usize {
    (size + (GRANULE - 1)) & !(GRANULE - 1)
}

/// A growable, NUL-terminated byte string over an injectable allocator.
///
/// Owns at most one heap block from `A`. Invariants, whenever a buffer
/// exists:
///
/// - `capacity() % 16 == 0` and `len() < capacity()`;
/// - the byte at `len()` is a NUL terminator, excluded from `len()`.
///
/// The buffer is allocated lazily on first need, grown by reallocation
/// (rounding the requested size up to the next multiple of 16) and never
/// shrunk implicitly; [`reset`](ByteString::reset) releases it.
///
/// Out-of-range positions index a process-wide immutable zero byte rather
/// than failing; use [`get`](ByteString::get) / [`get_mut`](ByteString::get_mut)
/// to observe the bounds check.
pub struct ByteString<A: BlockAlloc = SystemAlloc> {
    buf: Option<NonNull<u8>>,
    capacity: usize,
    length: usize,
    alloc: A,
}

// SAFETY: the buffer is exclusively owned; the raw pointer never aliases
// another instance, so the container is as thread-mobile as its allocator.
unsafe impl<A: BlockAlloc + Send> Send for ByteString<A> {}
// SAFETY: shared access only reads through the pointer.
unsafe impl<A: BlockAlloc + Sync> Sync for ByteString<A> {}

impl ByteString {
    /// Creates an empty string. No buffer is allocated until first use.
    pub fn new() -> Self {
        Self::new_in(SystemAlloc)
    }

    /// Creates a string holding a copy of `src`.
    pub fn from_bytes(src: &[u8]) -> Self {
        let mut s = Self::new();
        s.push_bytes(src);
        s
    }

    /// Creates a string from at most the first `n` bytes of `src`.
    pub fn from_bytes_n(src: &[u8], n: usize) -> Self {
        Self::from_bytes(&src[..n.min(src.len())])
    }

    /// Creates a string of `n` copies of `byte`.
    pub fn repeat(n: usize, byte: u8) -> Self {
        let mut s = Self::new();
        s.append_n(n, byte);
        s
    }
}

impl<A: BlockAlloc> ByteString<A> {
    /// Creates an empty string that will allocate through `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            buf: None,
            capacity: 0,
            length: 0,
            alloc,
        }
    }

    // -------------------------------------------------------------------------
    // Capacity
    // -------------------------------------------------------------------------

    /// Logical length in bytes, excluding the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the string is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Allocated buffer size in bytes (terminator included), always a
    /// multiple of 16, or 0 when no buffer exists.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ensures room for at least `n` content bytes.
    pub fn reserve(&mut self, n: usize) {
        if n > 0 {
            self.resize_buffer(n + 1);
        }
    }

    /// Fallible [`reserve`](ByteString::reserve), surfacing allocator
    /// exhaustion instead of treating it as fatal.
    pub fn try_reserve(&mut self, n: usize) -> Result<(), AllocError> {
        if n > 0 {
            self.try_resize_buffer(n + 1)?;
        }
        Ok(())
    }

    /// Resizes the logical contents to `n` bytes.
    ///
    /// Shrinking truncates in place without deallocating; growing fills the
    /// new tail with `fill`.
    pub fn resize(&mut self, n: usize, fill: u8) {
        match n.cmp(&self.length) {
            Ordering::Less => {
                // A buffer exists because length > n >= 0.
                unsafe {
                    // SAFETY: n < length < capacity.
                    self.ptr().add(n).write(0);
                }
                self.length = n;
            }
            Ordering::Equal => {}
            Ordering::Greater => {
                self.resize_buffer(n + 1);
                unsafe {
                    // SAFETY: capacity >= n + 1 after the resize above.
                    let p = self.ptr();
                    p.add(self.length).write_bytes(fill, n - self.length);
                    p.add(n).write(0);
                }
                self.length = n;
            }
        }
    }

    /// Zeroes the contents and sets the length to 0, keeping the buffer.
    pub fn clear(&mut self) {
        if let Some(p) = self.buf {
            unsafe {
                // SAFETY: length < capacity.
                p.as_ptr().write_bytes(0, self.length);
            }
            self.length = 0;
        }
    }

    /// Releases the buffer entirely; length and capacity return to 0.
    pub fn reset(&mut self) {
        self.resize_buffer(0);
    }

    // -------------------------------------------------------------------------
    // Element access
    // -------------------------------------------------------------------------

    /// Byte at `pos`, or 0 for out-of-range positions (the shared-NUL
    /// silent policy; use [`get`](ByteString::get) to distinguish).
    #[inline]
    pub fn at(&self, pos: usize) -> u8 {
        self[pos]
    }

    /// Byte at `pos`, if in range.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<u8> {
        self.as_bytes().get(pos).copied()
    }

    /// Mutable byte at `pos`, if in range.
    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut u8> {
        self.as_mut_bytes().get_mut(pos)
    }

    /// The contents as a slice, terminator excluded.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self.buf {
            Some(p) => unsafe {
                // SAFETY: `length` initialized bytes live at `p`.
                slice::from_raw_parts(p.as_ptr(), self.length)
            },
            None => &[],
        }
    }

    /// The contents as a mutable slice, terminator excluded.
    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        match self.buf {
            Some(p) => unsafe {
                // SAFETY: `length` initialized bytes live at `p`, exclusively
                // borrowed through `self`.
                slice::from_raw_parts_mut(p.as_ptr(), self.length)
            },
            None => &mut [],
        }
    }

    /// The contents including the NUL terminator; the shared zero byte for
    /// a buffer-less string.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        match self.buf {
            Some(p) => unsafe {
                // SAFETY: the terminator at `length` is always present.
                slice::from_raw_parts(p.as_ptr(), self.length + 1)
            },
            None => slice::from_ref(&NUL),
        }
    }

    // -------------------------------------------------------------------------
    // Modifiers
    // -------------------------------------------------------------------------

    /// Appends one byte.
    pub fn push(&mut self, byte: u8) {
        self.resize_buffer(self.length + 2);
        unsafe {
            // SAFETY: capacity >= length + 2.
            let p = self.ptr();
            p.add(self.length).write(byte);
            p.add(self.length + 1).write(0);
        }
        self.length += 1;
    }

    /// Appends a byte slice.
    pub fn push_bytes(&mut self, src: &[u8]) {
        if src.is_empty() {
            return;
        }
        self.resize_buffer(self.length + src.len() + 1);
        unsafe {
            // SAFETY: capacity >= length + src.len() + 1; `src` cannot alias
            // the buffer (it is exclusively borrowed through `self`).
            let p = self.ptr();
            ptr::copy_nonoverlapping(src.as_ptr(), p.add(self.length), src.len());
            p.add(self.length + src.len()).write(0);
        }
        self.length += src.len();
    }

    /// Appends at most the first `n` bytes of `src`.
    pub fn append_bytes_n(&mut self, src: &[u8], n: usize) {
        self.push_bytes(&src[..n.min(src.len())]);
    }

    /// Appends the full contents of `other`.
    pub fn push_byte_string<B: BlockAlloc>(&mut self, other: &ByteString<B>) {
        self.push_bytes(other.as_bytes());
    }

    /// Appends `n` copies of `byte`.
    pub fn append_n(&mut self, n: usize, byte: u8) {
        if n == 0 {
            return;
        }
        self.resize_buffer(self.length + n + 1);
        unsafe {
            // SAFETY: capacity >= length + n + 1.
            let p = self.ptr();
            p.add(self.length).write_bytes(byte, n);
            p.add(self.length + n).write(0);
        }
        self.length += n;
    }

    /// Appends a sub-range `[subpos, subpos + sublen)` of `other`, clamped to
    /// `other`'s bounds. Out-of-range `subpos` appends nothing.
    pub fn append_sub(&mut self, other: &Self, subpos: usize, sublen: usize) {
        if subpos >= other.length {
            return;
        }
        let sublen = sublen.min(other.length - subpos);
        // Borrow rules make `other` distinct from `self`, so the source
        // slice stays valid across the growth inside push_bytes.
        let src = &other.as_bytes()[subpos..subpos + sublen];
        self.push_bytes(src);
    }

    /// Replaces the contents with a copy of `src`, reusing capacity.
    pub fn assign_bytes(&mut self, src: &[u8]) {
        self.length = 0;
        self.push_bytes(src);
        if let Some(p) = self.buf {
            unsafe {
                // SAFETY: length < capacity.
                p.as_ptr().add(self.length).write(0);
            }
        }
    }

    /// Replaces the contents with `n` copies of `byte`.
    pub fn assign_n(&mut self, n: usize, byte: u8) {
        self.length = 0;
        self.append_n(n, byte);
        if let Some(p) = self.buf {
            unsafe {
                // SAFETY: length < capacity.
                p.as_ptr().add(self.length).write(0);
            }
        }
    }

    /// Inserts `src` before position `pos` (clamped to the length), shifting
    /// the tail with an overlap-safe move.
    pub fn insert(&mut self, pos: usize, src: &[u8]) {
        if src.is_empty() {
            return;
        }
        let pos = pos.min(self.length);
        self.resize_buffer(self.length + src.len() + 1);
        unsafe {
            // SAFETY: capacity >= length + src.len() + 1; the tail move is
            // within the buffer and overlap-safe (ptr::copy).
            let p = self.ptr();
            ptr::copy(p.add(pos), p.add(pos + src.len()), self.length - pos + 1);
            ptr::copy_nonoverlapping(src.as_ptr(), p.add(pos), src.len());
        }
        self.length += src.len();
    }

    /// Inserts `n` copies of `byte` before position `pos` (clamped).
    pub fn insert_n(&mut self, pos: usize, n: usize, byte: u8) {
        if n == 0 {
            return;
        }
        let pos = pos.min(self.length);
        self.resize_buffer(self.length + n + 1);
        unsafe {
            // SAFETY: as in insert().
            let p = self.ptr();
            ptr::copy(p.add(pos), p.add(pos + n), self.length - pos + 1);
            p.add(pos).write_bytes(byte, n);
        }
        self.length += n;
    }

    /// Removes `n` bytes starting at `pos`, both clamped; `erase(pos, 0)`
    /// and erasing past the end are no-ops.
    pub fn erase(&mut self, pos: usize, n: usize) {
        if pos >= self.length {
            return;
        }
        let n = n.min(self.length - pos);
        if n == 0 {
            return;
        }
        unsafe {
            // SAFETY: the move stays inside the buffer (terminator
            // included) and is overlap-safe.
            let p = self.ptr();
            ptr::copy(p.add(pos + n), p.add(pos), self.length - pos - n + 1);
        }
        self.length -= n;
    }

    /// Exchanges contents with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    fn ptr(&self) -> *mut u8 {
        match self.buf {
            Some(p) => p.as_ptr(),
            // Callers only reach this after resize_buffer(size > 0).
            None => unreachable!("ByteString buffer not allocated"),
        }
    }

    /// Ensures the buffer holds at least `size` bytes (terminator included),
    /// or releases it for `size == 0`.
    ///
    /// The requested size is rounded up to the next multiple of 16; existing
    /// capacity is never reduced. Growth allocates a zero-filled block,
    /// copies the contents plus terminator over and releases the old block,
    /// invalidating any raw pointers into it.
    fn try_resize_buffer(&mut self, size: usize) -> Result<(), AllocError> {
        if size == 0 {
            self.length = 0;
            if let Some(p) = self.buf.take() {
                unsafe {
                    // SAFETY: `p` was allocated by `self.alloc` with
                    // exactly `capacity` bytes.
                    self.alloc.release(p, BlockLayout::bytes(self.capacity));
                }
                self.capacity = 0;
            }
            return Ok(());
        }

        let size = round_up(size);
        if self.buf.is_some() && size <= self.capacity {
            return Ok(());
        }

        let new = self
            .alloc
            .allocate(BlockLayout::bytes(size), AllocFlags::CLEAR)?;
        if let Some(old) = self.buf.take() {
            unsafe {
                // SAFETY: both blocks are live; length + 1 <= old capacity
                // <= new size.
                ptr::copy_nonoverlapping(old.as_ptr(), new.as_ptr(), self.length + 1);
                self.alloc.release(old, BlockLayout::bytes(self.capacity));
            }
        }
        self.buf = Some(new);
        self.capacity = size;
        Ok(())
    }

    fn resize_buffer(&mut self, size: usize) {
        if self.try_resize_buffer(size).is_err() {
            let layout = Layout::from_size_align(round_up(size), 1)
                .unwrap_or(Layout::new::<u8>());
            alloc::alloc::handle_alloc_error(layout);
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Copies the sub-range `[pos, pos + len)`, clamped to this string's
    /// bounds; `pos` past the end yields an empty string.
    pub fn substr(&self, pos: usize, len: usize) -> Self
    where
        A: Clone,
    {
        let mut out = Self::new_in(self.alloc.clone());
        if pos < self.length {
            let len = len.min(self.length - pos);
            out.push_bytes(&self.as_bytes()[pos..pos + len]);
        }
        out
    }

    /// Concatenation into a fresh string sharing this string's allocator.
    pub fn concat(&self, other: &Self) -> Self
    where
        A: Clone,
    {
        let mut out = Self::new_in(self.alloc.clone());
        out.reserve(self.length + other.length);
        out.push_bytes(self.as_bytes());
        out.push_bytes(other.as_bytes());
        out
    }
}

impl<A: BlockAlloc> Drop for ByteString<A> {
    fn drop(&mut self) {
        if let Some(p) = self.buf.take() {
            unsafe {
                // SAFETY: `p` was allocated by `self.alloc` with exactly
                // `capacity` bytes.
                self.alloc.release(p, BlockLayout::bytes(self.capacity));
            }
        }
    }
}

impl<A: BlockAlloc + Default> Default for ByteString<A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<A: BlockAlloc + Clone> Clone for ByteString<A> {
    fn clone(&self) -> Self {
        self.substr(0, self.length)
    }
}

impl FromIterator<u8> for ByteString {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl<A: BlockAlloc> Extend<u8> for ByteString<A> {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.reserve(self.length.saturating_add(low));
        for byte in iter {
            self.push(byte);
        }
    }
}

impl From<&str> for ByteString {
    fn from(src: &str) -> Self {
        Self::from_bytes(src.as_bytes())
    }
}

impl From<&[u8]> for ByteString {
    fn from(src: &[u8]) -> Self {
        Self::from_bytes(src)
    }
}

impl<A: BlockAlloc> Deref for ByteString<A> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: BlockAlloc> DerefMut for ByteString<A> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_bytes()
    }
}

impl<A: BlockAlloc> core::ops::Index<usize> for ByteString<A> {
    type Output = u8;

    fn index(&self, pos: usize) -> &u8 {
        self.as_bytes().get(pos).unwrap_or(&NUL)
    }
}

impl<A: BlockAlloc> core::ops::AddAssign<&[u8]> for ByteString<A> {
    fn add_assign(&mut self, rhs: &[u8]) {
        self.push_bytes(rhs);
    }
}

impl<A: BlockAlloc> core::ops::AddAssign<&str> for ByteString<A> {
    fn add_assign(&mut self, rhs: &str) {
        self.push_bytes(rhs.as_bytes());
    }
}

impl<A: BlockAlloc> core::ops::AddAssign<u8> for ByteString<A> {
    fn add_assign(&mut self, rhs: u8) {
        self.push(rhs);
    }
}

impl<A: BlockAlloc, B: BlockAlloc> core::ops::AddAssign<&ByteString<B>> for ByteString<A> {
    fn add_assign(&mut self, rhs: &ByteString<B>) {
        self.push_bytes(rhs.as_bytes());
    }
}

/// Byte-wise comparison with NUL-terminated-string semantics: an embedded
/// NUL truncates the comparison, exactly as a C string comparator would.
fn c_order(a: &[u8], b: &[u8]) -> Ordering {
    truncate_at_nul(a).cmp(truncate_at_nul(b))
}

fn truncate_at_nul(s: &[u8]) -> &[u8] {
    match s.iter().position(|&b| b == 0) {
        Some(i) => &s[..i],
        None => s,
    }
}

impl<A: BlockAlloc, B: BlockAlloc> PartialEq<ByteString<B>> for ByteString<A> {
    fn eq(&self, other: &ByteString<B>) -> bool {
        c_order(self.as_bytes(), other.as_bytes()) == Ordering::Equal
    }
}

impl<A: BlockAlloc> Eq for ByteString<A> {}

impl<A: BlockAlloc> PartialEq<&str> for ByteString<A> {
    fn eq(&self, other: &&str) -> bool {
        c_order(self.as_bytes(), other.as_bytes()) == Ordering::Equal
    }
}

impl<A: BlockAlloc> PartialEq<&[u8]> for ByteString<A> {
    fn eq(&self, other: &&[u8]) -> bool {
        c_order(self.as_bytes(), other) == Ordering::Equal
    }
}

impl<A: BlockAlloc, B: BlockAlloc> PartialOrd<ByteString<B>> for ByteString<A> {
    fn partial_cmp(&self, other: &ByteString<B>) -> Option<Ordering> {
        Some(c_order(self.as_bytes(), other.as_bytes()))
    }
}

impl<A: BlockAlloc> Ord for ByteString<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        c_order(self.as_bytes(), other.as_bytes())
    }
}

impl<A: BlockAlloc> PartialOrd<&str> for ByteString<A> {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        Some(c_order(self.as_bytes(), other.as_bytes()))
    }
}

impl<A: BlockAlloc> fmt::Display for ByteString<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl<A: BlockAlloc> fmt::Debug for ByteString<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteString({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}
