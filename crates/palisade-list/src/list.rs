// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull, null_mut};

use palisade_alloc::{AllocFlags, BlockAlloc, BlockLayout, SystemAlloc};

use crate::cursor::CursorMut;
use crate::iter::{IntoIter, Iter, IterMut};

pub(crate) struct Node<T> {
    pub(crate) next: *mut Node<T>,
    pub(crate) prev: *mut Node<T>,
    pub(crate) value: T,
}

/// A doubly linked list whose nodes are individual blocks from `A`.
///
/// `head` and `tail` are both null exactly when the list is empty; there is
/// no sentinel node, so an empty list owns nothing and construction never
/// allocates.
///
/// Structural operations (`splice_before`, [`merge`](List::merge),
/// [`sort`](List::sort), [`split_off`](List::split_off)) relink nodes and
/// never move or copy element values, so element addresses are stable for
/// the node's lifetime.
///
/// Lists exchanging nodes (splice, merge, `split_off`) must use compatible
/// allocators: a node is released through the allocator of the list that
/// finally drops it. Clones of a shared strategy such as
/// `GuardAlloc` satisfy this.
pub struct List<T, A: BlockAlloc = SystemAlloc> {
    pub(crate) head: *mut Node<T>,
    pub(crate) tail: *mut Node<T>,
    pub(crate) len: usize,
    pub(crate) alloc: A,
    marker: PhantomData<T>,
}

// SAFETY: nodes are exclusively owned by the list; no shared mutable state
// beyond what T and A themselves carry.
unsafe impl<T: Send, A: BlockAlloc + Send> Send for List<T, A> {}
// SAFETY: shared access only reads through the node pointers.
unsafe impl<T: Sync, A: BlockAlloc + Sync> Sync for List<T, A> {}

impl<T> List<T> {
    /// Creates an empty list. Nothing is allocated.
    pub fn new() -> Self {
        Self::new_in(SystemAlloc)
    }

    /// Creates a list of `n` clones of `value`.
    pub fn repeat(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut list = Self::new();
        for _ in 0..n {
            list.push_back(value.clone());
        }
        list
    }
}

impl<T, A: BlockAlloc> List<T, A> {
    /// Creates an empty list that will allocate nodes through `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            head: null_mut(),
            tail: null_mut(),
            len: 0,
            alloc,
            marker: PhantomData,
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_null()
    }

    /// First element, if any.
    pub fn front(&self) -> Option<&T> {
        // SAFETY: head is either null or a live node.
        unsafe { self.head.as_ref().map(|n| &n.value) }
    }

    /// First element, mutably.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: head is either null or a live node, exclusively borrowed.
        unsafe { self.head.as_mut().map(|n| &mut n.value) }
    }

    /// Last element, if any.
    pub fn back(&self) -> Option<&T> {
        // SAFETY: tail is either null or a live node.
        unsafe { self.tail.as_ref().map(|n| &n.value) }
    }

    /// Last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: tail is either null or a live node, exclusively borrowed.
        unsafe { self.tail.as_mut().map(|n| &mut n.value) }
    }

    /// Prepends `value`.
    pub fn push_front(&mut self, value: T) {
        let node = self.new_node(value);
        let head = self.head;
        // SAFETY: `node` is fresh and unlinked; `head` is this list's front.
        unsafe { self.link_before(head, node) };
    }

    /// Appends `value`.
    pub fn push_back(&mut self, value: T) {
        let node = self.new_node(value);
        // SAFETY: `node` is fresh and unlinked; null targets the end
        // position.
        unsafe { self.link_before(null_mut(), node) };
    }

    /// Removes and returns the first element; `None` on an empty list.
    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.head;
        if node.is_null() {
            return None;
        }
        // SAFETY: `node` is a live node of this list.
        unsafe {
            self.unlink(node);
            Some(self.free_node(node))
        }
    }

    /// Removes and returns the last element; `None` on an empty list.
    pub fn pop_back(&mut self) -> Option<T> {
        let node = self.tail;
        if node.is_null() {
            return None;
        }
        // SAFETY: `node` is a live node of this list.
        unsafe {
            self.unlink(node);
            Some(self.free_node(node))
        }
    }

    /// Destroys all nodes. The list stays usable.
    pub fn clear(&mut self) {
        let mut cur = self.head;
        while !cur.is_null() {
            // SAFETY: walking the forward chain of live nodes; each node is
            // released exactly once.
            unsafe {
                let next = (*cur).next;
                drop(self.free_node(cur));
                cur = next;
            }
        }
        self.head = null_mut();
        self.tail = null_mut();
        self.len = 0;
    }

    /// Replaces the contents with `n` clones of `value`.
    pub fn assign(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        self.clear();
        for _ in 0..n {
            self.push_back(value.clone());
        }
    }

    /// Exchanges contents with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Borrowing forward iterator; reverse via [`Iterator::rev`].
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.head, self.tail, self.len)
    }

    /// Mutable counterpart of [`iter`](List::iter).
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.head, self.tail, self.len)
    }

    /// Mutable cursor starting at the first element (or at the end position
    /// of an empty list).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut::at_front(self)
    }

    // -------------------------------------------------------------------------
    // Structural operations
    // -------------------------------------------------------------------------

    /// Splits the list at `at`, returning the tail `[at, len)` as a new
    /// list. `at` past the end yields an empty list; `at == 0` moves
    /// everything out.
    pub fn split_off(&mut self, at: usize) -> Self
    where
        A: Clone,
    {
        if at >= self.len {
            return Self::new_in(self.alloc.clone());
        }
        if at == 0 {
            return mem::replace(self, Self::new_in(self.alloc.clone()));
        }
        // SAFETY: 0 < at < len, so the node walk stays on live nodes and
        // both halves end up non-empty and consistently terminated.
        unsafe {
            let mut node = self.head;
            for _ in 0..at {
                node = (*node).next;
            }
            let before = (*node).prev;
            (*before).next = null_mut();
            (*node).prev = null_mut();

            let tail = Self {
                head: node,
                tail: self.tail,
                len: self.len - at,
                alloc: self.alloc.clone(),
                marker: PhantomData,
            };
            self.tail = before;
            self.len = at;
            tail
        }
    }

    /// Removes every element equal to `value`.
    pub fn remove(&mut self, value: &T)
    where
        T: PartialEq,
    {
        self.remove_if(|v| v == value);
    }

    /// Removes every element for which `pred` answers true. The successor
    /// is saved before each unlink, so removal never skips an element.
    pub fn remove_if<F>(&mut self, mut pred: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cur = self.head;
        while !cur.is_null() {
            // SAFETY: `cur` is live; `next` is read before any unlink.
            unsafe {
                let next = (*cur).next;
                if pred(&(*cur).value) {
                    self.unlink(cur);
                    drop(self.free_node(cur));
                }
                cur = next;
            }
        }
    }

    /// Collapses adjacent runs of equal elements to their first occurrence.
    /// `[1, 1, 2, 2, 2, 3, 1]` becomes `[1, 2, 3, 1]`.
    pub fn unique(&mut self)
    where
        T: PartialEq,
    {
        let mut cur = self.head;
        while !cur.is_null() {
            // SAFETY: `cur` and `next` are live nodes; removing `next`
            // leaves `cur` linked, so the walk resumes from it.
            unsafe {
                let next = (*cur).next;
                if !next.is_null() && (*next).value == (*cur).value {
                    self.unlink(next);
                    drop(self.free_node(next));
                } else {
                    cur = next;
                }
            }
        }
    }

    /// Merges the (sorted) `other` into this (sorted) list, relinking nodes
    /// in ascending order. `other` is left empty.
    pub fn merge(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        self.merge_by(other, |a, b| a < b);
    }

    /// [`merge`](List::merge) under a user ordering: `less(a, b)` answers
    /// whether `a` sorts strictly before `b`.
    ///
    /// Stable: on ties, this list's elements precede `other`'s.
    pub fn merge_by<F>(&mut self, other: &mut Self, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.swap(other);
            return;
        }
        // SAFETY: both chains are non-empty, null-terminated and disjoint;
        // every node is relinked exactly once.
        unsafe {
            let mut a = self.head;
            let mut b = other.head;
            let a_tail = self.tail;
            let b_tail = other.tail;

            let mut head: *mut Node<T> = null_mut();
            let mut tail: *mut Node<T> = null_mut();
            while !a.is_null() && !b.is_null() {
                let take = if less(&(*b).value, &(*a).value) {
                    let n = b;
                    b = (*b).next;
                    n
                } else {
                    let n = a;
                    a = (*a).next;
                    n
                };
                if head.is_null() {
                    head = take;
                    (*take).prev = null_mut();
                } else {
                    (*tail).next = take;
                    (*take).prev = tail;
                }
                tail = take;
            }

            // Exactly one chain is exhausted; append the survivor whole.
            let (rest, rest_tail) = if a.is_null() { (b, b_tail) } else { (a, a_tail) };
            (*tail).next = rest;
            (*rest).prev = tail;
            (*rest_tail).next = null_mut();

            self.head = head;
            self.tail = rest_tail;
            self.len += other.len;
            other.head = null_mut();
            other.tail = null_mut();
            other.len = 0;
        }
    }

    /// Stable in-place merge sort, ascending.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(|a, b| a < b);
    }

    /// Stable in-place merge sort under a user ordering: `less(a, b)`
    /// answers whether `a` sorts strictly before `b`.
    ///
    /// Bottom-up over the forward links, relinking only; no node is
    /// allocated, copied or freed.
    pub fn sort_by<F>(&mut self, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        if self.len < 2 {
            return;
        }
        // SAFETY: runs are disjoint null-terminated sub-chains of this
        // list; each pass relinks every node exactly once and restores
        // head/tail terminators before the next pass reads them.
        unsafe {
            let mut width = 1;
            while width < self.len {
                let mut remaining = self.head;
                let mut new_head: *mut Node<T> = null_mut();
                let mut new_tail: *mut Node<T> = null_mut();

                while !remaining.is_null() {
                    let a = remaining;
                    let b = cut_run(a, width);
                    remaining = cut_run(b, width);
                    let (h, t) = merge_runs(a, b, &mut less);
                    if new_head.is_null() {
                        new_head = h;
                    } else {
                        (*new_tail).next = h;
                        (*h).prev = new_tail;
                    }
                    new_tail = t;
                }

                (*new_head).prev = null_mut();
                (*new_tail).next = null_mut();
                self.head = new_head;
                self.tail = new_tail;
                width *= 2;
            }
        }
    }

    /// Reverses element order in place by swapping every node's links.
    pub fn reverse(&mut self) {
        let mut cur = self.head;
        while !cur.is_null() {
            // SAFETY: walking live nodes; `next` is read before the swap.
            unsafe {
                let next = (*cur).next;
                (*cur).next = (*cur).prev;
                (*cur).prev = next;
                cur = next;
            }
        }
        mem::swap(&mut self.head, &mut self.tail);
    }

    // -------------------------------------------------------------------------
    // Node plumbing (shared with CursorMut)
    // -------------------------------------------------------------------------

    pub(crate) fn new_node(&self, value: T) -> *mut Node<T> {
        let node = match self
            .alloc
            .allocate(BlockLayout::single::<Node<T>>(), AllocFlags::ANY)
        {
            Ok(p) => p.as_ptr().cast::<Node<T>>(),
            Err(_) => alloc::alloc::handle_alloc_error(Layout::new::<Node<T>>()),
        };
        // SAFETY: `node` is a fresh, properly sized and aligned block.
        unsafe {
            node.write(Node {
                next: null_mut(),
                prev: null_mut(),
                value,
            });
        }
        node
    }

    /// Destroys `node` and returns its value.
    ///
    /// # Safety
    ///
    /// `node` must be a live, already unlinked node allocated by a
    /// compatible allocator, and must not be used afterwards.
    pub(crate) unsafe fn free_node(&self, node: *mut Node<T>) -> T {
        // SAFETY: per contract, `node` points to an initialized Node<T>
        // that no link structure references anymore.
        unsafe {
            let value = ptr::read(&(*node).value);
            self.alloc.release(
                NonNull::new_unchecked(node.cast::<u8>()),
                BlockLayout::single::<Node<T>>(),
            );
            value
        }
    }

    /// Links the unlinked `node` before `at`; a null `at` means the end
    /// position (append).
    ///
    /// # Safety
    ///
    /// `node` must be live and unlinked; `at` must be null or a node of
    /// this list.
    pub(crate) unsafe fn link_before(&mut self, at: *mut Node<T>, node: *mut Node<T>) {
        // SAFETY: per contract; every branch leaves head/tail and the
        // neighbor links consistent.
        unsafe {
            if at.is_null() {
                (*node).prev = self.tail;
                (*node).next = null_mut();
                if self.tail.is_null() {
                    self.head = node;
                } else {
                    (*self.tail).next = node;
                }
                self.tail = node;
            } else {
                let before = (*at).prev;
                (*node).next = at;
                (*node).prev = before;
                (*at).prev = node;
                if before.is_null() {
                    self.head = node;
                } else {
                    (*before).next = node;
                }
            }
        }
        self.len += 1;
    }

    /// Detaches `node` from the link structure without destroying it.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this list.
    pub(crate) unsafe fn unlink(&mut self, node: *mut Node<T>) {
        // SAFETY: per contract; neighbors (or head/tail) are repointed
        // around the node.
        unsafe {
            let prev = (*node).prev;
            let next = (*node).next;
            if prev.is_null() {
                self.head = next;
            } else {
                (*prev).next = next;
            }
            if next.is_null() {
                self.tail = prev;
            } else {
                (*next).prev = prev;
            }
        }
        self.len -= 1;
    }

    /// Links the detached chain `chain_head ..= chain_tail` (`count` nodes)
    /// before `at`; a null `at` means the end position.
    ///
    /// # Safety
    ///
    /// The chain must be non-empty, null-terminated on both sides and
    /// disjoint from this list; `at` must be null or a node of this list.
    pub(crate) unsafe fn splice_chain_before(
        &mut self,
        at: *mut Node<T>,
        chain_head: *mut Node<T>,
        chain_tail: *mut Node<T>,
        count: usize,
    ) {
        // SAFETY: per contract; the four boundary links are rewritten and
        // everything inside the chain is already consistent.
        unsafe {
            if at.is_null() {
                (*chain_head).prev = self.tail;
                if self.tail.is_null() {
                    self.head = chain_head;
                } else {
                    (*self.tail).next = chain_head;
                }
                self.tail = chain_tail;
            } else {
                let before = (*at).prev;
                (*chain_tail).next = at;
                (*at).prev = chain_tail;
                (*chain_head).prev = before;
                if before.is_null() {
                    self.head = chain_head;
                } else {
                    (*before).next = chain_head;
                }
            }
        }
        self.len += count;
    }
}

/// Detaches at most `n` nodes from the front of the null-terminated chain
/// `start` and returns the remainder's head (null when the chain ends).
///
/// # Safety
///
/// `start` must be null or head a null-terminated chain of live nodes.
unsafe fn cut_run<T>(start: *mut Node<T>, n: usize) -> *mut Node<T> {
    if start.is_null() {
        return null_mut();
    }
    // SAFETY: the walk stays on the chain and stops at its terminator.
    unsafe {
        let mut last = start;
        for _ in 1..n {
            let next = (*last).next;
            if next.is_null() {
                break;
            }
            last = next;
        }
        let rest = (*last).next;
        (*last).next = null_mut();
        if !rest.is_null() {
            (*rest).prev = null_mut();
        }
        rest
    }
}

/// Merges two null-terminated runs (either may be null) into one chain,
/// answering its head and tail. Stable: ties favor `a`.
///
/// # Safety
///
/// `a` and `b` must head disjoint null-terminated chains of live nodes,
/// with `a` non-null.
unsafe fn merge_runs<T, F>(
    a: *mut Node<T>,
    b: *mut Node<T>,
    less: &mut F,
) -> (*mut Node<T>, *mut Node<T>)
where
    F: FnMut(&T, &T) -> bool,
{
    // SAFETY: every node of both runs is visited and relinked exactly once.
    unsafe {
        let mut a = a;
        let mut b = b;
        let mut head: *mut Node<T> = null_mut();
        let mut tail: *mut Node<T> = null_mut();

        while !a.is_null() || !b.is_null() {
            let take = if a.is_null() {
                let n = b;
                b = (*b).next;
                n
            } else if b.is_null() || !less(&(*b).value, &(*a).value) {
                let n = a;
                a = (*a).next;
                n
            } else {
                let n = b;
                b = (*b).next;
                n
            };
            if head.is_null() {
                head = take;
                (*take).prev = null_mut();
            } else {
                (*tail).next = take;
                (*take).prev = tail;
            }
            tail = take;
        }
        (*tail).next = null_mut();
        (head, tail)
    }
}

impl<T, A: BlockAlloc> Drop for List<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, A: BlockAlloc + Default> Default for List<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: BlockAlloc + Clone> Clone for List<T, A> {
    fn clone(&self) -> Self {
        let mut out = Self::new_in(self.alloc.clone());
        out.extend(self.iter().cloned());
        out
    }
}

impl<T: Clone, A: BlockAlloc + Default> From<&[T]> for List<T, A> {
    fn from(slice: &[T]) -> Self {
        slice.iter().cloned().collect()
    }
}

impl<T, A: BlockAlloc + Default> FromIterator<T> for List<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new_in(A::default());
        list.extend(iter);
        list
    }
}

impl<T, A: BlockAlloc> Extend<T> for List<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T, A: BlockAlloc> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: BlockAlloc> IntoIterator for &'a mut List<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, A: BlockAlloc> IntoIterator for List<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self)
    }
}

impl<T: PartialEq, A: BlockAlloc, B: BlockAlloc> PartialEq<List<T, B>> for List<T, A> {
    fn eq(&self, other: &List<T, B>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: BlockAlloc> Eq for List<T, A> {}

impl<T: fmt::Debug, A: BlockAlloc> fmt::Debug for List<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
