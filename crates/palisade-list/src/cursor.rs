// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ptr::null_mut;

use palisade_alloc::BlockAlloc;

use crate::list::{List, Node};

/// A mutable position inside a [`List`].
///
/// The cursor sits either on an element or at the *end position* one past
/// the last element ([`current`](CursorMut::current) answers `None` there).
/// [`index`](CursorMut::index) is the element offset, `len()` at the end
/// position.
///
/// Movement is clamped: stepping past the end position or before the first
/// element is a no-op, never an error. All insertions happen *before* the
/// cursor, so inserting at the end position appends and inserting while
/// walking keeps the cursor on its element.
pub struct CursorMut<'a, T, A: BlockAlloc> {
    list: &'a mut List<T, A>,
    cur: *mut Node<T>,
    index: usize,
}

impl<'a, T, A: BlockAlloc> CursorMut<'a, T, A> {
    pub(crate) fn at_front(list: &'a mut List<T, A>) -> Self {
        let cur = list.head;
        Self {
            list,
            cur,
            index: 0,
        }
    }

    /// Element offset of the cursor; equals `len()` at the end position.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The element under the cursor, or `None` at the end position.
    pub fn current(&mut self) -> Option<&mut T> {
        // SAFETY: `cur` is null or a live node of the borrowed list.
        unsafe { self.cur.as_mut().map(|n| &mut n.value) }
    }

    /// Steps toward the back; stepping past the end position is a no-op.
    pub fn move_next(&mut self) {
        if self.cur.is_null() {
            return;
        }
        // SAFETY: `cur` is a live node.
        self.cur = unsafe { (*self.cur).next };
        self.index += 1;
    }

    /// Steps toward the front; stepping before the first element is a
    /// no-op. From the end position this lands on the last element.
    pub fn move_prev(&mut self) {
        if self.cur.is_null() {
            if !self.list.tail.is_null() {
                self.cur = self.list.tail;
                self.index = self.list.len - 1;
            }
            return;
        }
        // SAFETY: `cur` is a live node.
        let prev = unsafe { (*self.cur).prev };
        if !prev.is_null() {
            self.cur = prev;
            self.index -= 1;
        }
    }

    /// Inserts `value` before the cursor. The cursor keeps its element (its
    /// offset grows by one); at the end position this appends.
    pub fn insert_before(&mut self, value: T) {
        let node = self.list.new_node(value);
        // SAFETY: `node` is fresh and unlinked; `cur` is null or a node of
        // the borrowed list.
        unsafe { self.list.link_before(self.cur, node) };
        self.index += 1;
    }

    /// Inserts `n` clones of `value` before the cursor.
    pub fn insert_before_n(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        for _ in 0..n {
            self.insert_before(value.clone());
        }
    }

    /// Removes and returns the element under the cursor, which advances to
    /// the following element (or the end position). `None` at the end
    /// position.
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.cur;
        if node.is_null() {
            return None;
        }
        // SAFETY: `node` is a live node of the borrowed list; the successor
        // is read before the unlink.
        unsafe {
            self.cur = (*node).next;
            self.list.unlink(node);
            Some(self.list.free_node(node))
        }
    }

    /// Removes up to `n` elements starting at the cursor, stopping at the
    /// end. The cursor finishes on the element after the removed range.
    pub fn remove_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.remove_current().is_none() {
                break;
            }
        }
    }

    /// Moves all of `other`'s nodes before the cursor in O(1), preserving
    /// their order. `other` is left empty; no element is copied or moved in
    /// memory.
    pub fn splice_before(&mut self, other: &mut List<T, A>) {
        if other.is_empty() {
            return;
        }
        let (head, tail, count) = other.take_all();
        // SAFETY: the chain came whole out of `other` and is disjoint from
        // the borrowed list.
        unsafe { self.list.splice_chain_before(self.cur, head, tail, count) };
        self.index += count;
    }

    /// Moves the index range `[start, end)` of `other` before the cursor,
    /// clamped to `other`'s bounds. O(k) in the range length, relinking
    /// only.
    pub fn splice_range_before(&mut self, other: &mut List<T, A>, start: usize, end: usize) {
        if start >= other.len() || start >= end {
            return;
        }
        let count = end.min(other.len()) - start;
        let (head, tail) = other.cut_range(start, count);
        // SAFETY: the chain was just detached from `other` and is disjoint
        // from the borrowed list.
        unsafe { self.list.splice_chain_before(self.cur, head, tail, count) };
        self.index += count;
    }
}

impl<T, A: BlockAlloc> List<T, A> {
    /// Empties the list, answering its chain as (head, tail, len).
    fn take_all(&mut self) -> (*mut Node<T>, *mut Node<T>, usize) {
        let out = (self.head, self.tail, self.len);
        self.head = null_mut();
        self.tail = null_mut();
        self.len = 0;
        out
    }

    /// Detaches the `count`-node chain starting at index `start`.
    /// Caller guarantees `start + count <= len` and `count > 0`.
    fn cut_range(&mut self, start: usize, count: usize) -> (*mut Node<T>, *mut Node<T>) {
        // SAFETY: the walk stays within the list per the caller's bounds;
        // all four boundary links are rewritten consistently.
        unsafe {
            let mut head = self.head;
            for _ in 0..start {
                head = (*head).next;
            }
            let mut tail = head;
            for _ in 1..count {
                tail = (*tail).next;
            }

            let before = (*head).prev;
            let after = (*tail).next;
            if before.is_null() {
                self.head = after;
            } else {
                (*before).next = after;
            }
            if after.is_null() {
                self.tail = before;
            } else {
                (*after).prev = before;
            }
            (*head).prev = null_mut();
            (*tail).next = null_mut();
            self.len -= count;
            (head, tail)
        }
    }
}
