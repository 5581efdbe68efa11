// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::marker::PhantomData;

use palisade_alloc::BlockAlloc;

use crate::list::{List, Node};

/// Borrowing iterator over a [`List`], both directions.
pub struct Iter<'a, T> {
    head: *mut Node<T>,
    tail: *mut Node<T>,
    remaining: usize,
    marker: PhantomData<&'a T>,
}

// SAFETY: yields &T only.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
// SAFETY: yields &T only.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(head: *mut Node<T>, tail: *mut Node<T>, len: usize) -> Self {
        Self {
            head,
            tail,
            remaining: len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: remaining > 0 guarantees `head` is a live node; the list
        // is borrowed for 'a and structurally frozen.
        unsafe {
            let node = &*self.head;
            self.head = node.next;
            self.remaining -= 1;
            Some(&node.value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: remaining > 0 guarantees `tail` is a live node past the
        // forward position.
        unsafe {
            let node = &*self.tail;
            self.tail = node.prev;
            self.remaining -= 1;
            Some(&node.value)
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

/// Mutable counterpart of [`Iter`].
pub struct IterMut<'a, T> {
    head: *mut Node<T>,
    tail: *mut Node<T>,
    remaining: usize,
    marker: PhantomData<&'a mut T>,
}

// SAFETY: yields &mut T; the elements themselves must be Send.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: shared access to the iterator cannot reach the elements.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(head: *mut Node<T>, tail: *mut Node<T>, len: usize) -> Self {
        Self {
            head,
            tail,
            remaining: len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: remaining > 0 guarantees `head` is live; each node is
        // yielded at most once, so the &mut references never alias.
        unsafe {
            let node = &mut *self.head;
            self.head = node.next;
            self.remaining -= 1;
            Some(&mut node.value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: as in next(), from the back.
        unsafe {
            let node = &mut *self.tail;
            self.tail = node.prev;
            self.remaining -= 1;
            Some(&mut node.value)
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator; drops unconsumed elements with the list.
pub struct IntoIter<T, A: BlockAlloc> {
    list: List<T, A>,
}

impl<T, A: BlockAlloc> IntoIter<T, A> {
    pub(crate) fn new(list: List<T, A>) -> Self {
        Self { list }
    }
}

impl<T, A: BlockAlloc> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A: BlockAlloc> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: BlockAlloc> ExactSizeIterator for IntoIter<T, A> {}
