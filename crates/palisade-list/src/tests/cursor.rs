// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use palisade_test_utils::ProbeAlloc;

use crate::List;

fn collected<T: Clone>(list: &List<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

// =============================================================================
// movement and index()
// =============================================================================

#[test]
fn test_moves_clamp_at_the_ends() {
    let mut list: List<i32> = [1, 2, 3].into_iter().collect();
    let mut c = list.cursor_front_mut();
    assert_eq!(c.index(), 0);
    assert_eq!(c.current(), Some(&mut 1));

    // Already at the front: no-op.
    c.move_prev();
    assert_eq!(c.index(), 0);

    c.move_next();
    c.move_next();
    assert_eq!(c.current(), Some(&mut 3));
    assert_eq!(c.index(), 2);

    // Onto the end position, then clamped there.
    c.move_next();
    assert!(c.current().is_none());
    assert_eq!(c.index(), 3);
    c.move_next();
    assert_eq!(c.index(), 3);

    // Back from the end position lands on the last element.
    c.move_prev();
    assert_eq!(c.current(), Some(&mut 3));
    assert_eq!(c.index(), 2);
}

#[test]
fn test_cursor_on_empty_list() {
    let mut list: List<i32> = List::new();
    let mut c = list.cursor_front_mut();
    assert!(c.current().is_none());
    assert_eq!(c.index(), 0);
    c.move_next();
    c.move_prev();
    assert!(c.current().is_none());
    assert_eq!(c.index(), 0);
    assert_eq!(c.remove_current(), None);
}

// =============================================================================
// insert_before(), insert_before_n()
// =============================================================================

#[test]
fn test_insert_before_keeps_cursor_element() {
    let mut list: List<i32> = [1, 3].into_iter().collect();
    let mut c = list.cursor_front_mut();
    c.move_next();
    c.insert_before(2);
    assert_eq!(c.current(), Some(&mut 3));
    assert_eq!(c.index(), 2);
    assert_eq!(collected(&list), [1, 2, 3]);
}

#[test]
fn test_insert_before_at_end_appends() {
    let mut list: List<i32> = [1].into_iter().collect();
    let mut c = list.cursor_front_mut();
    c.move_next();
    c.insert_before(2);
    c.insert_before(3);
    assert!(c.current().is_none());
    assert_eq!(collected(&list), [1, 2, 3]);
}

#[test]
fn test_insert_before_on_empty_list() {
    let mut list: List<i32> = List::new();
    let mut c = list.cursor_front_mut();
    c.insert_before(1);
    assert_eq!(c.index(), 1);
    assert!(c.current().is_none());
    assert_eq!(collected(&list), [1]);
}

#[test]
fn test_insert_before_n_at_front() {
    let mut list: List<i32> = List::repeat(11, 0);
    let mut c = list.cursor_front_mut();
    c.insert_before_n(10, 100);
    assert_eq!(c.current(), Some(&mut 0));
    assert_eq!(c.index(), 10);
    drop(c);
    assert_eq!(list.len(), 21);
    assert_eq!(list.iter().take(10).filter(|&&v| v == 100).count(), 10);
    assert_eq!(list.front(), Some(&100));
}

// =============================================================================
// remove_current(), remove_n()
// =============================================================================

#[test]
fn test_remove_current_advances() {
    let mut list: List<i32> = [1, 2, 3].into_iter().collect();
    let mut c = list.cursor_front_mut();
    c.move_next();
    assert_eq!(c.remove_current(), Some(2));
    assert_eq!(c.current(), Some(&mut 3));
    assert_eq!(c.index(), 1);
    assert_eq!(collected(&list), [1, 3]);
}

#[test]
fn test_remove_current_at_tail_lands_on_end() {
    let mut list: List<i32> = [1, 2].into_iter().collect();
    let mut c = list.cursor_front_mut();
    c.move_next();
    assert_eq!(c.remove_current(), Some(2));
    assert!(c.current().is_none());
    assert_eq!(c.index(), 1);
    assert_eq!(c.remove_current(), None);
    drop(c);
    assert_eq!(list.back(), Some(&1));
}

#[test]
fn test_erase_while_iterating() {
    // The classic filter loop: remove odd values in a single pass.
    let mut list: List<i32> = [15, 36, 17, 20, 39].into_iter().collect();
    let mut c = list.cursor_front_mut();
    while let Some(&mut v) = c.current() {
        if v % 2 != 0 {
            c.remove_current();
        } else {
            c.move_next();
        }
    }
    assert_eq!(collected(&list), [36, 20]);
}

#[test]
fn test_remove_n_stops_at_the_end() {
    let mut list: List<i32> = [1, 2, 3, 4, 5].into_iter().collect();
    let mut c = list.cursor_front_mut();
    c.move_next();
    c.remove_n(2);
    assert_eq!(c.current(), Some(&mut 4));
    drop(c);
    assert_eq!(collected(&list), [1, 4, 5]);

    let mut c = list.cursor_front_mut();
    c.remove_n(100);
    assert!(c.current().is_none());
    assert_eq!(c.index(), 0);
    drop(c);
    assert!(list.is_empty());
}

// =============================================================================
// splice_before(), splice_range_before()
// =============================================================================

#[test]
fn test_splice_before_moves_whole_list() {
    let mut list: List<i32> = [1, 5].into_iter().collect();
    let mut other: List<i32> = [2, 3, 4].into_iter().collect();
    let mut c = list.cursor_front_mut();
    c.move_next();
    c.splice_before(&mut other);
    assert_eq!(c.current(), Some(&mut 5));
    assert_eq!(c.index(), 4);
    drop(c);
    assert_eq!(collected(&list), [1, 2, 3, 4, 5]);
    assert_eq!(list.len(), 5);
    assert!(other.is_empty());
    assert_eq!(other.len(), 0);
}

#[test]
fn test_splice_before_relinks_without_allocating() {
    let probe = ProbeAlloc::new();
    let mut list: List<i32, ProbeAlloc> = List::new_in(probe.clone());
    list.extend([1, 2]);
    let mut other: List<i32, ProbeAlloc> = List::new_in(probe.clone());
    other.extend([3, 4]);
    let allocs = probe.allocations();

    let mut c = list.cursor_front_mut();
    c.splice_before(&mut other);
    drop(c);

    assert_eq!(probe.allocations(), allocs);
    assert_eq!(probe.releases(), 0);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [3, 4, 1, 2]);
}

#[test]
fn test_splice_before_into_empty_list() {
    let mut list: List<i32> = List::new();
    let mut other: List<i32> = [1, 2].into_iter().collect();
    let mut c = list.cursor_front_mut();
    c.splice_before(&mut other);
    assert_eq!(c.index(), 2);
    drop(c);
    assert_eq!(collected(&list), [1, 2]);
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&2));
}

#[test]
fn test_splice_range_before() {
    let mut list: List<i32> = [1, 5].into_iter().collect();
    let mut other: List<i32> = [10, 2, 3, 4, 11].into_iter().collect();
    let mut c = list.cursor_front_mut();
    c.move_next();
    c.splice_range_before(&mut other, 1, 4);
    drop(c);
    assert_eq!(collected(&list), [1, 2, 3, 4, 5]);
    assert_eq!(collected(&other), [10, 11]);
    assert_eq!(list.len(), 5);
    assert_eq!(other.len(), 2);
}

#[test]
fn test_splice_range_before_clamps() {
    let mut list: List<i32> = [1].into_iter().collect();
    let mut other: List<i32> = [2, 3].into_iter().collect();

    let mut c = list.cursor_front_mut();
    // Start past the end: no-op.
    c.splice_range_before(&mut other, 5, 7);
    // Empty range: no-op.
    c.splice_range_before(&mut other, 1, 1);
    // End clamps to other's length.
    c.splice_range_before(&mut other, 1, 100);
    drop(c);
    assert_eq!(collected(&list), [3, 1]);
    assert_eq!(collected(&other), [2]);
}

#[test]
fn test_splice_range_before_whole_other() {
    let mut list: List<i32> = [9].into_iter().collect();
    let mut other: List<i32> = [1, 2, 3].into_iter().collect();
    let mut c = list.cursor_front_mut();
    c.splice_range_before(&mut other, 0, 3);
    drop(c);
    assert_eq!(collected(&list), [1, 2, 3, 9]);
    assert!(other.is_empty());
    assert!(other.front().is_none());
}
