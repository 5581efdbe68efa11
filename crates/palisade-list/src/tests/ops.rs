// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::List;

fn collected<T: Clone>(list: &List<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

// =============================================================================
// remove(), remove_if()
// =============================================================================

#[test]
fn test_remove_all_equal() {
    let mut list: List<i32> = [1, 2, 1, 3, 1].into_iter().collect();
    list.remove(&1);
    assert_eq!(collected(&list), [2, 3]);
    // Removing an absent value is a no-op.
    list.remove(&42);
    assert_eq!(collected(&list), [2, 3]);
}

#[test]
fn test_remove_if_keeps_even() {
    let mut list: List<i32> = [15, 36, 17, 20, 39].into_iter().collect();
    list.remove_if(|&v| v % 2 != 0);
    assert_eq!(collected(&list), [36, 20]);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_remove_if_everything() {
    let mut list: List<i32> = [1, 2, 3].into_iter().collect();
    list.remove_if(|_| true);
    assert!(list.is_empty());
    assert!(list.front().is_none());
    assert!(list.back().is_none());
}

// =============================================================================
// unique()
// =============================================================================

#[test]
fn test_unique_collapses_adjacent_runs() {
    let mut list: List<i32> = [1, 1, 2, 2, 2, 3, 1].into_iter().collect();
    list.unique();
    assert_eq!(collected(&list), [1, 2, 3, 1]);
}

#[test]
fn test_unique_edge_shapes() {
    let mut empty: List<i32> = List::new();
    empty.unique();
    assert!(empty.is_empty());

    let mut all_same: List<i32> = [5, 5, 5, 5].into_iter().collect();
    all_same.unique();
    assert_eq!(collected(&all_same), [5]);

    let mut distinct: List<i32> = [1, 2, 3].into_iter().collect();
    distinct.unique();
    assert_eq!(collected(&distinct), [1, 2, 3]);
}

// =============================================================================
// merge(), merge_by()
// =============================================================================

#[test]
fn test_merge_interleaves_sorted_lists() {
    let mut a: List<i32> = [1, 3, 5, 9].into_iter().collect();
    let mut b: List<i32> = [2, 3, 4].into_iter().collect();
    a.merge(&mut b);
    assert_eq!(collected(&a), [1, 2, 3, 3, 4, 5, 9]);
    assert!(b.is_empty());
    assert_eq!(a.len(), 7);
    assert_eq!(a.back(), Some(&9));
}

#[test]
fn test_merge_into_empty_and_from_empty() {
    let mut a: List<i32> = List::new();
    let mut b: List<i32> = [1, 2].into_iter().collect();
    a.merge(&mut b);
    assert_eq!(collected(&a), [1, 2]);
    assert!(b.is_empty());

    let mut c: List<i32> = List::new();
    a.merge(&mut c);
    assert_eq!(collected(&a), [1, 2]);
}

#[test]
fn test_merge_is_stable() {
    // Equal keys keep self's elements first; the payload tells them apart.
    let mut a: List<(i32, &str)> = [(1, "a"), (2, "a")].into_iter().collect();
    let mut b: List<(i32, &str)> = [(1, "b"), (2, "b")].into_iter().collect();
    a.merge_by(&mut b, |x, y| x.0 < y.0);
    assert_eq!(
        collected(&a),
        [(1, "a"), (1, "b"), (2, "a"), (2, "b")]
    );
}

#[test]
fn test_merge_by_descending() {
    let mut a: List<i32> = [9, 5, 1].into_iter().collect();
    let mut b: List<i32> = [8, 2].into_iter().collect();
    a.merge_by(&mut b, |x, y| x > y);
    assert_eq!(collected(&a), [9, 8, 5, 2, 1]);
}

// =============================================================================
// sort(), sort_by()
// =============================================================================

#[test]
fn test_sort() {
    let mut list: List<i32> = [5, 1, 4, 1, 9, 2, 6, 5, 3].into_iter().collect();
    list.sort();
    assert_eq!(collected(&list), [1, 1, 2, 3, 4, 5, 5, 6, 9]);
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&9));
}

#[test]
fn test_sort_edge_shapes() {
    let mut empty: List<i32> = List::new();
    empty.sort();
    assert!(empty.is_empty());

    let mut one: List<i32> = [7].into_iter().collect();
    one.sort();
    assert_eq!(collected(&one), [7]);

    let mut sorted: List<i32> = (0..10).collect();
    sorted.sort();
    assert_eq!(collected(&sorted), (0..10).collect::<Vec<_>>());

    let mut reversed: List<i32> = (0..10).rev().collect();
    reversed.sort();
    assert_eq!(collected(&reversed), (0..10).collect::<Vec<_>>());
}

#[test]
fn test_sort_is_stable() {
    let mut list: List<(i32, usize)> =
        [(2, 0), (1, 1), (2, 2), (1, 3), (2, 4)].into_iter().collect();
    list.sort_by(|a, b| a.0 < b.0);
    assert_eq!(collected(&list), [(1, 1), (1, 3), (2, 0), (2, 2), (2, 4)]);
}

#[test]
fn test_sort_by_descending() {
    let mut list: List<i32> = [3, 1, 2].into_iter().collect();
    list.sort_by(|a, b| a > b);
    assert_eq!(collected(&list), [3, 2, 1]);
}

#[test]
fn test_sort_keeps_links_consistent() {
    let mut list: List<i32> = [4, 2, 7, 1, 9, 3].into_iter().collect();
    list.sort();
    // The reverse walk must see the same relinked chain.
    assert_eq!(
        list.iter().rev().copied().collect::<Vec<_>>(),
        [9, 7, 4, 3, 2, 1]
    );
}

// =============================================================================
// reverse()
// =============================================================================

#[test]
fn test_reverse() {
    let mut list: List<i32> = [1, 2, 3, 4].into_iter().collect();
    list.reverse();
    assert_eq!(collected(&list), [4, 3, 2, 1]);
    assert_eq!(list.front(), Some(&4));
    assert_eq!(list.back(), Some(&1));
    assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
}

#[test]
fn test_reverse_trivial() {
    let mut empty: List<i32> = List::new();
    empty.reverse();
    assert!(empty.is_empty());

    let mut one: List<i32> = [1].into_iter().collect();
    one.reverse();
    assert_eq!(collected(&one), [1]);
}
