// Copyright (c) 2026 Palisade contributors
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::List;

#[derive(Debug, Clone)]
enum Op {
    PushFront(i32),
    PushBack(i32),
    PopFront,
    PopBack,
    Reverse,
    Sort,
    Unique,
    RemoveIf(i32),
    SplitRotate(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::PushFront),
        any::<i32>().prop_map(Op::PushBack),
        Just(Op::PopFront),
        Just(Op::PopBack),
        Just(Op::Reverse),
        Just(Op::Sort),
        Just(Op::Unique),
        (1i32..5).prop_map(Op::RemoveIf),
        (0usize..48).prop_map(Op::SplitRotate),
    ]
}

fn apply(list: &mut List<i32>, model: &mut Vec<i32>, op: Op) {
    match op {
        Op::PushFront(v) => {
            list.push_front(v);
            model.insert(0, v);
        }
        Op::PushBack(v) => {
            list.push_back(v);
            model.push(v);
        }
        Op::PopFront => {
            let got = list.pop_front();
            let want = if model.is_empty() {
                None
            } else {
                Some(model.remove(0))
            };
            assert_eq!(got, want);
        }
        Op::PopBack => {
            assert_eq!(list.pop_back(), model.pop());
        }
        Op::Reverse => {
            list.reverse();
            model.reverse();
        }
        Op::Sort => {
            list.sort();
            model.sort();
        }
        Op::Unique => {
            list.unique();
            model.dedup();
        }
        Op::RemoveIf(divisor) => {
            list.remove_if(|v| v % divisor == 0);
            model.retain(|v| v % divisor != 0);
        }
        Op::SplitRotate(at) => {
            // Rotate through split_off + splice: the tail moves in front.
            let mut tail = list.split_off(at);
            let mut c = list.cursor_front_mut();
            c.splice_before(&mut tail);

            let at = at.min(model.len());
            let mut rotated: Vec<i32> = model.split_off(at);
            rotated.append(model);
            *model = rotated;
        }
    }
}

proptest! {
    // Random operation sequences keep the list element-for-element in step
    // with a Vec model, with the link structure consistent in both walk
    // directions.
    #[test]
    fn fuzzy_matches_vec_model(ops in proptest::collection::vec(op_strategy(), 0..48)) {
        let mut list: List<i32> = List::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            apply(&mut list, &mut model, op);

            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), model.clone());
            let mut backwards = list.iter().rev().copied().collect::<Vec<_>>();
            backwards.reverse();
            prop_assert_eq!(backwards, model.clone());
            prop_assert_eq!(list.front(), model.first());
            prop_assert_eq!(list.back(), model.last());
        }
    }
}
