//! Property-based invariant tests for `RangeQueryTree`.
//!
//! 1. Recursive queries agree with a brute-force reduction of the slice.
//! 2. The explicit-stack walk agrees with the recursive walk.
//! 3. A point update is visible in every range spanning it and in no other.
//! 4. Empty or out-of-bounds ranges are rejected, never answered.

use proptest::prelude::*;
use range_query_tree::{from_fn, Max, Min, RangeQueryError, RangeQueryTree, Sum};

// ── Helpers ─────────────────────────────────────────────────────────────

fn values_and_span() -> impl Strategy<Value = (Vec<i32>, usize, usize)> {
    prop::collection::vec(any::<i32>(), 1..200).prop_flat_map(|values| {
        let len = values.len();
        (Just(values), 0..len)
            .prop_flat_map(move |(values, start)| (Just(values), Just(start), (start + 1)..=len))
    })
}

fn values_and_index() -> impl Strategy<Value = (Vec<i64>, usize, i64)> {
    prop::collection::vec(-1_000i64..1_000, 1..100).prop_flat_map(|values| {
        let len = values.len();
        (Just(values), 0..len, -1_000i64..1_000)
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Brute-force agreement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn min_matches_brute_force((values, start, end) in values_and_span()) {
        let tree = RangeQueryTree::build(&values, Min);
        let expected = *values[start..end].iter().min().unwrap();

        prop_assert_eq!(tree.query(start, end), Ok(expected));
    }

    #[test]
    fn max_matches_brute_force((values, start, end) in values_and_span()) {
        let tree = RangeQueryTree::build(&values, Max);
        let expected = *values[start..end].iter().max().unwrap();

        prop_assert_eq!(tree.query(start, end), Ok(expected));
    }

    #[test]
    fn whole_range_matches_brute_force(values in prop::collection::vec(any::<i32>(), 1..300)) {
        let tree = RangeQueryTree::build(&values, Min);

        prop_assert_eq!(tree.query(0, values.len()), Ok(*values.iter().min().unwrap()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Stack walk agrees with recursion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stack_walk_agrees_for_sums((values, start, end) in values_and_span()) {
        let wide: Vec<i64> = values.iter().map(|v| *v as i64).collect();
        let tree = RangeQueryTree::build(&wide, Sum);

        prop_assert_eq!(tree.query_with_stack(start, end), tree.query(start, end));
        prop_assert_eq!(tree.query(start, end), Ok(wide[start..end].iter().sum::<i64>()));
    }

    #[test]
    fn stack_walk_keeps_order((values, start, end) in values_and_span()) {
        let digits: Vec<Vec<i32>> = values.iter().map(|v| vec![*v]).collect();
        let concat = from_fn(|a: &Vec<i32>, b: &Vec<i32>| [a.as_slice(), b.as_slice()].concat());
        let tree = RangeQueryTree::build(&digits, concat);

        prop_assert_eq!(tree.query(start, end), Ok(values[start..end].to_vec()));
        prop_assert_eq!(tree.query_with_stack(start, end), Ok(values[start..end].to_vec()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Update consistency
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn update_is_visible_where_it_should_be((values, index, value) in values_and_index()) {
        let mut tree = RangeQueryTree::build(&values, Sum);
        let before = tree.clone();
        tree.update(index, value).unwrap();

        let mut expected = values.clone();
        expected[index] = value;

        prop_assert_eq!(tree.query(index, index + 1), Ok(value));
        prop_assert_eq!(tree.get(index), Ok(&value));

        let len = values.len();
        for start in 0..len {
            for end in start + 1..=len {
                let answer = tree.query(start, end);
                if start <= index && index < end {
                    prop_assert_eq!(answer, Ok(expected[start..end].iter().sum::<i64>()));
                } else {
                    prop_assert_eq!(answer, before.query(start, end));
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Invalid ranges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn invalid_ranges_are_rejected(
        values in prop::collection::vec(any::<i32>(), 1..50),
        start in 0usize..80,
        end in 0usize..80,
    ) {
        prop_assume!(start >= end || end > values.len());
        let tree = RangeQueryTree::build(&values, Min);
        let expected = Err(RangeQueryError::InvalidRange { start, end, len: values.len() });

        prop_assert_eq!(tree.query(start, end), expected);
        prop_assert_eq!(tree.query_with_stack(start, end), expected);
    }

    #[test]
    fn indexes_past_the_end_are_rejected(
        values in prop::collection::vec(any::<i32>(), 1..50),
        past in 0usize..10,
    ) {
        let mut tree = RangeQueryTree::build(&values, Min);
        let index = values.len() + past;
        let expected = Err(RangeQueryError::IndexOutOfRange { index, len: values.len() });

        prop_assert_eq!(tree.update(index, 0), expected);
        prop_assert_eq!(tree.to_vec(), values);
    }
}
