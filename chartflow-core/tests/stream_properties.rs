//! Property tests for the stream primitives.
//!
//! Uses proptest to verify:
//! 1. Zip length: operate yields min(len(a), len(b)) elements
//! 2. Realignment: shift(skip(s, n), n, fill) restores the length of s
//! 3. Change: output[i] = s[i + n] - s[i], length len(s) - n
//! 4. Count: output[i] = seed + i
//! 5. DecrementBy: output[i] = s[i] - k
//! 6. Duplicate: every copy equals the source

use chartflow_core::helper::{
    change, check_equals, count, decrement_by, duplicate, from_vec, last, operate, shift, skip,
    to_vec,
};
use proptest::prelude::*;

fn arb_series() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000i64..1_000, 0..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn operate_length_is_min(a in arb_series(), b in arb_series()) {
        let expected = a.len().min(b.len());
        let zipped = to_vec(operate(from_vec(a), from_vec(b), |x, y| x + y));
        prop_assert_eq!(zipped.len(), expected);
    }

    #[test]
    fn shift_after_skip_restores_length(s in arb_series(), n in 1usize..10) {
        prop_assume!(s.len() >= n);
        let len = s.len();
        let realigned = to_vec(shift(skip(from_vec(s.clone()), n), n, 0));

        prop_assert_eq!(realigned.len(), len);
        prop_assert!(realigned[..n].iter().all(|v| *v == 0));
        prop_assert_eq!(&realigned[n..], &s[n..]);
    }

    #[test]
    fn change_is_lagged_difference(s in arb_series(), n in 1usize..8) {
        let out = to_vec(change(from_vec(s.clone()), n));
        prop_assert_eq!(out.len(), s.len().saturating_sub(n));
        for (i, value) in out.iter().enumerate() {
            prop_assert_eq!(*value, s[i + n] - s[i]);
        }
    }

    #[test]
    fn count_is_seed_plus_index(s in arb_series(), seed in -50i64..50) {
        let out = to_vec(count(seed, from_vec(s.clone())));
        prop_assert_eq!(out.len(), s.len());
        for (i, value) in out.iter().enumerate() {
            prop_assert_eq!(*value, seed + i as i64);
        }
    }

    #[test]
    fn decrement_by_subtracts(s in arb_series(), k in -100i64..100) {
        let expected: Vec<i64> = s.iter().map(|v| v - k).collect();
        prop_assert!(check_equals(decrement_by(from_vec(s), k), from_vec(expected)).is_ok());
    }

    #[test]
    fn last_keeps_at_most_n(s in arb_series(), n in 0usize..16) {
        let out = to_vec(last(from_vec(s.clone()), n));
        let start = s.len().saturating_sub(n);
        prop_assert_eq!(out, s[start..].to_vec());
    }

    #[test]
    fn duplicate_copies_are_identical(s in arb_series(), copies in 1usize..5) {
        for copy in duplicate(from_vec(s.clone()), copies) {
            prop_assert!(check_equals(copy, from_vec(s.clone())).is_ok());
        }
    }
}
