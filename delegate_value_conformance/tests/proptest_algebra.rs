// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based tests for delegate equality, hashing, combine and remove.

mod common;

use common::{
    build, compute_hash, contains_run, delegate, handler_type, target, targets, via_stubs,
};
use delegate_value::DelegateValue;
use proptest::prelude::*;

fn assert_minimal_shape(value: &DelegateValue) {
    assert_eq!(
        value.is_multicast(),
        value.target_count() >= 2,
        "multicast iff at least two targets: {value:?}"
    );
}

// =============================================================================
// Equality and hashing
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Equality is reflexive, also across independently built copies.
    #[test]
    fn equality_is_reflexive(ts in targets(5)) {
        let ty = handler_type();
        let a = build(&ty, &ts);
        let rebuilt = build(&ty, &ts);

        prop_assert_eq!(&a, &a.clone());
        prop_assert_eq!(&a, &rebuilt);
        prop_assert_eq!(compute_hash(&a), compute_hash(&rebuilt));
    }

    /// Equality is symmetric.
    #[test]
    fn equality_is_symmetric(a in delegate(3), b in delegate(3)) {
        prop_assert_eq!(a == b, b == a);
    }

    /// Equality is transitive. Single targets from the small alphabet collide often.
    #[test]
    fn equality_is_transitive(a in delegate(2), b in delegate(2), c in delegate(2)) {
        if a == b && b == c {
            prop_assert_eq!(&a, &c);
        }
    }

    /// Equal values hash equal.
    #[test]
    fn equal_values_hash_equal(a in delegate(3), b in delegate(3)) {
        if a == b {
            prop_assert_eq!(compute_hash(&a), compute_hash(&b));
        }
    }

    /// Stub and direct spellings of the same callables are equal and hash equal.
    #[test]
    fn stub_spelling_is_invisible(ts in targets(5)) {
        let ty = handler_type();
        let direct = build(&ty, &ts);
        let stubbed = build(&ty, &via_stubs(&ts));

        prop_assert_eq!(&direct, &stubbed);
        prop_assert_eq!(compute_hash(&direct), compute_hash(&stubbed));
    }

    /// Equality is exactly positional equality of the invocation lists.
    #[test]
    fn equality_matches_invocation_lists(a in delegate(3), b in delegate(3)) {
        prop_assert_eq!(a == b, a.invocation_list() == b.invocation_list());
    }
}

// =============================================================================
// Combine and remove
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Combining concatenates invocation lists in order.
    #[test]
    fn combine_concatenates(a in delegate(3), b in delegate(3), c in delegate(3)) {
        let abc = a.combine(&b).unwrap().combine(&c).unwrap();
        let expected: Vec<DelegateValue> = [a.invocation_list(), b.invocation_list(), c.invocation_list()]
            .concat();

        prop_assert_eq!(abc.invocation_list(), expected);
        prop_assert_eq!(&abc, &a.combine(&b.combine(&c).unwrap()).unwrap());
        assert_minimal_shape(&abc);
    }

    /// Removing what was just combined restores the original value.
    #[test]
    fn remove_undoes_combine(a in delegate(4), b in delegate(3)) {
        let ab = a.combine(&b).unwrap();
        let restored = ab.remove(&b).unwrap();

        prop_assert_eq!(restored.as_ref(), Some(&a));
        if let Some(restored) = &restored {
            assert_minimal_shape(restored);
        }
    }

    /// Repeated combination is undone last-in-first-out.
    #[test]
    fn removal_is_lifo(a in delegate(2), b in delegate(2), c in delegate(2)) {
        let abc = a.combine(&b).unwrap().combine(&c).unwrap();
        let ab = abc.remove(&c).unwrap().unwrap();
        let back_to_a = ab.remove(&b).unwrap().unwrap();
        prop_assert_eq!(back_to_a, a);
    }

    /// Removing a sequence that does not occur contiguously is a no-op.
    #[test]
    fn remove_without_match_is_noop(a in delegate(5), b in delegate(3)) {
        let a_list = a.invocation_list();
        let b_list = b.invocation_list();
        prop_assume!(!contains_run(&a_list, &b_list));

        prop_assert_eq!(a.remove(&b).unwrap(), Some(a.clone()));
    }

    /// Removing a present sequence drops exactly its length, never leaving an undersized multicast.
    #[test]
    fn remove_with_match_shrinks(
        prefix in prop::collection::vec(target(), 0..3),
        needle in targets(3),
        suffix in prop::collection::vec(target(), 0..3),
    ) {
        let ty = handler_type();
        let haystack = build(&ty, &[prefix.as_slice(), needle.as_slice(), suffix.as_slice()].concat());
        let value = build(&ty, &needle);

        match haystack.remove(&value).unwrap() {
            None => prop_assert!(prefix.is_empty() && suffix.is_empty()),
            Some(rest) => {
                prop_assert_eq!(rest.target_count(), prefix.len() + suffix.len());
                assert_minimal_shape(&rest);
            }
        }
    }

    /// Remove takes the occurrence closest to the end.
    #[test]
    fn remove_picks_last_occurrence(prefix in delegate(2), needle in delegate(2), middle in delegate(2)) {
        let haystack = prefix
            .combine(&needle).unwrap()
            .combine(&middle).unwrap()
            .combine(&needle).unwrap();
        let expected = prefix.combine(&needle).unwrap().combine(&middle).unwrap();
        prop_assert_eq!(haystack.remove(&needle).unwrap(), Some(expected));
    }

    /// Combine is order sensitive: swapping operands changes the value exactly when the
    /// concatenated invocation lists differ.
    #[test]
    fn combine_is_order_sensitive(a in delegate(3), b in delegate(3)) {
        let ab = a.combine(&b).unwrap();
        let ba = b.combine(&a).unwrap();
        let ab_list = [a.invocation_list(), b.invocation_list()].concat();
        let ba_list = [b.invocation_list(), a.invocation_list()].concat();

        prop_assert_eq!(ab == ba, ab_list == ba_list);
        if !a.is_multicast() && !b.is_multicast() && a != b {
            prop_assert_ne!(ab, ba);
        }
    }
}
