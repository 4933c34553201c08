//! # Property-Based Tests
//!
//! Order, algebra and filter invariants of `HandleSet`, checked with proptest.

use atomset_core::{AtomTable, Handle, HandleSet, Type};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn to_handles(raw: &[u64]) -> Vec<Handle> {
    raw.iter().map(|&r| Handle(r)).collect()
}

/// Count each handle; used as a multiset view of a set.
fn multiset(handles: &[Handle]) -> BTreeMap<Handle, usize> {
    let mut counts = BTreeMap::new();
    for &h in handles {
        *counts.entry(h).or_insert(0) += 1;
    }
    counts
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Construction from a sequence and conversion back are lossless.
    #[test]
    fn round_trip_preserves_sequence(raw in vec(1u64..500, 0..64)) {
        let handles = to_handles(&raw);
        let set = HandleSet::from_handles(&handles);

        prop_assert_eq!(set.len(), handles.len());
        prop_assert_eq!(set.to_handle_vec(), handles.clone());
        let array = set.to_handle_array().expect("array");
        prop_assert_eq!(array.to_vec(), handles);
    }

    /// Intersection output is ascending and holds min multiplicities.
    #[test]
    fn intersection_is_ascending_multiset_min(
        a in vec(1u64..40, 0..48),
        b in vec(1u64..40, 0..48),
    ) {
        let ha = to_handles(&a);
        let hb = to_handles(&b);
        let result = HandleSet::from_handles(&ha)
            .intersect(HandleSet::from_handles(&hb))
            .expect("intersect")
            .to_handle_vec();

        prop_assert!(result.windows(2).all(|w| w[0] <= w[1]));

        let ca = multiset(&ha);
        let cb = multiset(&hb);
        let mut expected = Vec::new();
        for (h, &na) in &ca {
            if let Some(&nb) = cb.get(h) {
                expected.extend(std::iter::repeat_n(*h, na.min(nb)));
            }
        }
        prop_assert_eq!(result, expected);
    }

    /// Intersection is commutative.
    #[test]
    fn intersection_commutes(
        a in vec(1u64..30, 0..32),
        b in vec(1u64..30, 0..32),
    ) {
        let ab = HandleSet::from(to_handles(&a)).intersect(HandleSet::from(to_handles(&b)));
        let ba = HandleSet::from(to_handles(&b)).intersect(HandleSet::from(to_handles(&a)));
        prop_assert_eq!(ab.expect("intersect"), ba.expect("intersect"));
    }

    /// Mutating a clone's source never touches the clone.
    #[test]
    fn clone_is_independent(raw in vec(1u64..20, 1..40), victim in 1u64..20) {
        let original = HandleSet::from(to_handles(&raw));
        let copy = original.clone();
        let trimmed = original.remove_all(Handle(victim));

        prop_assert_eq!(copy.to_handle_vec(), to_handles(&raw));
        prop_assert!(!trimmed.contains(Handle(victim)));
    }

    /// Remove keeps the relative order of the survivors.
    #[test]
    fn remove_preserves_order(raw in vec(1u64..10, 0..40), victim in 1u64..10) {
        let expected: Vec<Handle> = to_handles(&raw)
            .into_iter()
            .filter(|h| *h != Handle(victim))
            .collect();
        let result = HandleSet::from(to_handles(&raw)).remove_all(Handle(victim));
        prop_assert_eq!(result.to_handle_vec(), expected);
    }

    /// Concatenation is sequence append.
    #[test]
    fn concat_appends(a in vec(1u64..100, 0..20), b in vec(1u64..100, 0..20)) {
        let result = HandleSet::from(to_handles(&a)).concat(HandleSet::from(to_handles(&b)));
        let mut expected = to_handles(&a);
        expected.extend(to_handles(&b));
        prop_assert_eq!(result.to_handle_vec(), expected);
    }

    /// Filters keep a subsequence and are idempotent.
    #[test]
    fn arity_filter_idempotent_subsequence(picks in vec(0usize..6, 0..30), arity in 0usize..4) {
        let mut table = AtomTable::new();
        let concept = table.add_type("ConceptNode", Type::NODE).expect("type");
        let list = table.add_type("ListLink", Type::LINK).expect("type");
        let a = table.add_node(concept, "a").expect("node");
        let b = table.add_node(concept, "b").expect("node");
        let pool = [
            a,
            b,
            table.add_link(list, vec![a]).expect("link"),
            table.add_link(list, vec![a, b]).expect("link"),
            table.add_link(list, vec![b, a]).expect("link"),
            table.add_link(list, vec![a, b, a]).expect("link"),
        ];
        let input: Vec<Handle> = picks.iter().map(|&i| pool[i]).collect();

        let once = HandleSet::from_handles(&input)
            .filter_by_arity(&table, arity)
            .expect("filter");
        let twice = once.clone().filter_by_arity(&table, arity).expect("filter");
        prop_assert_eq!(&once, &twice);

        let mut rest = input.iter();
        for kept in &once {
            prop_assert!(rest.any(|&h| h == kept));
        }
    }
}
