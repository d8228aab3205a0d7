//! Property tests for the subtype relation over generated hierarchies.
//!
//! Each generated hierarchy is a forest: class `C{i}` either has no
//! superclass or inherits from some `C{j}` with `j < i`, so it is acyclic by
//! construction and declared in topological order.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use quill_ir::Line;
use quill_types::{Type, TypeRegistry};

fn class_name(index: usize) -> String {
    format!("C{index}")
}

/// Parent links: `parents[i]` is the index of the superclass of `C{i}`.
fn forest_strategy() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec(prop::option::of(0usize..64), 1..16).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, parent)| parent.filter(|_| i > 0).map(|p| p % i))
            .collect()
    })
}

fn build(parents: &[Option<usize>]) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    for (i, parent) in parents.iter().enumerate() {
        let parent = parent.map(class_name);
        registry
            .register_class(&class_name(i), parent.as_deref(), Line::FIRST)
            .expect("generated names are distinct");
    }
    registry
}

/// Reference answer: follow parent links by index.
fn reaches(parents: &[Option<usize>], ancestor: usize, mut descendant: usize) -> bool {
    loop {
        if descendant == ancestor {
            return true;
        }
        match parents[descendant] {
            Some(parent) => descendant = parent,
            None => return false,
        }
    }
}

proptest! {
    #[test]
    fn generated_hierarchies_verify(parents in forest_strategy()) {
        build(&parents).verify_hierarchy().expect("forest is acyclic");
    }

    #[test]
    fn subtype_is_reflexive(parents in forest_strategy()) {
        let registry = build(&parents);
        for i in 0..parents.len() {
            let name = class_name(i);
            prop_assert!(registry.is_subtype(&name, &name).unwrap());
        }
    }

    #[test]
    fn subtype_matches_parent_links(parents in forest_strategy()) {
        let registry = build(&parents);
        for a in 0..parents.len() {
            for b in 0..parents.len() {
                let expected = reaches(&parents, a, b);
                let actual = registry.is_subtype(&class_name(a), &class_name(b)).unwrap();
                prop_assert_eq!(actual, expected, "C{} <: C{}", b, a);
            }
        }
    }

    #[test]
    fn subtype_is_transitive(parents in forest_strategy()) {
        let registry = build(&parents);
        let n = parents.len();
        for a in 0..n {
            for b in 0..n {
                for c in 0..n {
                    let ab = registry.is_subtype(&class_name(a), &class_name(b)).unwrap();
                    let bc = registry.is_subtype(&class_name(b), &class_name(c)).unwrap();
                    if ab && bc {
                        prop_assert!(registry.is_subtype(&class_name(a), &class_name(c)).unwrap());
                    }
                }
            }
        }
    }

    #[test]
    fn assignment_never_narrows(parents in forest_strategy()) {
        let registry = build(&parents);
        for a in 0..parents.len() {
            for b in 0..parents.len() {
                let declared = Type::Class(class_name(a));
                let actual = Type::Class(class_name(b));
                let forward = registry.compatible(&declared, &actual, true).unwrap();
                let backward = registry.compatible(&actual, &declared, true).unwrap();
                // Both directions only for the same class.
                prop_assert!(!(forward && backward) || a == b);
                // Comparison accepts whatever assignment accepts, either way round.
                let compared = registry.compatible(&declared, &actual, false).unwrap();
                prop_assert_eq!(compared, forward || backward);
            }
        }
    }
}
