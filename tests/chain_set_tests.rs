//! Unit tests for ChainSet.
//!
//! These tests exercise the public API end to end: construction,
//! membership, insertion and removal, iteration order, set algebra, and
//! the ownership rules around copiers and releasers.

use chainset::{ChainSet, ElementOps, Insertion, SetError};
use rstest::rstest;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn fixture_set(elements: &[i32]) -> ChainSet<i32> {
    let mut set = ChainSet::standard();
    for &element in elements {
        assert!(set.insert(element).is_inserted());
    }
    set
}

fn contents(set: &ChainSet<i32>) -> Vec<i32> {
    set.iter().copied().collect()
}

/// Bundle that records every released payload and whose copier fails once
/// `budget` copies have been produced.
fn budgeted_ops(budget: usize, releases: &Rc<RefCell<Vec<i32>>>) -> ElementOps<i32> {
    let releases = Rc::clone(releases);
    let copies_made = Rc::new(Cell::new(0usize));
    ElementOps::new(|a: &i32, b: &i32| a == b)
        .with_copier(move |element: &i32| {
            if copies_made.get() >= budget {
                return None;
            }
            copies_made.set(copies_made.get() + 1);
            Some(*element)
        })
        .with_releaser(move |element: i32| releases.borrow_mut().push(element))
}

#[rstest]
fn test_new_set_is_empty() {
    let set: ChainSet<i32> = ChainSet::standard();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

#[rstest]
fn test_membership_of_the_empty_set_is_false() {
    let set: ChainSet<i32> = ChainSet::standard();
    assert!(!set.contains(&42));
}

#[rstest]
fn test_insert_establishes_membership() {
    let set = fixture_set(&[0, 1, 2]);

    assert_eq!(set.len(), 3);
    for element in [0, 1, 2] {
        assert!(set.contains(&element));
    }
    assert!(!set.contains(&3));
}

#[rstest]
fn test_duplicate_insert_returns_the_payload() {
    let mut set = fixture_set(&[7]);

    let insertion = set.insert(7);
    assert_eq!(insertion, Insertion::Duplicate(7));
    assert_eq!(set.len(), 1);
}

#[rstest]
fn test_insertion_result_helpers() {
    let mut set = fixture_set(&[1]);

    let accepted = set.insert(2);
    assert!(accepted.is_inserted());
    assert!(!accepted.is_duplicate());
    assert_eq!(accepted.into_duplicate(), None);

    let rejected = set.insert(1);
    assert!(rejected.is_duplicate());
    assert_eq!(rejected.into_duplicate(), Some(1));
}

#[rstest]
fn test_remove_returns_the_payload_without_releasing_it() {
    let releases = Rc::new(RefCell::new(Vec::new()));
    let mut set = ChainSet::new(budgeted_ops(usize::MAX, &releases));
    for element in [1, 2, 3] {
        assert!(set.insert(element).is_inserted());
    }

    assert_eq!(set.remove(&2), Ok(2));
    assert!(releases.borrow().is_empty());
    assert_eq!(contents(&set), vec![1, 3]);
}

#[rstest]
fn test_remove_of_an_absent_element_reports_not_found() {
    let mut set = fixture_set(&[1, 2]);
    assert_eq!(set.remove(&9), Err(SetError::NotFound));

    let mut empty: ChainSet<i32> = ChainSet::standard();
    assert_eq!(empty.remove(&9), Err(SetError::NotFound));
}

#[rstest]
fn test_pop_first_drains_in_insertion_order() {
    let mut set = fixture_set(&[5, 3, 8, 1]);

    let mut drained = Vec::new();
    while let Some(element) = set.pop_first() {
        drained.push(element);
    }

    assert_eq!(drained, vec![5, 3, 8, 1]);
    assert!(set.is_empty());
    assert_eq!(set.pop_first(), None);
}

#[rstest]
fn test_traverse_visits_in_insertion_order() {
    let set = fixture_set(&[2, 9, 4]);

    let mut visited = Vec::new();
    set.traverse(|element| visited.push(*element)).unwrap();
    assert_eq!(visited, vec![2, 9, 4]);
}

#[rstest]
fn test_traverse_of_an_empty_set_violates_the_precondition() {
    let set: ChainSet<i32> = ChainSet::standard();
    let result = set.traverse(|_element| {});
    assert_eq!(result.unwrap_err(), SetError::PreconditionViolated);
}

#[rstest]
fn test_clear_is_idempotent() {
    let mut set = fixture_set(&[1, 2, 3]);

    set.clear();
    assert!(set.is_empty());

    // A second teardown of the already-empty set is a no-op.
    set.clear();
    assert!(set.is_empty());
    assert!(!set.contains(&1));
}

#[rstest]
fn test_set_is_reusable_after_clear() {
    let mut set = fixture_set(&[1, 2]);
    set.clear();

    assert!(set.insert(9).is_inserted());
    assert_eq!(contents(&set), vec![9]);
}

#[rstest]
fn test_releaser_runs_for_every_remaining_payload_on_drop() {
    let releases = Rc::new(RefCell::new(Vec::new()));
    {
        let mut set = ChainSet::new(budgeted_ops(usize::MAX, &releases));
        for element in [10, 20, 30] {
            assert!(set.insert(element).is_inserted());
        }
        assert_eq!(set.remove(&20), Ok(20));
    }

    // Only the payloads still owned at drop time were released.
    assert_eq!(*releases.borrow(), vec![10, 30]);
}

#[rstest]
fn test_union_of_overlapping_sets() {
    let left = fixture_set(&[0, 1, 2]);
    let right = fixture_set(&[2, 4, 6]);

    let union = ChainSet::union_of(&[&left, &right]).unwrap();
    assert_eq!(union.len(), 5);
    assert_eq!(contents(&union), vec![0, 1, 2, 4, 6]);
}

#[rstest]
fn test_intersection_of_overlapping_sets() {
    let left = fixture_set(&[0, 1, 2]);
    let right = fixture_set(&[2, 4, 6]);

    let intersection = ChainSet::intersection_of(&[&left, &right]).unwrap();
    assert_eq!(contents(&intersection), vec![2]);
}

#[rstest]
fn test_difference_of_overlapping_sets() {
    let left = fixture_set(&[0, 1, 2]);
    let right = fixture_set(&[2, 4, 6]);

    let difference = left.difference(&right).unwrap();
    assert_eq!(contents(&difference), vec![0, 1]);
}

#[rstest]
fn test_algebra_over_string_payloads_with_a_case_insensitive_matcher() {
    let ops = || {
        ElementOps::new(|a: &String, b: &String| a.eq_ignore_ascii_case(b))
            .with_copier(|element: &String| Some(element.clone()))
    };

    let mut left = ChainSet::new(ops());
    assert!(left.insert(String::from("alpha")).is_inserted());
    assert!(left.insert(String::from("Beta")).is_inserted());
    assert_eq!(
        left.insert(String::from("ALPHA")),
        Insertion::Duplicate(String::from("ALPHA"))
    );

    let mut right = ChainSet::new(ops());
    assert!(right.insert(String::from("beta")).is_inserted());
    assert!(right.insert(String::from("gamma")).is_inserted());

    let union = ChainSet::union_of(&[&left, &right]).unwrap();
    let members: Vec<String> = union.iter().cloned().collect();
    assert_eq!(members, vec!["alpha", "Beta", "gamma"]);

    let intersection = ChainSet::intersection_of(&[&left, &right]).unwrap();
    assert!(intersection.contains(&String::from("BETA")));
    assert_eq!(intersection.len(), 1);
}

#[rstest]
fn test_union_failure_leaves_no_partial_result() {
    let releases = Rc::new(RefCell::new(Vec::new()));
    let left = {
        let mut set = ChainSet::new(budgeted_ops(2, &releases));
        for element in [0, 1, 2] {
            assert!(set.insert(element).is_inserted());
        }
        set
    };
    let right = fixture_set(&[2, 4, 6]);

    let result = ChainSet::union_of(&[&left, &right]);
    assert_eq!(result.unwrap_err(), SetError::AllocationFailure);
    assert_eq!(*releases.borrow(), vec![0, 1]);
    assert_eq!(contents(&left), vec![0, 1, 2]);
}

#[rstest]
fn test_subset_relations() {
    let empty = fixture_set(&[]);
    let small = fixture_set(&[1, 2]);
    let large = fixture_set(&[3, 2, 1]);

    assert!(empty.is_subset(&large));
    assert!(empty.is_subset(&empty));
    assert!(small.is_subset(&large));
    assert!(!large.is_subset(&small));
    assert!(!small.is_subset(&empty));
}

#[rstest]
fn test_equality_requires_at_least_two_sets() {
    let set = fixture_set(&[1]);
    assert!(!ChainSet::are_equal(&[&set]));
    assert!(!ChainSet::<i32>::are_equal(&[]));
}

#[rstest]
fn test_equality_by_membership_not_order() {
    let left = fixture_set(&[1, 2, 3]);
    let right = fixture_set(&[3, 1, 2]);
    let other = fixture_set(&[1, 2, 4]);

    assert!(ChainSet::are_equal(&[&left, &right]));
    assert_eq!(left, right);
    assert_ne!(left, other);
}

#[rstest]
fn test_duplicate_produces_an_independent_set() {
    let original = fixture_set(&[1, 2, 3]);
    let mut copy = original.duplicate().unwrap();

    assert_eq!(copy, original);
    assert_eq!(copy.remove(&2), Ok(2));
    assert!(original.contains(&2));
    assert_ne!(copy, original);
}

#[rstest]
fn test_copy_less_sets_refuse_copying_operations() {
    let mut left: ChainSet<i32> = ChainSet::new(ElementOps::matching());
    let mut right: ChainSet<i32> = ChainSet::new(ElementOps::matching());
    assert!(left.insert(1).is_inserted());
    assert!(right.insert(2).is_inserted());

    assert_eq!(
        ChainSet::union_of(&[&left, &right]).unwrap_err(),
        SetError::CopyUnavailable
    );
    assert_eq!(
        ChainSet::intersection_of(&[&left, &right]).unwrap_err(),
        SetError::CopyUnavailable
    );
    assert_eq!(left.difference(&right).unwrap_err(), SetError::CopyUnavailable);
    assert_eq!(left.duplicate().unwrap_err(), SetError::CopyUnavailable);

    // Non-copying operations still work on the same sets.
    assert!(left.contains(&1));
    assert!(!left.is_subset(&right));
}

#[rstest]
fn test_borrowing_iteration_is_non_destructive() {
    let set = fixture_set(&[4, 5, 6]);

    let first_pass: Vec<i32> = (&set).into_iter().copied().collect();
    let second_pass: Vec<i32> = set.iter().copied().collect();

    assert_eq!(first_pass, vec![4, 5, 6]);
    assert_eq!(first_pass, second_pass);
    assert_eq!(set.len(), 3);
}

#[rstest]
fn test_owning_iteration_consumes_the_set_in_order() {
    let set = fixture_set(&[4, 5, 6]);
    let drained: Vec<i32> = set.into_iter().collect();
    assert_eq!(drained, vec![4, 5, 6]);
}

#[rstest]
fn test_display_formats_like_a_set_literal() {
    let empty: ChainSet<i32> = ChainSet::standard();
    assert_eq!(empty.to_string(), "{}");

    let set = fixture_set(&[0, 1, 2]);
    assert_eq!(set.to_string(), "{0, 1, 2}");
}

#[rstest]
fn test_debug_formats_as_a_set() {
    let set = fixture_set(&[1, 2]);
    assert_eq!(format!("{set:?}"), "{1, 2}");
}

#[rstest]
fn test_error_messages_are_stable() {
    assert_eq!(
        SetError::InvalidArgument.to_string(),
        "a required argument was absent"
    );
    assert_eq!(SetError::NotFound.to_string(), "no matching element in the set");
    assert_eq!(
        SetError::AllocationFailure.to_string(),
        "an element copy could not be produced"
    );
    assert_eq!(
        SetError::CopyUnavailable.to_string(),
        "no copier is configured for this set"
    );
    assert_eq!(
        SetError::PreconditionViolated.to_string(),
        "operation precondition violated"
    );
}

#[rstest]
fn test_errors_coerce_to_the_standard_error_trait() {
    let error: Box<dyn std::error::Error> = Box::new(SetError::NotFound);
    assert_eq!(error.to_string(), "no matching element in the set");
}
