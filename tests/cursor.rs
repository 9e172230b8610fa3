//! Cursor and iterator contracts.
//!
//! The iterator item type is fixed to `Entry`, so the same generic
//! algorithms must resolve for every backend.

use std::collections::BTreeMap;

use infvec::{Backend, Entry, HashedBackend, HashedVector, InfiniteVector, OrderedVector};

fn count_matching<B: Backend>(v: &InfiniteVector<B>, target: &B::Value) -> usize
where
    B::Value: PartialEq,
{
    v.iter().filter(|entry| entry.value() == target).count()
}

fn same_stream<'a, I, V, L, R>(left: L, right: R) -> bool
where
    I: PartialEq + 'a,
    V: PartialEq + 'a,
    L: IntoIterator<Item = Entry<'a, I, V>>,
    R: IntoIterator<Item = Entry<'a, I, V>>,
{
    left.into_iter().eq(right)
}

#[test]
fn predicate_counting_resolves_for_both_backends() {
    let map = BTreeMap::from([(42, 23.0), (123, 23.0), (5, 1.0)]);
    let ordered = OrderedVector::from(map.clone());
    let hashed: HashedVector<i32, f64> = map.into_iter().collect();

    assert_eq!(count_matching(&ordered, &23.0), 2);
    assert_eq!(count_matching(&hashed, &23.0), 2);
    assert_eq!(ordered.count_value(&1.0), 1);
    assert_eq!(hashed.count_if(|e| *e.index() < 100), 2);
}

#[test]
fn pairwise_stream_comparison_on_sorted_backends() {
    let a: OrderedVector<u16, u16> = (1..10).map(|i| (i, i * i)).collect();
    let b: OrderedVector<u16, u16> = (1..10).rev().map(|i| (i, i * i)).collect();
    assert!(same_stream(&a, &b));
    assert!(same_stream(a.iter(), b.iter()));
}

#[test]
fn iteration_count_matches_size() {
    let h: HashedVector<u64, u8> = (0..64).map(|i| (i * 3, 1)).collect();
    assert_eq!(h.iter().count(), h.size());
    assert_eq!(h.iter().len(), 64);

    let mut cursor = h.begin();
    let mut steps = 0;
    while cursor != h.end() {
        cursor.advance();
        steps += 1;
    }
    assert_eq!(steps, h.size());
}

#[test]
fn ordered_iteration_is_strictly_ascending() {
    let v: OrderedVector<i64, i64> = [9, -3, 14, 0, 2].into_iter().map(|i| (i, i + 100)).collect();
    let keys: Vec<i64> = v.support().copied().collect();
    assert_eq!(keys, vec![-3, 0, 2, 9, 14]);
}

#[test]
fn cursor_visits_the_same_entries_as_iter() {
    let v: OrderedVector<i32, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    let mut from_cursor = Vec::new();
    let mut cursor = v.begin();
    while !cursor.is_end() {
        from_cursor.push(cursor.post_advance().entry().pair());
    }
    let from_iter: Vec<(&i32, &char)> = v.iter().map(|e| e.pair()).collect();
    assert_eq!(from_cursor, from_iter);
}

#[test]
fn repeated_begin_gives_independent_cursors() {
    let v: HashedVector<i32, i32> = (1..5).map(|i| (i, i)).collect();
    let mut first = v.begin();
    let second = v.begin();
    first.advance();
    assert_ne!(first, second);
    assert_eq!(second, v.begin());
    assert_eq!(second.position(), 0);
}

#[test]
fn backward_walk_mirrors_forward_walk() {
    let v: OrderedVector<u8, u8> = (1..=6).map(|i| (i * 2, i)).collect();
    let mut cursor = v.end();
    let mut backwards = Vec::new();
    while cursor != v.begin() {
        cursor.retreat();
        backwards.push(*cursor.index());
    }
    let mut forwards: Vec<u8> = v.support().copied().collect();
    forwards.reverse();
    assert_eq!(backwards, forwards);
}

#[test]
fn sortedness_is_declared() {
    assert!(!<HashedBackend<i32, i32> as Backend>::SORTED);
    assert!(<infvec::OrderedBackend<i32, i32> as Backend>::SORTED);
}

#[test]
#[should_panic(expected = "past-the-end")]
fn advancing_end_panics() {
    let v: HashedVector<i32, i32> = HashedVector::new();
    v.end().advance();
}

#[test]
fn cursors_of_equal_containers_are_still_distinct() {
    let a: OrderedVector<i32, i32> = [(1, 1)].into_iter().collect();
    let b = a.clone();
    assert!(a == b);
    assert_ne!(a.begin(), b.begin());
    assert_ne!(a.end(), b.end());
}
