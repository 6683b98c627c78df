use crate::domain::Named;
use std::cmp::Ordering;

/// Returns a new vector with the same elements as `items`, ordered by
/// ascending lexicographic comparison of `key`. Ties keep their original
/// relative order, and the caller's slice is left untouched.
pub fn ordered_by<T: Clone>(items: &[T], key: impl Fn(&T) -> &str) -> Vec<T> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| lexicographic(key(a), key(b)));
    ordered
}

/// `ordered_by` over the entity types' display name.
pub fn ordered_by_name<T: Clone + Named>(items: &[T]) -> Vec<T> {
    ordered_by(items, |item| item.display_name())
}

fn lexicographic(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}
