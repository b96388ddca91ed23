//! Small collection helpers.

use std::cmp::Ordering;

/// Insert `item` into the sorted `items`, keeping at most `max_size` entries.
///
/// Equal items keep insertion order. Returns the entry pushed out when the
/// list was already full, which is `item` itself if it sorts last.
///
/// Panics if `max_size` is zero or `items` is already longer than `max_size`.
pub fn sorted_insert<T, F>(items: &mut Vec<T>, item: T, max_size: usize, comparator: F) -> Option<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    assert!(max_size > 0, "max size must be positive");
    assert!(items.len() <= max_size, "items exceed max size");

    let is_full = items.len() == max_size;
    if let Some(last) = items.last() {
        if is_full && comparator(last, &item) != Ordering::Greater {
            return Some(item);
        }
    }

    let index = items.partition_point(|existing| comparator(existing, &item) != Ordering::Greater);
    items.insert(index, item);

    if is_full {
        items.pop()
    } else {
        None
    }
}
