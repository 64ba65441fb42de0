use std::collections::{hash_map::Entry, HashMap};
use std::hash::Hash;

mod consolidate;
mod pivot;
mod summary;

pub use consolidate::consolidate;
pub use pivot::pivot;
pub use summary::{minutes_as_hours, summarize, TimesheetSummary};

/// Group items by key. Groups are returned in the order their key was first seen,
/// and items keep their relative order within a group.
pub(crate) fn group_by<T, K, V>(
    items: impl Iterator<Item = T>,
    key_fn: impl Fn(&T) -> K,
    value_fn: impl Fn(T) -> V,
) -> Vec<(K, Vec<V>)>
where
    K: PartialEq + Eq + Hash + Clone,
{
    let mut grouped: Vec<(K, Vec<V>)> = Vec::new();
    let mut group_index: HashMap<K, usize> = HashMap::new();
    for item in items {
        let key = key_fn(&item);
        match group_index.entry(key) {
            Entry::Occupied(index) => {
                grouped[*index.get()].1.push(value_fn(item));
            }
            Entry::Vacant(index) => {
                grouped.push((index.key().clone(), vec![value_fn(item)]));
                index.insert(grouped.len() - 1);
            }
        }
    }
    grouped
}
