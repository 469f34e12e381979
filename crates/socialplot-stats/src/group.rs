//! Insertion-ordered grouping and reduction
//!
//! `group_by` partitions items by key; `rollup` reduces every partition.
//! Iteration order of the result follows the first occurrence of each key.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::{StatsError, StatsResult};
use crate::observation::NestedObservation;

/// Partition items by key, keeping first-occurrence key order
pub fn group_by<'a, T, K, F>(items: &'a [T], key_fn: F) -> IndexMap<K, Vec<&'a T>>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<&'a T>> = IndexMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(item);
    }
    groups
}

/// Partition items by key and reduce each partition
///
/// Fails with `InvalidInput` on empty input; reducer errors are propagated
/// unchanged.
pub fn rollup<T, K, R, F, G>(items: &[T], key_fn: F, reduce: G) -> StatsResult<IndexMap<K, R>>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
    G: Fn(&K, &[&T]) -> StatsResult<R>,
{
    if items.is_empty() {
        return Err(StatsError::invalid("cannot group an empty sequence"));
    }

    group_by(items, key_fn)
        .into_iter()
        .map(|(key, members)| {
            let reduced = reduce(&key, &members)?;
            Ok((key, reduced))
        })
        .collect()
}

/// Arithmetic mean of a non-empty sample
pub fn mean(values: &[f64]) -> StatsResult<f64> {
    if values.is_empty() {
        return Err(StatsError::invalid("cannot average an empty sample"));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(StatsError::non_finite("value", bad.to_string()));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Average values per (group, category) pair
///
/// Turns raw per-post observations into the per-pair averages a grouped
/// bar plot draws. Output order follows the first occurrence of each pair.
pub fn average_nested(observations: &[NestedObservation]) -> StatsResult<Vec<NestedObservation>> {
    let means = rollup(
        observations,
        |o| (o.group.clone(), o.category.clone()),
        |_, members| mean(&members.iter().map(|m| m.value).collect::<Vec<_>>()),
    )?;

    means
        .into_iter()
        .map(|((group, category), value)| NestedObservation::new(group, category, value))
        .collect()
}
