//! Five-number summaries per group
//!
//! Provides:
//! - Linearly interpolated quantiles over sorted samples
//! - `GroupSummary` (min, q1, median, q3, max) for one partition
//! - `summarize`, which groups observations and summarizes every group

use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::group::rollup;
use crate::observation::Measured;

/// Group summaries keyed by group, in first-occurrence order
pub type Summaries = IndexMap<String, GroupSummary>;

/// Five-number summary of one group
///
/// Invariant: `min <= q1 <= median <= q3 <= max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl GroupSummary {
    /// Summarize a non-empty sample of finite values
    pub fn from_values(key: impl Into<String>, values: &[f64]) -> StatsResult<Self> {
        let key = key.into();
        if values.is_empty() {
            return Err(StatsError::invalid(format!("group '{}' has no values", key)));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(StatsError::non_finite(key, bad.to_string()));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            q3: quantile_sorted(&sorted, 0.75)?,
            max: sorted[sorted.len() - 1],
            key,
        })
    }

    /// Interquartile range (q3 - q1)
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Full range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Quantile of an ascending sample by linear interpolation
///
/// For `n` sorted values the fractional index is `h = p * (n - 1)` and the
/// result interpolates between `v[floor(h)]` and `v[ceil(h)]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> StatsResult<f64> {
    if sorted.is_empty() {
        return Err(StatsError::invalid("quantile of an empty sample"));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::invalid(format!(
            "quantile probability {} outside [0, 1]",
            p
        )));
    }

    let h = p * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let (lower, upper) = (sorted[lo], sorted[hi]);
    if lo == hi {
        return Ok(lower);
    }
    let t = h - h.floor();
    let span = upper - lower;
    let value = if span.is_finite() {
        lower + t * span
    } else {
        // neighbours of opposite sign near f64::MAX
        lower * (1.0 - t) + upper * t
    };
    Ok(value.max(lower).min(upper))
}

/// Group observations by key and compute a five-number summary per group
///
/// Fails with `InvalidInput` on empty input and with `NonFiniteValue` if a
/// non-finite value slipped past parsing.
pub fn summarize<T, K, F>(observations: &[T], group_key_fn: F) -> StatsResult<Summaries>
where
    T: Measured,
    K: Into<String> + Hash + Eq + Clone,
    F: Fn(&T) -> K,
{
    let by_key = rollup(observations, group_key_fn, |key, members| {
        let values: Vec<f64> = members.iter().map(|m| m.value()).collect();
        GroupSummary::from_values(key.clone(), &values)
    })?;

    Ok(by_key
        .into_iter()
        .map(|(_, summary)| (summary.key.clone(), summary))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Observation;

    fn obs(category: &str, value: f64) -> Observation {
        Observation::new(category, value).unwrap()
    }

    fn assert_ordered(s: &GroupSummary) {
        assert!(s.min <= s.q1, "{:?}", s);
        assert!(s.q1 <= s.median, "{:?}", s);
        assert!(s.median <= s.q3, "{:?}", s);
        assert!(s.q3 <= s.max, "{:?}", s);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.0).unwrap(), 1.0);
        assert_eq!(quantile_sorted(&sorted, 0.25).unwrap(), 1.75);
        assert_eq!(quantile_sorted(&sorted, 0.5).unwrap(), 2.5);
        assert_eq!(quantile_sorted(&sorted, 0.75).unwrap(), 3.25);
        assert_eq!(quantile_sorted(&sorted, 1.0).unwrap(), 4.0);
    }

    #[test]
    fn test_quantile_rejects_bad_arguments() {
        assert!(quantile_sorted(&[], 0.5).unwrap_err().is_invalid_input());
        assert!(quantile_sorted(&[1.0], 1.5).unwrap_err().is_invalid_input());
        assert!(quantile_sorted(&[1.0], f64::NAN).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_summarize_four_values() {
        let data = vec![obs("A", 3.0), obs("A", 1.0), obs("A", 4.0), obs("A", 2.0)];
        let summaries = summarize(&data, |o| o.category.clone()).unwrap();

        let a = &summaries["A"];
        assert_eq!(a.key, "A");
        assert_eq!(a.min, 1.0);
        assert_eq!(a.q1, 1.75);
        assert_eq!(a.median, 2.5);
        assert_eq!(a.q3, 3.25);
        assert_eq!(a.max, 4.0);
        assert_eq!(a.iqr(), 1.5);
        assert_eq!(a.range(), 3.0);
    }

    #[test]
    fn test_single_value_group() {
        let data = vec![obs("solo", 42.0)];
        let summaries = summarize(&data, |o| o.category.clone()).unwrap();
        let s = &summaries["solo"];
        for v in [s.min, s.q1, s.median, s.q3, s.max] {
            assert_eq!(v, 42.0);
        }
    }

    #[test]
    fn test_extreme_neighbours_stay_finite() {
        let summary = GroupSummary::from_values("A", &[-1e308, 1e308]).unwrap();
        assert_eq!(summary.median, 0.0);
        assert!(summary.q1.is_finite() && summary.q3.is_finite());
        assert_ordered(&summary);

        assert_eq!(quantile_sorted(&[-f64::MAX, f64::MAX], 1.0).unwrap(), f64::MAX);
        assert_eq!(quantile_sorted(&[-f64::MAX, f64::MAX], 0.0).unwrap(), -f64::MAX);
    }

    #[test]
    fn test_summaries_are_ordered() {
        let values = [
            812.0, 14.0, 377.0, 377.0, 90.0, 1.0, 999.0, 250.5, 640.0, 33.0, 72.0, 505.0, 5.0,
        ];
        let data: Vec<Observation> = values
            .iter()
            .enumerate()
            .map(|(i, v)| obs(["X", "Y", "Z"][i % 3], *v))
            .collect();

        let summaries = summarize(&data, |o| o.category.clone()).unwrap();
        assert_eq!(summaries.len(), 3);
        summaries.values().for_each(assert_ordered);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let data: Vec<Observation> = (0..50)
            .map(|i| obs(if i % 2 == 0 { "even" } else { "odd" }, (i * 37 % 11) as f64 / 3.0))
            .collect();

        let first = summarize(&data, |o| o.category.clone()).unwrap();
        let second = summarize(&data, |o| o.category.clone()).unwrap();
        for (a, b) in first.values().zip(second.values()) {
            assert_eq!(a.q1.to_bits(), b.q1.to_bits());
            assert_eq!(a.median.to_bits(), b.median.to_bits());
            assert_eq!(a.q3.to_bits(), b.q3.to_bits());
        }
    }

    #[test]
    fn test_group_order_follows_first_occurrence() {
        let data = vec![obs("Twitter", 1.0), obs("Facebook", 2.0), obs("Twitter", 3.0)];
        let summaries = summarize(&data, |o| o.category.clone()).unwrap();
        let keys: Vec<&str> = summaries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Twitter", "Facebook"]);
    }

    #[test]
    fn test_summarize_empty_is_invalid() {
        let data: Vec<Observation> = Vec::new();
        let err = summarize(&data, |o| o.category.clone()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_values_rejects_nan() {
        let err = GroupSummary::from_values("A", &[1.0, f64::NAN]).unwrap_err();
        assert!(err.is_non_finite());
    }

    #[test]
    fn test_summary_serializes() {
        let summary = GroupSummary::from_values("A", &[1.0, 2.0]).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["key"], "A");
        assert_eq!(json["median"], 1.5);
    }
}
