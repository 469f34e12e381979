//! Properties every five-number summary must hold

use proptest::prelude::*;
use socialplot_stats::{quantile_sorted, summarize, GroupSummary, Observation};

fn finite() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |v| v.is_finite())
}

fn assert_ordered(s: &GroupSummary) -> Result<(), TestCaseError> {
    prop_assert!(s.min <= s.q1, "{:?}", s);
    prop_assert!(s.q1 <= s.median, "{:?}", s);
    prop_assert!(s.median <= s.q3, "{:?}", s);
    prop_assert!(s.q3 <= s.max, "{:?}", s);
    for v in [s.min, s.q1, s.median, s.q3, s.max] {
        prop_assert!(v.is_finite(), "{:?}", s);
    }
    Ok(())
}

fn observations(values: &[f64], groups: usize) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Observation::new(format!("group-{}", i % groups), *v).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn test_summary_is_ordered(values in prop::collection::vec(finite(), 1..64)) {
        let summary = GroupSummary::from_values("A", &values).unwrap();
        assert_ordered(&summary)?;

        let lowest = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let highest = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(summary.min, lowest);
        prop_assert_eq!(summary.max, highest);
    }

    #[test]
    fn test_every_partition_is_ordered(
        values in prop::collection::vec(finite(), 1..96),
        groups in 1usize..5,
    ) {
        let data = observations(&values, groups);
        let summaries = summarize(&data, |o| o.category.clone()).unwrap();
        prop_assert_eq!(summaries.len(), groups.min(values.len()));
        for summary in summaries.values() {
            assert_ordered(summary)?;
        }
    }

    #[test]
    fn test_single_value_partition(value in finite()) {
        let summary = GroupSummary::from_values("solo", &[value]).unwrap();
        for v in [summary.min, summary.q1, summary.median, summary.q3, summary.max] {
            prop_assert_eq!(v.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_reruns_are_bit_identical(values in prop::collection::vec(finite(), 1..64)) {
        let data = observations(&values, 3);
        let first = summarize(&data, |o| o.category.clone()).unwrap();
        let second = summarize(&data, |o| o.category.clone()).unwrap();
        for (a, b) in first.values().zip(second.values()) {
            prop_assert_eq!(&a.key, &b.key);
            prop_assert_eq!(a.q1.to_bits(), b.q1.to_bits());
            prop_assert_eq!(a.median.to_bits(), b.median.to_bits());
            prop_assert_eq!(a.q3.to_bits(), b.q3.to_bits());
        }
    }

    #[test]
    fn test_quantile_within_neighbours(
        mut values in prop::collection::vec(finite(), 1..64),
        p in 0.0f64..=1.0,
    ) {
        values.sort_by(f64::total_cmp);
        let q = quantile_sorted(&values, p).unwrap();
        prop_assert!(q.is_finite());
        prop_assert!(values[0] <= q && q <= values[values.len() - 1]);
    }
}
