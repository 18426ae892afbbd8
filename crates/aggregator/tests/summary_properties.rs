//! Property tests for log summaries.

use aggregator::summarize;
use data_validator::{Component, LogEntry};
use proptest::prelude::*;

fn component() -> impl Strategy<Value = Component> {
    prop_oneof![
        Just(Component::Battery),
        Just(Component::Motor),
        Just(Component::Gps),
    ]
}

fn entries() -> impl Strategy<Value = Vec<LogEntry>> {
    prop::collection::vec(
        (1u64..50, component(), -1000.0..1000.0f64).prop_map(|(timestamp, component, value)| {
            LogEntry {
                timestamp,
                component,
                value,
            }
        }),
        0..60,
    )
}

proptest! {
    /// Per-component counts add up to the total
    #[test]
    fn component_counts_sum_to_total(entries in entries()) {
        let summary = summarize(&entries);
        let per_component: usize = summary.components.values().map(|s| s.count).sum();
        prop_assert_eq!(summary.count, entries.len());
        prop_assert_eq!(per_component, entries.len());
    }

    /// Mean lies between min and max
    #[test]
    fn average_is_bounded(entries in entries()) {
        for stats in summarize(&entries).components.values() {
            prop_assert!(stats.min <= stats.max);
            prop_assert!(stats.avg >= stats.min - 1e-9 && stats.avg <= stats.max + 1e-9);
        }
    }

    /// Latest is the first entry holding the maximum timestamp
    #[test]
    fn latest_is_first_max(entries in entries()) {
        let summary = summarize(&entries);
        match entries.iter().map(|e| e.timestamp).max() {
            None => prop_assert!(summary.latest.is_none()),
            Some(max) => {
                let first = entries.iter().find(|e| e.timestamp == max).copied();
                prop_assert_eq!(summary.latest, first);
            }
        }
    }

    /// Components never seen are absent, not zeroed
    #[test]
    fn absent_components_omitted(entries in entries()) {
        let summary = summarize(&entries);
        for c in Component::ALL {
            let present = entries.iter().any(|e| e.component == c);
            prop_assert_eq!(summary.components.contains_key(&c), present);
        }
    }
}
