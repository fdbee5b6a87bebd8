//! Property-based tests for the view engine.
//!
//! - Partition: walking every page yields each matched record exactly once
//! - Past the end: pages after the last are empty but keep the totals
//! - Idempotence: deriving twice from the same inputs gives equal pages
//! - Inert query: a blank search changes nothing
//! - Reset: search and filter changes always return to page 1
//! - Ordering: sorting mixed JSON scalars is a consistent total order

use chrono::{TimeZone, Utc};
use dashlist::filter::FilterCriterion;
use dashlist::model::{EntityKind, Fields, Record};
use dashlist::sort::{sort_records, SortKey};
use dashlist::view::{derive, ViewController, ViewSpec, ViewState};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::cmp::Ordering;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn role_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("admin"), Just("user"), Just("editor")]
}

fn record_strategy() -> impl Strategy<Value = (String, &'static str, Option<i64>)> {
    (
        prop::string::string_regex("[a-zA-Z ]{0,12}").unwrap(),
        role_strategy(),
        prop::option::of(0i64..1000),
    )
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 0..80).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, role, coins))| {
                let mut fields = Fields::new();
                fields.insert("name".into(), json!(name));
                fields.insert("role".into(), json!(role));
                if let Some(coins) = coins {
                    fields.insert("coins".into(), json!(coins));
                }
                Record::with_id(format!("r{:03}", i), fields)
            })
            .collect()
    })
}

fn filters_strategy() -> impl Strategy<Value = Vec<FilterCriterion>> {
    prop::option::of(role_strategy())
        .prop_map(|role| role.map(|r| FilterCriterion::eq("role", r)).into_iter().collect())
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1_000_000i64..4_000_000_000_000).prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        (0i64..4_000_000_000).prop_map(|secs| {
            Value::from(Utc.timestamp_opt(secs, 0).unwrap().to_rfc3339())
        }),
        (0i64..4_000_000_000, 0u32..1_000_000_000)
            .prop_map(|(seconds, nanoseconds)| {
                json!({"seconds": seconds, "nanoseconds": nanoseconds})
            }),
        "[0-9]{0,4}".prop_map(Value::from),
        "[a-zA-Z ]{0,6}".prop_map(Value::from),
    ]
}

fn keyed_records(values: Vec<Option<Value>>) -> Vec<Record> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let mut fields = Fields::new();
            if let Some(value) = value {
                fields.insert("k".into(), value);
            }
            Record::with_id(format!("r{:03}", i), fields)
        })
        .collect()
}

fn spec() -> ViewSpec {
    ViewSpec::new(EntityKind::User).with_search_fields(vec!["name".into(), "role".into()])
}

fn state(
    search: &str,
    filters: Vec<FilterCriterion>,
    page_index: usize,
    page_size: usize,
) -> ViewState {
    let mut state = ViewState::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    state.search = search.to_string();
    state.filters = filters;
    state.page_index = page_index;
    state.page_size = page_size;
    state
}

proptest! {
    #[test]
    fn pages_partition_the_matched_set(
        records in records_strategy(),
        filters in filters_strategy(),
        search in "[a-z]{0,2}",
        page_size in 1usize..30,
    ) {
        let spec = spec();
        let start = state(&search, filters.clone(), 1, page_size);
        let first = derive(Some(records.as_slice()), &spec, &start).unwrap();

        let mut seen = Vec::new();
        for page_index in 1..=first.total_pages {
            let at = state(&search, filters.clone(), page_index, page_size);
            let page = derive(Some(records.as_slice()), &spec, &at).unwrap();
            prop_assert!(page.items.len() <= page_size);
            prop_assert_eq!(page.has_next_page, page_index < first.total_pages);
            seen.extend(page.items.into_iter().map(|r| r.id));
        }

        prop_assert_eq!(seen.len(), first.total_count);
        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), seen.len());
        prop_assert_eq!(first.total_pages, first.total_count.div_ceil(page_size));
    }

    #[test]
    fn pages_past_the_end_are_empty(
        records in records_strategy(),
        page_size in 1usize..30,
        beyond in 1usize..5,
    ) {
        let spec = spec();
        let first =
            derive(Some(records.as_slice()), &spec, &state("", vec![], 1, page_size)).unwrap();
        let page_index = first.total_pages + beyond;
        let at = state("", vec![], page_index, page_size);
        let page = derive(Some(records.as_slice()), &spec, &at).unwrap();

        prop_assert!(page.items.is_empty());
        prop_assert!(!page.has_next_page);
        prop_assert_eq!(page.total_count, records.len());
        prop_assert_eq!(page.total_pages, first.total_pages);
    }

    #[test]
    fn derive_is_idempotent(
        records in records_strategy(),
        filters in filters_strategy(),
        search in "[a-z]{0,2}",
        page_index in 1usize..5,
        page_size in 1usize..30,
    ) {
        let spec = spec().with_default_sort(Some("coins".parse().unwrap()));
        let s = state(&search, filters, page_index, page_size);
        prop_assert_eq!(
            derive(Some(records.as_slice()), &spec, &s).unwrap(),
            derive(Some(records.as_slice()), &spec, &s).unwrap()
        );
    }

    #[test]
    fn blank_search_is_inert(
        records in records_strategy(),
        filters in filters_strategy(),
        blank in "[ \t]{0,3}",
        page_size in 1usize..30,
    ) {
        let spec = spec();
        let blank_state = state(&blank, filters.clone(), 1, page_size);
        let with_blank = derive(Some(records.as_slice()), &spec, &blank_state).unwrap();
        let without =
            derive(Some(records.as_slice()), &spec, &state("", filters, 1, page_size)).unwrap();
        prop_assert_eq!(with_blank, without);
    }

    #[test]
    fn search_and_filter_changes_reset_page(
        records in records_strategy(),
        start_page in 1usize..10,
        search in "[a-z]{0,3}",
        role in role_strategy(),
    ) {
        let mut view = ViewController::new(spec());
        view.finish_loading(records);

        view.set_page(start_page).unwrap();
        view.set_search(search);
        prop_assert_eq!(view.state().page_index, 1);

        view.set_page(start_page).unwrap();
        view.set_filter(vec![FilterCriterion::eq("role", role)]);
        prop_assert_eq!(view.state().page_index, 1);
    }

    #[test]
    fn invalid_page_size_leaves_state_unchanged(
        records in records_strategy(),
        start_page in 1usize..10,
    ) {
        let mut view = ViewController::new(spec());
        view.finish_loading(records);
        view.set_page(start_page).unwrap();
        let before = view.state().clone();

        prop_assert!(view.set_page_size(0).is_err());
        prop_assert_eq!(view.state(), &before);
    }

    #[test]
    fn sorting_mixed_scalars_is_ordered(
        values in prop::collection::vec(prop::option::of(scalar_strategy()), 0..120),
        descending in any::<bool>(),
    ) {
        let key = if descending { SortKey::desc("k") } else { SortKey::asc("k") };
        let mut records = keyed_records(values);
        sort_records(&mut records, &key);
        for pair in records.windows(2) {
            prop_assert_ne!(key.compare(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn mixed_scalar_comparison_is_transitive(
        values in prop::collection::vec(prop::option::of(scalar_strategy()), 3..10),
    ) {
        let key = SortKey::asc("k");
        let records = keyed_records(values);
        for a in &records {
            for b in &records {
                prop_assert_eq!(key.compare(a, b), key.compare(b, a).reverse());
                for c in &records {
                    if key.compare(a, b) != Ordering::Greater
                        && key.compare(b, c) != Ordering::Greater
                    {
                        prop_assert_ne!(key.compare(a, c), Ordering::Greater);
                    }
                }
            }
        }
    }
}
