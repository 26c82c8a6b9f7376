use proptest::prelude::*;
use shared::record::{FieldValue, Record, TableRecord};
use shared::table::{self, PageState, SortDirection, SortState};

// Small alphabet so searches and sort ties actually hit
fn arb_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Missing),
        any::<bool>().prop_map(FieldValue::Bool),
        (-5i64..5).prop_map(FieldValue::from),
        "[aAbB ]{0,4}".prop_map(FieldValue::Text),
    ]
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((arb_value(), arb_value()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (key, other))| {
                Record::new(i.to_string())
                    .with("Key", key)
                    .with("Other", other)
            })
            .collect()
    })
}

fn ids(rows: &[&Record]) -> Vec<String> {
    rows.iter().map(|r| r.record_id()).collect()
}

fn position(id: &str) -> usize {
    id.parse().unwrap()
}

proptest! {
    /// Property: an empty search leaves the list unchanged
    #[test]
    fn prop_empty_search_is_identity(records in arb_records()) {
        let filtered = table::filter_records(&records, "");
        let all: Vec<&Record> = records.iter().collect();
        prop_assert_eq!(filtered, all);
    }

    /// Property: kept rows contain the term, dropped rows do not
    #[test]
    fn prop_filter_partitions_on_term(records in arb_records(), term in "[aAbB]{1,2}") {
        let needle = term.to_lowercase();
        let contains = |r: &Record| {
            r.search_values()
                .iter()
                .any(|v| v.to_lowercase().contains(&needle))
        };

        let filtered = table::filter_records(&records, &term);
        for row in &filtered {
            prop_assert!(contains(*row));
        }
        let kept = ids(&filtered);
        for row in &records {
            if !kept.contains(&row.record_id()) {
                prop_assert!(!contains(row));
            }
        }
    }

    /// Property: equal keys keep their input order in both directions
    #[test]
    fn prop_sort_is_stable(records in arb_records(), descending in any::<bool>()) {
        let direction = if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        let mut rows: Vec<&Record> = records.iter().collect();
        table::sort_records(&mut rows, &SortState::by("Key", direction));

        for pair in rows.windows(2) {
            let ordering = pair[0].field("Key").compare(&pair[1].field("Key"));
            let expected = match direction {
                SortDirection::Ascending => ordering.is_le(),
                SortDirection::Descending => ordering.is_ge(),
            };
            prop_assert!(expected);
            if ordering.is_eq() {
                prop_assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
    }

    /// Property: toggling the same header twice restores the order
    #[test]
    fn prop_double_toggle_restores_order(records in arb_records()) {
        let mut sort = SortState::default();
        sort.toggle("Key");
        let mut first: Vec<&Record> = records.iter().collect();
        table::sort_records(&mut first, &sort);

        sort.toggle("Key");
        sort.toggle("Key");
        let mut again: Vec<&Record> = records.iter().collect();
        table::sort_records(&mut again, &sort);

        prop_assert_eq!(ids(&first), ids(&again));
    }

    /// Property: all pages concatenated reproduce the sorted, filtered list once
    #[test]
    fn prop_pages_cover_list_exactly_once(
        records in arb_records(),
        size in 1usize..7,
        term in prop_oneof![Just(String::new()), "[ab]".prop_map(String::from)],
    ) {
        let sort = SortState::by("Other", SortDirection::Ascending);
        let everything = table::present(&records, &term, &sort, PageState::new(usize::MAX));
        let expected = ids(&everything.rows);

        let first = table::present(&records, &term, &sort, PageState::new(size));
        let mut collected = Vec::new();
        for page in 1..=first.total_pages {
            let view = table::present(&records, &term, &sort, PageState { current: page, size });
            prop_assert!(view.rows.len() <= size);
            collected.extend(ids(&view.rows));
        }
        prop_assert_eq!(collected, expected);
    }

    /// Property: the rendered page is always within bounds
    #[test]
    fn prop_page_is_clamped(records in arb_records(), current in 0usize..20, size in 0usize..5) {
        let view = table::present(&records, "", &SortState::default(), PageState { current, size });
        if view.total_filtered == 0 {
            prop_assert_eq!(view.page, 1);
        } else {
            prop_assert!(view.page >= 1 && view.page <= view.total_pages);
        }
    }
}
