//! Case-insensitive substring search over device records.
//!
//! Plain containment only: no tokenization, no scoring, no fuzzy matching.
//! A record with an empty value in the searched column never matches, which
//! also keeps rows padded from short sheet data out of every result set.

use thiserror::Error;

use crate::record::{DeviceRecord, RecordColumn};

/// Error from resolving a search column by name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The column name does not match any record column.
    ///
    /// Surfaced to the operator as a non-fatal warning with no results.
    #[error("Column '{0}' not found in the data.")]
    UnknownColumn(String),
}

/// Returns whether `record` matches `query` in `column`.
///
/// Matching is case-insensitive substring containment. An empty value in the
/// column never matches, not even an empty query.
#[must_use]
pub fn matches(record: &DeviceRecord, column: RecordColumn, query: &str) -> bool {
    let value = record.column(column);
    !value.is_empty() && value.to_lowercase().contains(&query.to_lowercase())
}

/// Filters `records` to those matching `query` in `column`.
///
/// The result preserves input order and is fully materialized.
#[must_use]
pub fn search(records: &[DeviceRecord], column: RecordColumn, query: &str) -> Vec<DeviceRecord> {
    records
        .iter()
        .filter(|record| matches(record, column, query))
        .cloned()
        .collect()
}

/// Filters `records` against a column given by name.
///
/// # Errors
///
/// Returns [`SearchError::UnknownColumn`] when `column_name` is not one of
/// `Fullname`, `Device`, `Barcode` (exact match).
pub fn search_by_name(
    records: &[DeviceRecord],
    column_name: &str,
    query: &str,
) -> Result<Vec<DeviceRecord>, SearchError> {
    let column = RecordColumn::parse(column_name)
        .ok_or_else(|| SearchError::UnknownColumn(column_name.to_string()))?;
    Ok(search(records, column, query))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sample() -> Vec<DeviceRecord> {
        vec![
            DeviceRecord::new("Ann", "Laptop", "B001"),
            DeviceRecord::new("Bo", "Phone", "B002"),
            DeviceRecord::new("Cleo", "laptop dock", "B003"),
            DeviceRecord::new("Dee", "", "B004"),
        ]
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = sample();
        let hits = search(&records, RecordColumn::Device, "LAPTOP");
        assert_eq!(
            hits,
            vec![
                DeviceRecord::new("Ann", "Laptop", "B001"),
                DeviceRecord::new("Cleo", "laptop dock", "B003"),
            ],
        );
    }

    #[test]
    fn search_excludes_empty_values() {
        let records = sample();
        // "Dee" has no device; she must not appear even for an empty query.
        let hits = search(&records, RecordColumn::Device, "");
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|r| r.fullname != "Dee"));
    }

    #[test]
    fn search_no_matches_yields_empty() {
        let records = sample();
        assert!(search(&records, RecordColumn::Barcode, "zzz").is_empty());
    }

    #[test]
    fn search_preserves_input_order() {
        let records = sample();
        let hits = search(&records, RecordColumn::Barcode, "b00");
        let barcodes: Vec<&str> = hits.iter().map(|r| r.barcode.as_str()).collect();
        assert_eq!(barcodes, vec!["B001", "B002", "B003", "B004"]);
    }

    #[test]
    fn search_by_name_resolves_columns() {
        let records = sample();
        let hits = search_by_name(&records, "Fullname", "ann").expect("known column");
        assert_eq!(hits, vec![DeviceRecord::new("Ann", "Laptop", "B001")]);
    }

    #[test]
    fn search_by_name_unknown_column_is_an_error() {
        let records = sample();
        assert_eq!(
            search_by_name(&records, "Serial", "x"),
            Err(SearchError::UnknownColumn("Serial".to_string())),
        );
        // Column names are exact; the lowercase variant is unknown.
        assert_eq!(
            search_by_name(&records, "device", "x"),
            Err(SearchError::UnknownColumn("device".to_string())),
        );
    }

    proptest! {
        #[test]
        fn matching_record_contains_query_lowercased(
            value in "[a-zA-Z0-9 ]{0,16}",
            query in "[a-zA-Z0-9 ]{0,8}",
        ) {
            let record = DeviceRecord::new("x", value.clone(), "y");
            let hit = matches(&record, RecordColumn::Device, &query);
            let expected = !value.is_empty()
                && value.to_lowercase().contains(&query.to_lowercase());
            prop_assert_eq!(hit, expected);
        }

        #[test]
        fn search_result_is_subset_of_input(
            queries in proptest::collection::vec("[a-z]{0,4}", 1..4),
        ) {
            let records = sample();
            for query in queries {
                let hits = search(&records, RecordColumn::Device, &query);
                prop_assert!(hits.len() <= records.len());
                for hit in &hits {
                    prop_assert!(records.contains(hit));
                }
            }
        }
    }
}
