//! Filter option extraction.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::filter::DateRange;
use crate::rows::{Dimension, EventRow};

/// Values never offered as a filter choice (compared case-insensitively).
const PLACEHOLDERS: &[&str] = &["unknown", "none", "nan", "null", "n/a"];

/// Sorted, de-duplicated selectable values of a dimension.
pub fn distinct_options(rows: &[EventRow], dimension: Dimension) -> Vec<String> {
    rows.iter()
        .map(|row| row.dimension(dimension).trim())
        .filter(|value| !is_placeholder(value))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Earliest and latest date in the row set.
pub fn date_bounds(rows: &[EventRow]) -> Option<DateRange> {
    let start = rows.iter().map(|r| r.date).min()?;
    let end = rows.iter().map(|r| r.date).max()?;
    Some(DateRange::new(start, end))
}

fn is_placeholder(value: &str) -> bool {
    value.is_empty() || PLACEHOLDERS.iter().any(|p| p.eq_ignore_ascii_case(value))
}

/// Everything a page needs to populate its filter widgets.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub date_bounds: Option<DateRange>,
    pub dimensions: BTreeMap<Dimension, Vec<String>>,
}

impl FilterOptions {
    pub fn extract(rows: &[EventRow], dimensions: &[Dimension]) -> Self {
        Self {
            date_bounds: date_bounds(rows),
            dimensions: dimensions
                .iter()
                .map(|&d| (d, distinct_options(rows, d)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn row(d: u32, country: &str) -> EventRow {
        EventRow::new(day(d), "u").with_dimension(Dimension::Country, country)
    }

    #[test]
    fn test_options_sorted_and_cleaned() {
        let rows = vec![
            row(1, "US"),
            row(2, "India"),
            row(3, "US"),
            row(4, "NaN"),
            row(5, "none"),
            row(6, ""),
            row(7, "UNKNOWN"),
        ];

        assert_eq!(distinct_options(&rows, Dimension::Country), vec!["India", "US"]);
    }

    #[test]
    fn test_options_idempotent() {
        let rows = vec![row(1, "US"), row(2, "Brazil")];
        let first = distinct_options(&rows, Dimension::Country);
        let second = distinct_options(&rows, Dimension::Country);
        assert_eq!(first, second);
    }

    #[test]
    fn test_date_bounds() {
        let rows = vec![row(9, "US"), row(2, "US"), row(5, "US")];
        let bounds = date_bounds(&rows).unwrap();
        assert_eq!(bounds.start, day(2));
        assert_eq!(bounds.end, day(9));
        assert!(date_bounds(&[]).is_none());
    }

    #[test]
    fn test_extract_for_page_dimensions() {
        let rows = vec![row(1, "US").with_dimension(Dimension::City, "Austin")];
        let options = FilterOptions::extract(&rows, &[Dimension::Country, Dimension::City]);
        assert_eq!(options.dimensions.len(), 2);
        assert_eq!(options.dimensions[&Dimension::City], vec!["Austin"]);
    }
}
