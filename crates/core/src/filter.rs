//! Row filtering by date range and dimension value sets.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rows::{parse_date, Dimension, EventRow};

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// A user's filter choices for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub date_range: DateRange,
    accepted: BTreeMap<Dimension, BTreeSet<String>>,
}

impl FilterSelection {
    /// Selection covering `date_range` with no dimension restrictions.
    pub fn new(date_range: DateRange) -> Self {
        Self {
            date_range,
            accepted: BTreeMap::new(),
        }
    }

    /// Restricts a dimension to the given values. An empty set accepts all.
    pub fn with_values<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted
            .insert(dimension, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn accepted(&self, dimension: Dimension) -> Option<&BTreeSet<String>> {
        self.accepted.get(&dimension).filter(|set| !set.is_empty())
    }

    pub fn matches(&self, row: &EventRow) -> bool {
        self.date_range.contains(row.date)
            && self
                .accepted
                .iter()
                .filter(|(_, set)| !set.is_empty())
                .all(|(dim, set)| set.contains(row.dimension(*dim)))
    }

    /// Rows satisfying every active condition, in input order.
    pub fn apply<'a>(&self, rows: &'a [EventRow]) -> Vec<&'a EventRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    /// Builds a selection from raw query parameters in request order.
    ///
    /// `start`/`end` fall back to `default_range` (the last occurrence wins).
    /// Other keys must name one of `allowed` dimensions; each occurrence adds
    /// one accepted value, so values may contain commas.
    pub fn from_params(
        params: &[(String, String)],
        default_range: Option<DateRange>,
        allowed: &[Dimension],
    ) -> Result<Self> {
        let last = |name: &str| {
            params
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, value)| parse_date(value))
                .transpose()
        };
        let start = last("start")?;
        let end = last("end")?;

        let date_range = match (start, end, default_range) {
            (Some(s), Some(e), _) => DateRange::new(s, e),
            (Some(s), None, Some(d)) => DateRange::new(s, d.end),
            (None, Some(e), Some(d)) => DateRange::new(d.start, e),
            (None, None, Some(d)) => d,
            (Some(s), None, None) => DateRange::single(s),
            (None, Some(e), None) => DateRange::single(e),
            (None, None, None) => {
                // Nothing loaded and nothing asked for: an empty window.
                let today = chrono::Utc::now().date_naive();
                DateRange::single(today)
            }
        };

        let mut accepted: BTreeMap<Dimension, BTreeSet<String>> = BTreeMap::new();
        for (key, raw) in params {
            if key == "start" || key == "end" {
                continue;
            }
            let dimension = Dimension::parse(key)
                .filter(|d| allowed.contains(d))
                .ok_or_else(|| Error::validation(format!("unknown filter '{}'", key)))?;
            let values = accepted.entry(dimension).or_default();
            let value = raw.trim();
            if !value.is_empty() {
                values.insert(value.to_string());
            }
        }

        let mut selection = Self::new(date_range);
        selection.accepted = accepted;
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::UNKNOWN;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn rows() -> Vec<EventRow> {
        vec![
            EventRow::new(day(1), "u1").with_dimension(Dimension::Country, "US"),
            EventRow::new(day(2), "u2").with_dimension(Dimension::Country, "India"),
            EventRow::new(day(2), "u3"),
            EventRow::new(day(3), "u4").with_dimension(Dimension::Country, "US"),
        ]
    }

    #[test]
    fn test_single_day_range() {
        let rows = rows();
        let filtered = FilterSelection::new(DateRange::single(day(2))).apply(&rows);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.date == day(2)));

        let none = FilterSelection::new(DateRange::single(day(9))).apply(&rows);
        assert!(none.is_empty());
    }

    #[test]
    fn test_noop_with_full_range_and_empty_sets() {
        let rows = rows();
        let selection = FilterSelection::new(DateRange::new(day(1), day(3)))
            .with_values(Dimension::Country, Vec::<String>::new());
        assert_eq!(selection.apply(&rows).len(), rows.len());
    }

    #[test]
    fn test_dimension_membership() {
        let rows = rows();
        let selection =
            FilterSelection::new(DateRange::new(day(1), day(3))).with_values(Dimension::Country, ["US"]);
        let filtered = selection.apply(&rows);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.dimension(Dimension::Country) == "US"));
    }

    #[test]
    fn test_null_dimension_matches_placeholder_only() {
        let rows = rows();
        let selection = FilterSelection::new(DateRange::new(day(1), day(3)))
            .with_values(Dimension::Country, [UNKNOWN]);
        let filtered = selection.apply(&rows);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].user_id.as_deref(), Some("u3"));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let rows = rows();
        let filtered = FilterSelection::new(DateRange::new(day(3), day(1))).apply(&rows);
        assert!(filtered.is_empty());
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_params() {
        let params = params(&[
            ("start", "2024-01-02"),
            ("country", "US"),
            ("country", " India "),
        ]);

        let default = DateRange::new(day(1), day(3));
        let selection =
            FilterSelection::from_params(&params, Some(default), &[Dimension::Country]).unwrap();

        assert_eq!(selection.date_range, DateRange::new(day(2), day(3)));
        let accepted = selection.accepted(Dimension::Country).unwrap();
        assert_eq!(accepted.len(), 2);
        assert!(accepted.contains("US") && accepted.contains("India"));
    }

    #[test]
    fn test_from_params_keeps_commas_in_values() {
        let rows = vec![
            EventRow::new(day(1), "u1").with_dimension(Dimension::City, "Washington, D.C."),
            EventRow::new(day(1), "u2").with_dimension(Dimension::City, "Washington"),
        ];
        let params = params(&[("city", "Washington, D.C.")]);
        let selection =
            FilterSelection::from_params(&params, Some(DateRange::single(day(1))), &[Dimension::City])
                .unwrap();

        let filtered = selection.apply(&rows);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_from_params_rejects_unlisted_dimension() {
        let params = params(&[("device", "mobile")]);
        let result = FilterSelection::from_params(&params, None, &[Dimension::Country]);
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
