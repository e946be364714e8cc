//! Date-indexed dense table produced by the pivot and derived calculators.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a column's values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Whole numbers, zero decimals
    Count,
    /// Two decimals with a `%` suffix
    Percent,
}

/// A named column with one value per table date.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<f64>,
}

/// Dense table keyed by date rows and named columns.
///
/// Dates are kept ascending and unique; every column holds exactly one value
/// per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl Table {
    /// Empty-columned table over the given dates (sorted and de-duplicated).
    pub fn with_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        Self {
            dates: dates.into_iter().collect(),
            columns: Vec::new(),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Value of a cell, if both the date and the column exist.
    pub fn value(&self, date: NaiveDate, column: &str) -> Option<f64> {
        let idx = self.dates.binary_search(&date).ok()?;
        self.column(column).map(|c| c.values[idx])
    }

    /// Adds or replaces a column. Values must align with [`Table::dates`].
    pub fn set_column(&mut self, name: impl Into<String>, kind: ColumnKind, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.dates.len());
        let name = name.into();
        match self.column_mut(&name) {
            Some(col) => {
                col.kind = kind;
                col.values = values;
            }
            None => self.columns.push(Column { name, kind, values }),
        }
    }

    /// Adds a zero-filled column unless one with that name exists.
    pub fn ensure_column(&mut self, name: &str, kind: ColumnKind) {
        if !self.has_column(name) {
            let zeros = vec![0.0; self.dates.len()];
            self.columns.push(Column {
                name: name.to_string(),
                kind,
                values: zeros,
            });
        }
    }

    /// Outer-joins `other` on date. Missing cells on either side become 0.
    /// Columns of `other` replace same-named columns of `self`.
    pub fn merge(mut self, other: Table) -> Table {
        let merged: BTreeSet<NaiveDate> = self.dates.iter().chain(other.dates.iter()).copied().collect();
        let merged: Vec<NaiveDate> = merged.into_iter().collect();

        if merged != self.dates {
            self = self.reindexed(&merged);
        }
        let other = if merged != other.dates {
            other.reindexed(&merged)
        } else {
            other
        };

        for col in other.columns {
            self.set_column(col.name, col.kind, col.values);
        }
        self
    }

    fn reindexed(self, dates: &[NaiveDate]) -> Table {
        let columns = self
            .columns
            .into_iter()
            .map(|col| {
                let values = dates
                    .iter()
                    .map(|d| match self.dates.binary_search(d) {
                        Ok(i) => col.values[i],
                        Err(_) => 0.0,
                    })
                    .collect();
                Column { values, ..col }
            })
            .collect();

        Table {
            dates: dates.to_vec(),
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_dates_sorted_and_unique() {
        let table = Table::with_dates([day(3), day(1), day(3)]);
        assert_eq!(table.dates(), &[day(1), day(3)]);
    }

    #[test]
    fn test_ensure_column_zero_fills() {
        let mut table = Table::with_dates([day(1), day(2)]);
        table.ensure_column("Signups", ColumnKind::Count);
        assert_eq!(table.value(day(2), "Signups"), Some(0.0));

        table.set_column("Signups", ColumnKind::Count, vec![4.0, 5.0]);
        table.ensure_column("Signups", ColumnKind::Count);
        assert_eq!(table.value(day(2), "Signups"), Some(5.0));
    }

    #[test]
    fn test_merge_outer_joins_dates() {
        let mut left = Table::with_dates([day(1), day(2)]);
        left.set_column("A", ColumnKind::Count, vec![1.0, 2.0]);
        let mut right = Table::with_dates([day(2), day(3)]);
        right.set_column("B", ColumnKind::Percent, vec![50.0, 75.0]);

        let merged = left.merge(right);
        assert_eq!(merged.dates(), &[day(1), day(2), day(3)]);
        assert_eq!(merged.value(day(3), "A"), Some(0.0));
        assert_eq!(merged.value(day(1), "B"), Some(0.0));
        assert_eq!(merged.value(day(2), "B"), Some(50.0));
        assert_eq!(merged.column_names(), vec!["A", "B"]);
    }
}
