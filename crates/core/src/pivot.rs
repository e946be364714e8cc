//! Date × category pivot with independent total columns.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::classify::Classifier;
use crate::rows::{EventRow, Metric, UserKey};
use crate::table::{ColumnKind, Table};

/// How rows sharing a cell are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Number of distinct identifiers; null identifiers are ignored
    DistinctUsers(UserKey),
    /// Sum of a metric; null metrics are ignored
    Sum(Metric),
}

/// A column computed over all rows of a date, regardless of category.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalColumn {
    pub name: &'static str,
    pub aggregation: Aggregation,
}

impl TotalColumn {
    pub const fn new(name: &'static str, aggregation: Aggregation) -> Self {
        Self { name, aggregation }
    }
}

/// Pivot parameters for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotSpec {
    /// Category columns, in display order
    pub vocabulary: Vec<&'static str>,
    pub aggregation: Aggregation,
    pub totals: Vec<TotalColumn>,
}

/// Running aggregate for one cell.
#[derive(Debug)]
enum Accumulator<'a> {
    Distinct(HashSet<&'a str>),
    Sum(f64),
}

impl<'a> Accumulator<'a> {
    fn new(aggregation: Aggregation) -> Self {
        match aggregation {
            Aggregation::DistinctUsers(_) => Self::Distinct(HashSet::new()),
            Aggregation::Sum(_) => Self::Sum(0.0),
        }
    }

    fn add(&mut self, aggregation: Aggregation, row: &'a EventRow) {
        match (self, aggregation) {
            (Self::Distinct(ids), Aggregation::DistinctUsers(key)) => {
                if let Some(id) = row.user(key) {
                    ids.insert(id);
                }
            }
            (Self::Sum(total), Aggregation::Sum(metric)) => {
                if let Some(v) = row.metric(metric) {
                    *total += v;
                }
            }
            _ => {}
        }
    }

    fn value(&self) -> f64 {
        match self {
            Self::Distinct(ids) => ids.len() as f64,
            Self::Sum(total) => *total,
        }
    }
}

/// Pivots rows into one row per date present and one column per vocabulary
/// label, zero-filled, followed by the total columns.
///
/// Labels outside the vocabulary contribute to totals only. Totals are
/// aggregated over every row of the date, so they are not the sum of the
/// category columns.
pub fn pivot(rows: &[&EventRow], classifier: &Classifier, spec: &PivotSpec) -> Table {
    let mut cells: BTreeMap<NaiveDate, HashMap<String, Accumulator<'_>>> = BTreeMap::new();
    let mut totals: BTreeMap<NaiveDate, Vec<Accumulator<'_>>> = BTreeMap::new();
    let mut unlisted = 0usize;

    for &row in rows {
        let date_totals = totals.entry(row.date).or_insert_with(|| {
            spec.totals
                .iter()
                .map(|t| Accumulator::new(t.aggregation))
                .collect()
        });
        for (acc, total) in date_totals.iter_mut().zip(&spec.totals) {
            acc.add(total.aggregation, row);
        }

        let date_cells = cells.entry(row.date).or_default();
        let Some(label) = classifier.classify_row(row) else {
            continue;
        };
        if !spec.vocabulary.iter().any(|v| *v == label) {
            unlisted += 1;
            continue;
        }
        date_cells
            .entry(label)
            .or_insert_with(|| Accumulator::new(spec.aggregation))
            .add(spec.aggregation, row);
    }

    if unlisted > 0 {
        debug!(rows = unlisted, "Rows with labels outside the page vocabulary");
    }

    let mut table = Table::with_dates(cells.keys().copied());

    for &label in &spec.vocabulary {
        let values = cells
            .values()
            .map(|date_cells| date_cells.get(label).map_or(0.0, Accumulator::value))
            .collect();
        table.set_column(label, ColumnKind::Count, values);
    }

    for (i, total) in spec.totals.iter().enumerate() {
        let values = totals.values().map(|accs| accs[i].value()).collect();
        table.set_column(total.name, ColumnKind::Count, values);
    }

    table
}
