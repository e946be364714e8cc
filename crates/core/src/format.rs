//! Display ordering, number formatting and CSV export.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::{ColumnKind, Table};

/// Name of the date index column in every export.
pub const DATES_HEADER: &str = "Dates";

/// One column of a page's canonical display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayColumn {
    /// Column name in the computed table
    pub source: &'static str,
    /// Header shown to the user
    pub label: &'static str,
    /// Kind used when the column has to be synthesized
    pub kind: ColumnKind,
}

impl DisplayColumn {
    pub const fn count(name: &'static str) -> Self {
        Self {
            source: name,
            label: name,
            kind: ColumnKind::Count,
        }
    }

    pub const fn percent(name: &'static str) -> Self {
        Self {
            source: name,
            label: name,
            kind: ColumnKind::Percent,
        }
    }

    pub const fn renamed(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

/// Canonical column order of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub columns: Vec<DisplayColumn>,
}

impl Layout {
    pub fn new(columns: Vec<DisplayColumn>) -> Self {
        Self { columns }
    }

    pub fn counts(names: &[&'static str]) -> Self {
        Self::new(names.iter().map(|&n| DisplayColumn::count(n)).collect())
    }
}

/// Formats a single cell value.
pub fn format_value(value: f64, kind: ColumnKind) -> String {
    match kind {
        ColumnKind::Count => format!("{:.0}", value),
        ColumnKind::Percent => format!("{:.2}%", value),
    }
}

/// Parses a formatted cell back into a number.
pub fn parse_value(cell: &str) -> Result<f64> {
    cell.trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|e| Error::validation(format!("invalid cell '{}': {}", cell, e)))
}

/// A table rendered to display strings, newest date first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTable {
    /// `Dates` followed by the display labels
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FormattedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes to CSV with a header row.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::export(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| Error::export(e.to_string()))
    }

    /// Reads an export produced by [`FormattedTable::to_csv`].
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());

        let header = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(Self { header, rows })
    }
}

/// Applies a layout: synthesizes missing columns as zeros, drops columns the
/// layout does not list, renames, sorts dates descending and formats cells.
pub fn present(table: &Table, layout: &Layout) -> FormattedTable {
    let mut table = table.clone();
    for col in &layout.columns {
        table.ensure_column(col.source, col.kind);
    }

    let mut header = Vec::with_capacity(layout.columns.len() + 1);
    header.push(DATES_HEADER.to_string());
    header.extend(layout.columns.iter().map(|c| c.label.to_string()));

    let rows = table
        .dates()
        .iter()
        .enumerate()
        .rev()
        .map(|(i, date)| {
            let mut cells = Vec::with_capacity(header.len());
            cells.push(date.format("%Y-%m-%d").to_string());
            for display in &layout.columns {
                let cell = table
                    .column(display.source)
                    .map(|c| format_value(c.values[i], c.kind))
                    .unwrap_or_default();
                cells.push(cell);
            }
            cells
        })
        .collect();

    FormattedTable { header, rows }
}
