//! Filter, reshape and format one page.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{PageDefinition, PivotReport, Report, ScrollReport};
use crate::filter::FilterSelection;
use crate::format::{present, FormattedTable};
use crate::percent::{apply_percentages, duration_buckets, scroll_depth};
use crate::pivot::pivot;
use crate::rows::EventRow;
use crate::table::Table;

/// Shown instead of a table when the filters leave nothing.
pub const NO_DATA_NOTICE: &str = "No data available for the selected filters.";

/// Output of one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub slug: String,
    pub title: String,
    pub table: FormattedTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Runs a page's report over the rows matching `selection`.
pub fn render(page: &PageDefinition, rows: &[EventRow], selection: &FilterSelection) -> RenderedPage {
    let filtered = selection.apply(rows);
    debug!(
        page = page.slug,
        loaded = rows.len(),
        kept = filtered.len(),
        "Applied filters"
    );

    let table = match &page.report {
        Report::Pivot(report) => pivot_table(&filtered, report),
        Report::ScrollDepth(report) => scroll_table(&filtered, report),
    };

    let formatted = present(&table, page.report.layout());
    let notice = formatted.is_empty().then(|| NO_DATA_NOTICE.to_string());

    RenderedPage {
        slug: page.slug.to_string(),
        title: page.title.to_string(),
        table: formatted,
        notice,
    }
}

fn pivot_table(rows: &[&EventRow], report: &PivotReport) -> Table {
    let mut table = pivot(rows, &report.classifier, &report.pivot);

    if let Some(spec) = &report.percentages {
        apply_percentages(&mut table, spec);
    }

    match report.durations {
        Some(step) => table.merge(duration_buckets(rows, step.user_key, step.metric)),
        None => table,
    }
}

fn scroll_table(rows: &[&EventRow], report: &ScrollReport) -> Table {
    scroll_depth(rows, report.user_key)
}
