//! Row model, filters, pivots and formatting for the analytics dashboard pages.

pub mod catalog;
pub mod classify;
pub mod error;
pub mod filter;
pub mod format;
pub mod options;
pub mod percent;
pub mod pipeline;
pub mod pivot;
pub mod rows;
pub mod table;

pub use catalog::{FilterField, PageDefinition, PageSummary, Report};
pub use error::{Error, Result, WarehouseErrorCode};
pub use filter::{DateRange, FilterSelection};
pub use format::{FormattedTable, Layout};
pub use options::FilterOptions;
pub use pipeline::{render, RenderedPage, NO_DATA_NOTICE};
pub use rows::{parse_date, Dimension, EventRow, Metric, UserKey, UNKNOWN};
pub use table::{ColumnKind, Table};
