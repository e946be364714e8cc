//! Decoding of warehouse result rows.

use clickhouse::Row;
use dashboard_core::rows::Dimensions;
use dashboard_core::{parse_date, Dimension, EventRow, Result};
use serde::Deserialize;
use telemetry::metrics;
use tracing::warn;

/// One result row in the column order every page query projects.
#[derive(Debug, Clone, Default, Row, Deserialize)]
pub struct WarehouseRow {
    pub event_date: String,
    pub user_id: Option<String>,
    pub account_id: Option<String>,
    pub event_name: Option<String>,
    pub screen_name: Option<String>,
    pub view_id: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub device: Option<String>,
    pub app_version: Option<String>,
    pub os_version: Option<String>,
    pub user_type: Option<String>,
    pub install_type: Option<String>,
    pub duration_seconds: Option<f64>,
    pub scroll_percent: Option<f64>,
    pub users_count: Option<f64>,
}

impl WarehouseRow {
    /// Converts into an event row, normalizing blank dimensions.
    pub fn into_event_row(self) -> Result<EventRow> {
        let date = parse_date(&self.event_date)?;

        let mut dimensions = Dimensions::default();
        for (dimension, value) in [
            (Dimension::Country, &self.country),
            (Dimension::Region, &self.region),
            (Dimension::City, &self.city),
            (Dimension::Device, &self.device),
            (Dimension::AppVersion, &self.app_version),
            (Dimension::OsVersion, &self.os_version),
            (Dimension::UserType, &self.user_type),
            (Dimension::InstallType, &self.install_type),
        ] {
            dimensions.set(dimension, value.as_deref());
        }

        Ok(EventRow {
            date,
            user_id: self.user_id,
            account_id: self.account_id,
            event_name: self.event_name,
            screen_name: self.screen_name,
            view_id: self.view_id,
            dimensions,
            duration_seconds: self.duration_seconds,
            scroll_percent: self.scroll_percent,
            users_count: self.users_count,
        })
    }
}

/// Converts a result set, skipping rows whose date cannot be parsed.
pub fn convert_rows(rows: Vec<WarehouseRow>) -> Vec<EventRow> {
    let total = rows.len();
    let mut skipped = 0usize;
    let mut first_bad: Option<String> = None;

    let converted: Vec<EventRow> = rows
        .into_iter()
        .filter_map(|row| {
            let raw = row.event_date.clone();
            match row.into_event_row() {
                Ok(event) => Some(event),
                Err(_) => {
                    skipped += 1;
                    first_bad.get_or_insert(raw);
                    None
                }
            }
        })
        .collect();

    if skipped > 0 {
        metrics().rows_skipped.inc_by(skipped as u64);
        warn!(
            skipped,
            total,
            example = first_bad.as_deref().unwrap_or_default(),
            "Skipped warehouse rows with unparseable dates"
        );
    }
    metrics().rows_loaded.inc_by(converted.len() as u64);

    converted
}
