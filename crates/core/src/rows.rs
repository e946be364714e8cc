//! Event row model shared by every dashboard page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Placeholder stored for null or blank dimension values.
pub const UNKNOWN: &str = "Unknown";

/// A filterable dimension attribute of an event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Country,
    Region,
    City,
    Device,
    AppVersion,
    OsVersion,
    UserType,
    InstallType,
}

impl Dimension {
    pub const ALL: [Dimension; 8] = [
        Self::Country,
        Self::Region,
        Self::City,
        Self::Device,
        Self::AppVersion,
        Self::OsVersion,
        Self::UserType,
        Self::InstallType,
    ];

    /// Column name used in query strings and option lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Region => "region",
            Self::City => "city",
            Self::Device => "device",
            Self::AppVersion => "app_version",
            Self::OsVersion => "os_version",
            Self::UserType => "user_type",
            Self::InstallType => "install_type",
        }
    }

    /// Human-readable label for filter widgets.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::Region => "Region",
            Self::City => "City",
            Self::Device => "Device",
            Self::AppVersion => "App Version",
            Self::OsVersion => "OS Version",
            Self::UserType => "User Type",
            Self::InstallType => "Install Type",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }
}

/// Numeric attributes carried by some queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Video watch time in seconds
    DurationSeconds,
    /// Maximum scroll depth percentage reached
    ScrollPercent,
    /// Pre-aggregated user count
    UsersCount,
}

/// Which identifier a distinct count runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserKey {
    /// Pseudonymous device identifier
    Device,
    /// Logged-in account identifier
    Account,
}

/// Dimension values of a row, normalized to [`UNKNOWN`] when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub country: String,
    pub region: String,
    pub city: String,
    pub device: String,
    pub app_version: String,
    pub os_version: String,
    pub user_type: String,
    pub install_type: String,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            country: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            device: UNKNOWN.to_string(),
            app_version: UNKNOWN.to_string(),
            os_version: UNKNOWN.to_string(),
            user_type: UNKNOWN.to_string(),
            install_type: UNKNOWN.to_string(),
        }
    }
}

impl Dimensions {
    pub fn get(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Country => &self.country,
            Dimension::Region => &self.region,
            Dimension::City => &self.city,
            Dimension::Device => &self.device,
            Dimension::AppVersion => &self.app_version,
            Dimension::OsVersion => &self.os_version,
            Dimension::UserType => &self.user_type,
            Dimension::InstallType => &self.install_type,
        }
    }

    /// Sets a dimension, coercing null and blank values to [`UNKNOWN`].
    pub fn set(&mut self, dimension: Dimension, value: Option<&str>) {
        let value = normalize_dimension(value);
        match dimension {
            Dimension::Country => self.country = value,
            Dimension::Region => self.region = value,
            Dimension::City => self.city = value,
            Dimension::Device => self.device = value,
            Dimension::AppVersion => self.app_version = value,
            Dimension::OsVersion => self.os_version = value,
            Dimension::UserType => self.user_type = value,
            Dimension::InstallType => self.install_type = value,
        }
    }
}

/// One observation of a user doing something on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub date: NaiveDate,
    pub user_id: Option<String>,
    pub account_id: Option<String>,
    pub event_name: Option<String>,
    pub screen_name: Option<String>,
    pub view_id: Option<String>,
    pub dimensions: Dimensions,
    pub duration_seconds: Option<f64>,
    pub scroll_percent: Option<f64>,
    pub users_count: Option<f64>,
}

impl EventRow {
    /// Creates a bare row for a user on a date.
    pub fn new(date: NaiveDate, user_id: impl Into<String>) -> Self {
        Self {
            date,
            user_id: Some(user_id.into()),
            account_id: None,
            event_name: None,
            screen_name: None,
            view_id: None,
            dimensions: Dimensions::default(),
            duration_seconds: None,
            scroll_percent: None,
            users_count: None,
        }
    }

    pub fn with_event(mut self, event: &str, screen: Option<&str>) -> Self {
        self.event_name = Some(event.to_string());
        self.screen_name = screen.map(str::to_string);
        self
    }

    pub fn with_view(mut self, view: &str) -> Self {
        self.view_id = Some(view.to_string());
        self
    }

    pub fn with_account(mut self, account: &str) -> Self {
        self.account_id = Some(account.to_string());
        self
    }

    pub fn with_dimension(mut self, dimension: Dimension, value: &str) -> Self {
        self.dimensions.set(dimension, Some(value));
        self
    }

    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        match metric {
            Metric::DurationSeconds => self.duration_seconds = Some(value),
            Metric::ScrollPercent => self.scroll_percent = Some(value),
            Metric::UsersCount => self.users_count = Some(value),
        }
        self
    }

    pub fn dimension(&self, dimension: Dimension) -> &str {
        self.dimensions.get(dimension)
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::DurationSeconds => self.duration_seconds,
            Metric::ScrollPercent => self.scroll_percent,
            Metric::UsersCount => self.users_count,
        }
    }

    pub fn user(&self, key: UserKey) -> Option<&str> {
        match key {
            UserKey::Device => self.user_id.as_deref(),
            UserKey::Account => self.account_id.as_deref(),
        }
        .filter(|id| !id.is_empty())
    }
}

fn normalize_dimension(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Parses a warehouse date in `YYYYMMDD` or `YYYY-MM-DD` form.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    let format = if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        "%Y%m%d"
    } else {
        "%Y-%m-%d"
    };

    NaiveDate::parse_from_str(raw, format)
        .map_err(|e| Error::validation(format!("invalid date '{}': {}", raw, e)))
}
