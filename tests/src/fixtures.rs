//! Test fixtures and row generators.

use chrono::NaiveDate;
use dashboard_core::{Dimension, EventRow, Metric};

/// A day in March 2024.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

/// Web app events over two days across two countries.
pub fn web_rows() -> Vec<EventRow> {
    let web = |d: u32, device: &str, event: &str, country: &str, user_type: &str| {
        EventRow::new(day(d), device)
            .with_event(event, None)
            .with_dimension(Dimension::Device, device)
            .with_dimension(Dimension::Country, country)
            .with_dimension(Dimension::UserType, user_type)
    };

    vec![
        web(1, "dev-1", "home_page_view", "India", "New User"),
        web(1, "dev-2", "home_page_view", "US", "Returning User"),
        web(1, "dev-1", "Open_App_Playstore", "India", "New User"),
        web(2, "dev-3", "home_page_view", "India", "Returning User"),
        web(2, "dev-3", "home_page_view", "India", "Returning User"),
    ]
}

/// Onboarding events: four devices on one day.
pub fn onboarding_rows() -> Vec<EventRow> {
    let android = |device: &str, event: Option<(&str, &str)>| {
        let row = EventRow::new(day(5), device)
            .with_dimension(Dimension::AppVersion, "2.1.0")
            .with_dimension(Dimension::OsVersion, "14");
        match event {
            Some((name, screen)) => row.with_event(name, Some(screen)),
            None => row,
        }
    };

    vec![
        android("a1", Some(("screen_load", "splash_screen"))),
        android("a1", Some(("screen_load", "home_screen"))),
        android("a2", Some(("screen_load", "splash_screen"))),
        android("a3", Some(("view_click", "login_screen"))),
        android("a4", None),
    ]
}

/// Scroll depth rows: one bounce and one reader per day.
pub fn scroll_rows() -> Vec<EventRow> {
    vec![
        EventRow::new(day(1), "s1").with_metric(Metric::ScrollPercent, 0.0),
        EventRow::new(day(1), "s2").with_metric(Metric::ScrollPercent, 100.0),
        EventRow::new(day(2), "s3").with_metric(Metric::ScrollPercent, 45.0),
    ]
}
