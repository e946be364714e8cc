//! Percentage and derived-column calculators.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::rows::{EventRow, Metric, UserKey};
use crate::table::{ColumnKind, Table};

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100` rounded to two decimals, or 0 when `whole` is 0.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        round2(part / whole * 100.0)
    }
}

/// Where percentage values go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentMode {
    /// Overwrite each count column with its percentage
    Replace,
    /// Keep the counts and append `"{name}{suffix}"` percentage columns
    Augment { suffix: &'static str },
}

/// Percentage step of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentSpec {
    pub denominator: &'static str,
    /// Count columns that stay counts (the denominator always does)
    pub keep_counts: Vec<&'static str>,
    pub mode: PercentMode,
}

/// Expresses every count column as a percentage of `spec.denominator`.
///
/// Missing denominator columns count as zero, which turns every percentage
/// into 0.
pub fn apply_percentages(table: &mut Table, spec: &PercentSpec) {
    let denominators: Vec<f64> = match table.column(spec.denominator) {
        Some(col) => col.values.clone(),
        None => vec![0.0; table.dates().len()],
    };

    let targets: Vec<String> = table
        .columns()
        .iter()
        .filter(|c| c.kind == ColumnKind::Count)
        .filter(|c| c.name != spec.denominator && !spec.keep_counts.iter().any(|k| *k == c.name))
        .map(|c| c.name.clone())
        .collect();

    for name in targets {
        let Some(col) = table.column(&name) else {
            continue;
        };
        let values: Vec<f64> = col
            .values
            .iter()
            .zip(&denominators)
            .map(|(&v, &d)| percentage(v, d))
            .collect();

        match &spec.mode {
            PercentMode::Replace => table.set_column(name, ColumnKind::Percent, values),
            PercentMode::Augment { suffix } => {
                table.set_column(format!("{}{}", name, suffix), ColumnKind::Percent, values)
            }
        }
    }
}

pub const WATCH_NONE: &str = "User didnt watch the video";
pub const WATCH_1_10: &str = "User watched the video for 1-10 seconds";
pub const WATCH_11_30: &str = "User watched the video for 11-30 seconds";
pub const WATCH_31_60: &str = "User watched the video for 31-60 seconds";
pub const WATCH_61_120: &str = "User watched the video for 61-120 seconds";
pub const WATCH_OVER_120: &str = "User watched the video for more than 120 seconds";

/// Watch-duration buckets: `{0}`, then upper-inclusive ranges ending at 10,
/// 30, 60 and 120 seconds, then everything above.
pub const DURATION_BUCKETS: [&str; 6] = [
    WATCH_NONE,
    WATCH_1_10,
    WATCH_11_30,
    WATCH_31_60,
    WATCH_61_120,
    WATCH_OVER_120,
];

/// Index into [`DURATION_BUCKETS`] for a maximum duration.
pub fn duration_bucket(seconds: f64) -> usize {
    match seconds {
        s if s <= 0.0 || s.is_nan() => 0,
        s if s <= 10.0 => 1,
        s if s <= 30.0 => 2,
        s if s <= 60.0 => 3,
        s if s <= 120.0 => 4,
        _ => 5,
    }
}

/// Per-date, per-user maximum of a metric. Null metrics count as 0.
fn max_per_user<'a>(
    rows: &[&'a EventRow],
    user_key: UserKey,
    metric: Metric,
) -> BTreeMap<NaiveDate, HashMap<&'a str, f64>> {
    let mut out: BTreeMap<NaiveDate, HashMap<&'a str, f64>> = BTreeMap::new();
    for &row in rows {
        let users = out.entry(row.date).or_default();
        let Some(user) = row.user(user_key) else {
            continue;
        };
        let value = row.metric(metric).unwrap_or(0.0);
        users
            .entry(user)
            .and_modify(|m| *m = m.max(value))
            .or_insert(value);
    }
    out
}

/// Share of users per watch-duration bucket for each date, using each user's
/// longest observed duration. Dates without users get all zeros.
pub fn duration_buckets(rows: &[&EventRow], user_key: UserKey, metric: Metric) -> Table {
    let per_user = max_per_user(rows, user_key, metric);
    let mut table = Table::with_dates(per_user.keys().copied());
    let mut columns = vec![Vec::with_capacity(per_user.len()); DURATION_BUCKETS.len()];

    for users in per_user.values() {
        let mut counts = [0usize; DURATION_BUCKETS.len()];
        for &max in users.values() {
            counts[duration_bucket(max)] += 1;
        }
        let total = users.len() as f64;
        for (col, count) in columns.iter_mut().zip(counts) {
            col.push(percentage(count as f64, total));
        }
    }

    for (name, values) in DURATION_BUCKETS.iter().zip(columns) {
        table.set_column(*name, ColumnKind::Percent, values);
    }
    table
}

pub const SCROLL_TOTAL_USERS: &str = "Total Users";
pub const SCROLL_INTERACTED: &str = "Interacted Users";
pub const SCROLL_BOUNCE: &str = "Bounce%";

/// Scroll depth thresholds and their column labels.
pub const SCROLL_THRESHOLDS: [(f64, &str); 5] = [
    (20.0, "≥20%"),
    (40.0, "≥40%"),
    (60.0, "≥60%"),
    (80.0, "≥80%"),
    (100.0, "100%"),
];

/// Scroll depth summary per date: total and interacted users, bounce rate,
/// and the share of users whose deepest scroll reached each threshold.
pub fn scroll_depth(rows: &[&EventRow], user_key: UserKey) -> Table {
    let per_user = max_per_user(rows, user_key, Metric::ScrollPercent);
    let mut table = Table::with_dates(per_user.keys().copied());

    let mut totals = Vec::with_capacity(per_user.len());
    let mut interacted = Vec::with_capacity(per_user.len());
    let mut bounce = Vec::with_capacity(per_user.len());
    let mut reached = vec![Vec::with_capacity(per_user.len()); SCROLL_THRESHOLDS.len()];

    for users in per_user.values() {
        let total = users.len() as f64;
        let active = users.values().filter(|&&m| m > 0.0).count() as f64;
        totals.push(total);
        interacted.push(active);
        bounce.push(percentage(total - active, total));

        for (col, (threshold, _)) in reached.iter_mut().zip(SCROLL_THRESHOLDS) {
            let count = users.values().filter(|&&m| m >= threshold).count() as f64;
            col.push(percentage(count, total));
        }
    }

    table.set_column(SCROLL_TOTAL_USERS, ColumnKind::Count, totals);
    table.set_column(SCROLL_INTERACTED, ColumnKind::Count, interacted);
    table.set_column(SCROLL_BOUNCE, ColumnKind::Percent, bounce);
    for ((_, label), values) in SCROLL_THRESHOLDS.iter().zip(reached) {
        table.set_column(*label, ColumnKind::Percent, values);
    }
    table
}
