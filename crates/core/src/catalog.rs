//! Dashboard page definitions.
//!
//! Every query projects the same column list, in this order, so the warehouse
//! client can decode all pages into one row type:
//!
//! `event_date, user_id, account_id, event_name, screen_name, view_id,
//! country, region, city, device, app_version, os_version, user_type,
//! install_type, duration_seconds, scroll_percent, users_count`

use std::sync::LazyLock;
use std::time::Duration;

use serde::Serialize;

use crate::classify::{Classifier, Fallback, Rule};
use crate::error::{Error, Result};
use crate::format::{DisplayColumn, Layout};
use crate::percent::{
    PercentMode, PercentSpec, DURATION_BUCKETS, SCROLL_BOUNCE, SCROLL_INTERACTED, SCROLL_THRESHOLDS,
    SCROLL_TOTAL_USERS,
};
use crate::pivot::{Aggregation, PivotSpec, TotalColumn};
use crate::rows::{Dimension, Metric, UserKey};

pub const TOTAL_USERS: &str = "Total Users";
pub const LOGGED_IN_USERS: &str = "Logged-in Users";
pub const NO_CUSTOM_EVENT: &str = "No custom event";
pub const NO_EVENT: &str = "No Event";

/// Refresh interval shared by the dashboards.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Watch-duration buckets computed from one metric per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStep {
    pub user_key: UserKey,
    pub metric: Metric,
}

/// Classify, pivot, optional percentages and optional duration buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotReport {
    pub classifier: Classifier,
    pub pivot: PivotSpec,
    pub percentages: Option<PercentSpec>,
    pub durations: Option<DurationStep>,
    pub layout: Layout,
}

/// Per-date scroll depth summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollReport {
    pub user_key: UserKey,
    pub layout: Layout,
}

/// How a page turns filtered rows into a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Pivot(PivotReport),
    ScrollDepth(ScrollReport),
}

impl Report {
    pub fn layout(&self) -> &Layout {
        match self {
            Self::Pivot(report) => &report.layout,
            Self::ScrollDepth(report) => &report.layout,
        }
    }
}

/// One dashboard page: its query, filters and report.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDefinition {
    pub slug: &'static str,
    pub title: &'static str,
    pub query: &'static str,
    pub cache_ttl: Duration,
    /// Filterable dimensions, in widget order
    pub dimensions: Vec<Dimension>,
    pub report: Report,
    pub export_file: &'static str,
}

/// A filter widget offered by a page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FilterField {
    /// Query parameter name
    pub name: Dimension,
    pub label: &'static str,
}

/// Listing entry for a page.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub filters: Vec<FilterField>,
    pub cache_ttl_secs: u64,
}

impl PageDefinition {
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            slug: self.slug,
            title: self.title,
            filters: self
                .dimensions
                .iter()
                .map(|&name| FilterField {
                    name,
                    label: name.label(),
                })
                .collect(),
            cache_ttl_secs: self.cache_ttl.as_secs(),
        }
    }
}

static PAGES: LazyLock<Vec<PageDefinition>> = LazyLock::new(|| {
    vec![
        web_app_all_users(),
        scroll_depth(),
        android_onboarding_total_users(),
        android_onboarding_new_users(),
        android_explore_journey(),
        android_overview(),
    ]
});

/// All pages, in navigation order.
pub fn all() -> &'static [PageDefinition] {
    &PAGES
}

/// Looks up a page by slug.
pub fn find(slug: &str) -> Result<&'static PageDefinition> {
    all()
        .iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| Error::page_not_found(slug))
}

// Web app

pub const WEB_EVENTS: [&str; 9] = [
    "home_page_view",
    "Open_App_Appstore",
    "Open_App_Playstore",
    "Open_App_Yes_But_Kaise",
    "Open_App_Haan_Dost_Hain",
    "Open_App_Nudge_1",
    "Open_App_Nudge_2",
    "Open_App_Nudge_Floating",
    "Open_App_Whatsapp_Share_App_With_Friends",
];

const WEB_EVENTS_QUERY: &str = r#"
SELECT
    toString(t1.dates) AS event_date,
    toNullable(t1.user_id) AS user_id,
    CAST(NULL AS Nullable(String)) AS account_id,
    toNullable(t1.event_name) AS event_name,
    CAST(NULL AS Nullable(String)) AS screen_name,
    CAST(NULL AS Nullable(String)) AS view_id,
    toNullable(t1.country) AS country,
    toNullable(t1.region) AS region,
    toNullable(t1.city) AS city,
    toNullable(t1.device) AS device,
    CAST(NULL AS Nullable(String)) AS app_version,
    CAST(NULL AS Nullable(String)) AS os_version,
    toNullable(if(t1.dates = t2.dates, 'New User', 'Returning User')) AS user_type,
    CAST(NULL AS Nullable(String)) AS install_type,
    CAST(NULL AS Nullable(Float64)) AS duration_seconds,
    CAST(NULL AS Nullable(Float64)) AS scroll_percent,
    CAST(NULL AS Nullable(Float64)) AS users_count
FROM analytics.webapp_user_data AS t1
LEFT JOIN analytics.new_user AS t2 ON t1.user_id = t2.user_id
WHERE t1.event_name IN (
    'home_page_view',
    'Open_App_Playstore',
    'Open_App_Appstore',
    'Open_App_Yes_But_Kaise',
    'Open_App_Haan_Dost_Hain',
    'Open_App_Nudge_Floating',
    'Open_App_Nudge_1',
    'Open_App_Nudge_2',
    'Open_App_Whatsapp_Share_App_With_Friends'
)
"#;

fn web_app_all_users() -> PageDefinition {
    PageDefinition {
        slug: "web-app-all-users",
        title: "Web App All Users",
        query: WEB_EVENTS_QUERY,
        cache_ttl: DEFAULT_TTL,
        dimensions: vec![
            Dimension::Device,
            Dimension::UserType,
            Dimension::Country,
            Dimension::Region,
            Dimension::City,
        ],
        report: Report::Pivot(PivotReport {
            classifier: Classifier::EventName,
            pivot: PivotSpec {
                vocabulary: WEB_EVENTS.to_vec(),
                aggregation: Aggregation::DistinctUsers(UserKey::Device),
                totals: vec![],
            },
            percentages: None,
            durations: None,
            layout: Layout::counts(&WEB_EVENTS),
        }),
        export_file: "event_results.csv",
    }
}

const SCROLL_QUERY: &str = r#"
WITH
    visits AS (
        SELECT
            toString(t1.dates) AS dates,
            t1.user_id AS user_id,
            if(t1.dates = t2.dates, 'New User', 'Returning User') AS user_type
        FROM analytics.webapp_user_data AS t1
        LEFT JOIN analytics.new_user AS t2 ON t1.user_id = t2.user_id
        WHERE t1.event_name IN (
            'home_page_view',
            'Open_App_Playstore',
            'Open_App_Appstore',
            'Open_App_Yes_But_Kaise',
            'Open_App_Haan_Dost_Hain',
            'Open_App_Nudge_Floating',
            'Open_App_Nudge_1',
            'Open_App_Nudge_2',
            'Open_App_Whatsapp_Share_App_With_Friends'
        )
    ),
    scrolls AS (
        SELECT
            event_date AS dates,
            user_pseudo_id AS user_id,
            max(coalesce(percent_scrolled, 0)) AS max_scroll_percent
        FROM analytics.app_events
        WHERE event_name = 'Scroll'
        GROUP BY event_date, user_pseudo_id
    )
SELECT DISTINCT
    v.dates AS event_date,
    toNullable(v.user_id) AS user_id,
    CAST(NULL AS Nullable(String)) AS account_id,
    CAST(NULL AS Nullable(String)) AS event_name,
    CAST(NULL AS Nullable(String)) AS screen_name,
    CAST(NULL AS Nullable(String)) AS view_id,
    CAST(NULL AS Nullable(String)) AS country,
    CAST(NULL AS Nullable(String)) AS region,
    CAST(NULL AS Nullable(String)) AS city,
    CAST(NULL AS Nullable(String)) AS device,
    CAST(NULL AS Nullable(String)) AS app_version,
    CAST(NULL AS Nullable(String)) AS os_version,
    toNullable(v.user_type) AS user_type,
    CAST(NULL AS Nullable(String)) AS install_type,
    CAST(NULL AS Nullable(Float64)) AS duration_seconds,
    toNullable(toFloat64(coalesce(s.max_scroll_percent, 0))) AS scroll_percent,
    CAST(NULL AS Nullable(Float64)) AS users_count
FROM visits AS v
LEFT JOIN scrolls AS s ON v.dates = s.dates AND v.user_id = s.user_id
"#;

fn scroll_depth() -> PageDefinition {
    let mut columns = vec![
        DisplayColumn::count(SCROLL_TOTAL_USERS),
        DisplayColumn::count(SCROLL_INTERACTED),
        DisplayColumn::percent(SCROLL_BOUNCE),
    ];
    columns.extend(SCROLL_THRESHOLDS.iter().map(|&(_, label)| DisplayColumn::percent(label)));

    PageDefinition {
        slug: "scroll-depth",
        title: "Scroll Depth Analytics",
        query: SCROLL_QUERY,
        cache_ttl: DEFAULT_TTL,
        dimensions: vec![Dimension::UserType],
        report: Report::ScrollDepth(ScrollReport {
            user_key: UserKey::Device,
            layout: Layout::new(columns),
        }),
        export_file: "scroll_depth_results.csv",
    }
}

// Android onboarding

pub const ONBOARDING_RULES: [Rule; 18] = [
    Rule::new("screen_load", "splash_screen", "Splash"),
    Rule::new("screen_load", "initial_login_screen", "Initial login screen"),
    Rule::new("view_click", "initial_login_screen", "User click on login button"),
    Rule::new("screen_load", "login_screen", "Login screen load"),
    Rule::new("view_click", "login_screen", "User click on continue button after login screen"),
    Rule::new("screen_load", "verify_otp_screen", "Land on OTP screen"),
    Rule::new("view_click", "verify_otp_screen", "User click on continue button after otp"),
    Rule::new("screen_load", "create_profile_screen", "Profile Screen"),
    Rule::new(
        "view_click",
        "create_profile_screen",
        "User click on Continue button after profile screen",
    ),
    Rule::new("screen_load", "bina_savings_tode", "User land on Bina Savings tode screen"),
    Rule::new("view_click", "bina_savings_tode", "User clicks on Yes But kaise"),
    Rule::new("screen_load", "dost_hain", "User land on Dost hain Screen"),
    Rule::new("view_click", "dost_hain", "User clicks on haan dost hain"),
    Rule::new("screen_load", "to_beesi_karo_na", "User land on To Beesi Karo na Screen"),
    Rule::new("view_click", "to_beesi_karo_na", "User clicks on nice"),
    Rule::new("screen_load", "how_beesi_works", "User land on How Beesi Works Screen"),
    Rule::new("view_click", "how_beesi_works", "User clicks on got it btn"),
    Rule::new("screen_load", "home_screen", "User lands on Home Screen"),
];

fn onboarding_vocabulary(no_screen_column: bool) -> Vec<&'static str> {
    let mut vocabulary: Vec<&'static str> = ONBOARDING_RULES.iter().map(|r| r.label).collect();
    if no_screen_column {
        vocabulary.push(NO_EVENT);
    }
    vocabulary.push(NO_CUSTOM_EVENT);
    vocabulary
}

/// Onboarding pivot. Unmatched events without a screen land in `No Event`
/// only when `no_screen_column` is set; otherwise they count toward the total.
fn onboarding_report(no_screen_column: bool) -> PivotReport {
    let vocabulary = onboarding_vocabulary(no_screen_column);
    let mut columns = vec![DisplayColumn::count(TOTAL_USERS)];
    columns.extend(vocabulary.iter().map(|&label| DisplayColumn::percent(label)));

    let mut classifier = Classifier::rules(&ONBOARDING_RULES)
        .with_no_event(NO_CUSTOM_EVENT)
        .with_fallback(Fallback::Other);
    if no_screen_column {
        classifier = classifier.with_no_screen(NO_EVENT);
    }

    PivotReport {
        classifier,
        pivot: PivotSpec {
            vocabulary,
            aggregation: Aggregation::DistinctUsers(UserKey::Device),
            totals: vec![TotalColumn::new(
                TOTAL_USERS,
                Aggregation::DistinctUsers(UserKey::Device),
            )],
        },
        percentages: Some(PercentSpec {
            denominator: TOTAL_USERS,
            keep_counts: vec![],
            mode: PercentMode::Replace,
        }),
        durations: None,
        layout: Layout::new(columns),
    }
}

const ONBOARDING_TOTAL_QUERY: &str = r#"
SELECT
    event_date,
    toNullable(user_pseudo_id) AS user_id,
    CAST(NULL AS Nullable(String)) AS account_id,
    toNullable(event_name) AS event_name,
    toNullable(screen_name) AS screen_name,
    toNullable(view_id) AS view_id,
    toNullable(geo_country) AS country,
    toNullable(geo_region) AS region,
    toNullable(geo_city) AS city,
    CAST(NULL AS Nullable(String)) AS device,
    toNullable(app_version) AS app_version,
    toNullable(os_version) AS os_version,
    CAST(NULL AS Nullable(String)) AS user_type,
    CAST(NULL AS Nullable(String)) AS install_type,
    CAST(NULL AS Nullable(Float64)) AS duration_seconds,
    CAST(NULL AS Nullable(Float64)) AS scroll_percent,
    CAST(NULL AS Nullable(Float64)) AS users_count
FROM analytics.app_events
WHERE platform = 'ANDROID'
"#;

fn android_onboarding_total_users() -> PageDefinition {
    PageDefinition {
        slug: "android-onboarding-total-users",
        title: "Total Users App Onboarding Journey",
        query: ONBOARDING_TOTAL_QUERY,
        cache_ttl: DEFAULT_TTL,
        dimensions: vec![
            Dimension::OsVersion,
            Dimension::AppVersion,
            Dimension::Country,
            Dimension::Region,
            Dimension::City,
        ],
        report: Report::Pivot(onboarding_report(true)),
        export_file: "android_app_user_events_data.csv",
    }
}

const ONBOARDING_NEW_QUERY: &str = r#"
WITH
    new_user AS (
        SELECT
            event_date,
            user_pseudo_id,
            if(coalesce(previous_first_open_count, 0) > 0, 'reinstall', 'fresh_install') AS install_type
        FROM analytics.app_events
        WHERE event_name = 'first_open' AND platform = 'ANDROID'
    ),
    custom_events AS (
        SELECT
            user_pseudo_id,
            event_date,
            event_name,
            screen_name,
            geo_country,
            geo_region,
            geo_city,
            app_version,
            os_version
        FROM analytics.app_events
        WHERE platform = 'ANDROID'
            AND event_name IN ('screen_load', 'view_click')
            AND screen_name IN (
                'splash_screen',
                'initial_login_screen',
                'login_screen',
                'verify_otp_screen',
                'create_profile_screen',
                'bina_savings_tode',
                'dost_hain',
                'to_beesi_karo_na',
                'how_beesi_works',
                'home_screen'
            )
    )
SELECT
    n.event_date AS event_date,
    toNullable(n.user_pseudo_id) AS user_id,
    CAST(NULL AS Nullable(String)) AS account_id,
    if(empty(c.user_pseudo_id), NULL, c.event_name) AS event_name,
    if(empty(c.user_pseudo_id), NULL, c.screen_name) AS screen_name,
    CAST(NULL AS Nullable(String)) AS view_id,
    if(empty(c.user_pseudo_id), NULL, c.geo_country) AS country,
    if(empty(c.user_pseudo_id), NULL, c.geo_region) AS region,
    if(empty(c.user_pseudo_id), NULL, c.geo_city) AS city,
    CAST(NULL AS Nullable(String)) AS device,
    if(empty(c.user_pseudo_id), NULL, c.app_version) AS app_version,
    if(empty(c.user_pseudo_id), NULL, c.os_version) AS os_version,
    CAST(NULL AS Nullable(String)) AS user_type,
    toNullable(n.install_type) AS install_type,
    CAST(NULL AS Nullable(Float64)) AS duration_seconds,
    CAST(NULL AS Nullable(Float64)) AS scroll_percent,
    CAST(NULL AS Nullable(Float64)) AS users_count
FROM new_user AS n
LEFT JOIN custom_events AS c
    ON n.user_pseudo_id = c.user_pseudo_id AND n.event_date = c.event_date
"#;

fn android_onboarding_new_users() -> PageDefinition {
    PageDefinition {
        slug: "android-onboarding-new-users",
        title: "New User App Onboarding Journey",
        query: ONBOARDING_NEW_QUERY,
        cache_ttl: DEFAULT_TTL,
        dimensions: vec![
            Dimension::InstallType,
            Dimension::OsVersion,
            Dimension::AppVersion,
            Dimension::Country,
            Dimension::Region,
            Dimension::City,
        ],
        report: Report::Pivot(onboarding_report(false)),
        export_file: "new_users_events_data.csv",
    }
}

// Android explore journey

pub const EXPLORE_RULES: [Rule; 11] = [
    Rule::new("screen_load", "home_screen", "User landed on homepage"),
    Rule::with_view(
        "view_click",
        "home_screen",
        "kyun_karni_hai_beesi",
        "User click on kyun karni hai beesi",
    ),
    Rule::new("screen_load", "kyun_karni_hai_beesi", "User land on kyun karni hai beesi"),
    Rule::with_view(
        "view_click",
        "kyun_karni_hai_beesi",
        "cool",
        "User click on cool on kyun karni hai beesi",
    ),
    Rule::with_view(
        "view_click",
        "kyun_karni_hai_beesi",
        "back_button",
        "User click on back button on kyun karni hai beesi",
    ),
    Rule::with_view("view_click", "home_screen", "beesi_kya_hai", "User click on beesi kya hai"),
    Rule::new("screen_load", "beesi_kya_hai", "User land on beesi kya hai screen"),
    Rule::new(
        "play_player",
        "beesi_kya_hai",
        "User click on play button on beesi kya hai screen",
    ),
    Rule::new(
        "pause_player",
        "beesi_kya_hai",
        "User click on pause button on sampling UI video",
    ),
    Rule::with_view(
        "view_click",
        "beesi_kya_hai",
        "back_button",
        "User click on back button on beesi kya hai screen",
    ),
    Rule::with_view(
        "view_click",
        "beesi_kya_hai",
        "create_beesi_group",
        "User click on create beesi group on beesi kya hai screen",
    ),
];

const EXPLORE_QUERY: &str = r#"
SELECT
    event_date,
    toNullable(user_pseudo_id) AS user_id,
    toNullable(beesi_user_id) AS account_id,
    toNullable(event_name) AS event_name,
    toNullable(screen_name) AS screen_name,
    toNullable(view_id) AS view_id,
    toNullable(geo_country) AS country,
    toNullable(geo_region) AS region,
    toNullable(geo_city) AS city,
    CAST(NULL AS Nullable(String)) AS device,
    toNullable(app_version) AS app_version,
    toNullable(os_version) AS os_version,
    CAST(NULL AS Nullable(String)) AS user_type,
    CAST(NULL AS Nullable(String)) AS install_type,
    toNullable(toFloat64(coalesce(
        toInt64OrNull(splitByChar(':', assumeNotNull(duration))[1]) * 60
            + toInt64OrNull(splitByChar(':', assumeNotNull(duration))[2]),
        0
    ))) AS duration_seconds,
    CAST(NULL AS Nullable(Float64)) AS scroll_percent,
    CAST(NULL AS Nullable(Float64)) AS users_count
FROM analytics.app_events
WHERE platform = 'ANDROID'
"#;

fn android_explore_journey() -> PageDefinition {
    let labels: Vec<&'static str> = EXPLORE_RULES.iter().map(|r| r.label).collect();

    // Watch buckets sit between the pause action and the remaining clicks.
    let split = labels
        .iter()
        .position(|&l| l == "User click on pause button on sampling UI video")
        .map_or(labels.len(), |i| i + 1);
    let mut columns = vec![
        DisplayColumn::count(TOTAL_USERS),
        DisplayColumn::count(LOGGED_IN_USERS),
    ];
    columns.extend(labels[..split].iter().map(|&l| DisplayColumn::percent(l)));
    columns.extend(DURATION_BUCKETS.iter().map(|&b| DisplayColumn::percent(b)));
    columns.extend(labels[split..].iter().map(|&l| DisplayColumn::percent(l)));

    PageDefinition {
        slug: "android-explore-journey",
        title: "Android App Explore Journey",
        query: EXPLORE_QUERY,
        cache_ttl: DEFAULT_TTL,
        dimensions: vec![
            Dimension::OsVersion,
            Dimension::AppVersion,
            Dimension::Country,
            Dimension::Region,
            Dimension::City,
        ],
        report: Report::Pivot(PivotReport {
            classifier: Classifier::rules(&EXPLORE_RULES).with_fallback(Fallback::Drop),
            pivot: PivotSpec {
                vocabulary: labels,
                aggregation: Aggregation::DistinctUsers(UserKey::Account),
                totals: vec![
                    TotalColumn::new(TOTAL_USERS, Aggregation::DistinctUsers(UserKey::Device)),
                    TotalColumn::new(LOGGED_IN_USERS, Aggregation::DistinctUsers(UserKey::Account)),
                ],
            },
            percentages: Some(PercentSpec {
                denominator: LOGGED_IN_USERS,
                keep_counts: vec![TOTAL_USERS],
                mode: PercentMode::Replace,
            }),
            durations: Some(DurationStep {
                user_key: UserKey::Account,
                metric: Metric::DurationSeconds,
            }),
            layout: Layout::new(columns),
        }),
        export_file: "beesi_app_user_analytics.csv",
    }
}

// Android overview

pub const OVERVIEW_METRICS: [(&str, &str); 6] = [
    ("total_users", "Total Users"),
    ("new_users", "New Users"),
    ("returning_users", "Returning Users"),
    ("fresh_installs", "Fresh Installs"),
    ("reinstalls", "Reinstalls"),
    ("users_with_custom_event", "Users With Custom Event"),
];

const OVERVIEW_QUERY: &str = r#"
WITH
    daily_user_activity AS (
        SELECT
            event_date,
            user_pseudo_id,
            max(event_name = 'first_open') AS had_first_open,
            maxIf(previous_first_open_count, event_name = 'first_open') AS previous_first_open_count,
            max(event_name IN ('screen_load', 'view_click')) AS custom_event
        FROM analytics.app_events
        WHERE platform = 'ANDROID'
        GROUP BY event_date, user_pseudo_id
    ),
    user_classification AS (
        SELECT
            event_date,
            user_pseudo_id,
            multiIf(
                had_first_open = 1 AND previous_first_open_count = 0, 'fresh_install',
                had_first_open = 1 AND previous_first_open_count > 0, 'reinstall',
                had_first_open = 1, 'new_user',
                'returning_user'
            ) AS user_type,
            custom_event
        FROM daily_user_activity
    ),
    daily AS (
        SELECT
            event_date,
            uniqExact(user_pseudo_id) AS total_users,
            uniqExactIf(user_pseudo_id, user_type IN ('fresh_install', 'reinstall', 'new_user')) AS new_users,
            uniqExactIf(user_pseudo_id, user_type = 'returning_user') AS returning_users,
            uniqExactIf(user_pseudo_id, user_type = 'fresh_install') AS fresh_installs,
            uniqExactIf(user_pseudo_id, user_type = 'reinstall') AS reinstalls,
            uniqExactIf(user_pseudo_id, custom_event = 1) AS users_with_custom_event
        FROM user_classification
        GROUP BY event_date
    )
SELECT
    event_date,
    CAST(NULL AS Nullable(String)) AS user_id,
    CAST(NULL AS Nullable(String)) AS account_id,
    toNullable(metric.1) AS event_name,
    CAST(NULL AS Nullable(String)) AS screen_name,
    CAST(NULL AS Nullable(String)) AS view_id,
    CAST(NULL AS Nullable(String)) AS country,
    CAST(NULL AS Nullable(String)) AS region,
    CAST(NULL AS Nullable(String)) AS city,
    CAST(NULL AS Nullable(String)) AS device,
    CAST(NULL AS Nullable(String)) AS app_version,
    CAST(NULL AS Nullable(String)) AS os_version,
    CAST(NULL AS Nullable(String)) AS user_type,
    CAST(NULL AS Nullable(String)) AS install_type,
    CAST(NULL AS Nullable(Float64)) AS duration_seconds,
    CAST(NULL AS Nullable(Float64)) AS scroll_percent,
    toNullable(toFloat64(metric.2)) AS users_count
FROM daily
ARRAY JOIN [
    ('total_users', total_users),
    ('new_users', new_users),
    ('returning_users', returning_users),
    ('fresh_installs', fresh_installs),
    ('reinstalls', reinstalls),
    ('users_with_custom_event', users_with_custom_event)
] AS metric
"#;

fn android_overview() -> PageDefinition {
    let vocabulary: Vec<&'static str> = OVERVIEW_METRICS.iter().map(|(name, _)| *name).collect();
    let columns = OVERVIEW_METRICS
        .iter()
        .map(|&(name, label)| DisplayColumn::count(name).renamed(label))
        .collect();

    PageDefinition {
        slug: "android-overview",
        title: "User Activity Analytics",
        query: OVERVIEW_QUERY,
        cache_ttl: DEFAULT_TTL,
        dimensions: vec![],
        report: Report::Pivot(PivotReport {
            classifier: Classifier::EventName,
            pivot: PivotSpec {
                vocabulary,
                aggregation: Aggregation::Sum(Metric::UsersCount),
                totals: vec![],
            },
            percentages: None,
            durations: None,
            layout: Layout::new(columns),
        }),
        export_file: "user_activity_data.csv",
    }
}
