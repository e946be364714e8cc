//! Dashboard page endpoints.

use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use dashboard_core::{
    catalog, options::date_bounds, render, FilterOptions, FilterSelection, PageDefinition,
    RenderedPage,
};
use telemetry::metrics;
use tracing::{debug, info};

use crate::response::{ApiError, OptionsResponse, PagesResponse};
use crate::state::AppState;

/// GET /pages - Every dashboard page, in navigation order.
pub async fn list_handler() -> Json<PagesResponse> {
    Json(PagesResponse {
        pages: catalog::all().iter().map(PageDefinition::summary).collect(),
    })
}

/// GET /pages/:slug/options - Date bounds and selectable filter values.
pub async fn options_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<OptionsResponse>, ApiError> {
    let page = catalog::find(&slug)?;
    let rows = state.load_rows(page).await?;

    Ok(Json(OptionsResponse {
        slug: page.slug,
        options: FilterOptions::extract(&rows, &page.dimensions),
    }))
}

/// GET /pages/:slug/table - The page's formatted table for a selection.
pub async fn table_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<RenderedPage>, ApiError> {
    let (_, rendered) = render_page(&state, &slug, &params).await?;
    Ok(Json(rendered))
}

/// GET /pages/:slug/export.csv - The same table as a CSV attachment.
pub async fn export_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let (page, rendered) = render_page(&state, &slug, &params).await?;
    let body = rendered.table.to_csv()?;

    metrics().exports_generated.inc();
    info!(
        page = page.slug,
        rows = rendered.table.rows.len(),
        file = page.export_file,
        "Generated CSV export"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", page.export_file),
            ),
        ],
        body,
    )
        .into_response())
}

/// Loads a page's rows and runs them through its pipeline.
async fn render_page(
    state: &AppState,
    slug: &str,
    params: &[(String, String)],
) -> Result<(&'static PageDefinition, RenderedPage), ApiError> {
    let page = catalog::find(slug)?;
    let rows = state.load_rows(page).await?;
    let selection = FilterSelection::from_params(params, date_bounds(&rows), &page.dimensions)?;

    let started = Instant::now();
    let rendered = render(page, &rows, &selection);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    metrics().render_latency_ms.observe(elapsed_ms);
    metrics().pages_rendered.inc();
    debug!(
        page = page.slug,
        start = %selection.date_range.start,
        end = %selection.date_range.end,
        rows = rendered.table.rows.len(),
        elapsed_ms,
        "Rendered page"
    );

    Ok((page, rendered))
}
