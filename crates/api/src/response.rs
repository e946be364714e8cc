//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dashboard_core::{FilterOptions, PageSummary};
use serde::{Deserialize, Serialize};
use telemetry::{HealthReport, MetricsSnapshot};

/// Page listing.
#[derive(Debug, Serialize)]
pub struct PagesResponse {
    pub pages: Vec<PageSummary>,
}

/// Filter widget contents for a page.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub slug: &'static str,
    pub options: FilterOptions,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    #[serde(flatten)]
    pub report: HealthReport,
    pub metrics: MetricsSnapshot,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// API error with a status and a coded body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn with_code(status: StatusCode, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg, code),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<dashboard_core::Error> for ApiError {
    fn from(err: dashboard_core::Error) -> Self {
        use dashboard_core::Error;

        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = match &err {
            Error::Warehouse { code, .. } => *code,
            Error::Validation(_) => "VALIDATION",
            Error::PageNotFound(_) => "PAGE_NOT_FOUND",
            Error::Export(_) => "EXPORT_FAILED",
            Error::Internal(_) => "INTERNAL",
        };

        ApiError::with_code(status, code, err.to_string())
    }
}
