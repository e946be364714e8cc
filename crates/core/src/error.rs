//! Unified error types for the dashboard pipeline.
//!
//! Warehouse errors carry a code:
//! - WH_001: Connection or authentication failure
//! - WH_002: Query rejected or failed inside the warehouse
//! - WH_003: Query did not finish within the timeout

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Warehouse error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseErrorCode {
    /// WH_001: Could not connect or authenticate
    Connection,
    /// WH_002: Warehouse reported an error for the query
    QueryFailed,
    /// WH_003: Query timed out
    Timeout,
}

impl WarehouseErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection => "WH_001",
            Self::QueryFailed => "WH_002",
            Self::Timeout => "WH_003",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Connection => 502,
            Self::QueryFailed => 502,
            Self::Timeout => 504,
        }
    }

    /// Whether another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection | Self::Timeout)
    }
}

/// Unified error type for the dashboard pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Warehouse error with code.
    #[error("[{code}] {message}")]
    Warehouse {
        code: &'static str,
        message: String,
        http_status: u16,
        transient: bool,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unknown dashboard page: {0}")]
    PageNotFound(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a warehouse error.
    pub fn warehouse(code: WarehouseErrorCode, msg: impl Into<String>) -> Self {
        Self::Warehouse {
            code: code.code(),
            message: msg.into(),
            http_status: code.http_status(),
            transient: code.is_transient(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn page_not_found(slug: impl Into<String>) -> Self {
        Self::PageNotFound(slug.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Marks a warehouse error as not worth retrying.
    pub fn permanent(self) -> Self {
        match self {
            Self::Warehouse {
                code,
                message,
                http_status,
                ..
            } => Self::Warehouse {
                code,
                message,
                http_status,
                transient: false,
            },
            other => other,
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Warehouse { transient: true, .. })
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Warehouse { http_status, .. } => *http_status,
            Self::Validation(_) => 400,
            Self::PageNotFound(_) => 404,
            Self::Export(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Warehouse { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_codes() {
        let err = Error::warehouse(WarehouseErrorCode::Timeout, "slow");
        assert_eq!(err.error_code(), Some("WH_003"));
        assert_eq!(err.http_status(), 504);
        assert!(err.is_transient());
        assert_eq!(err.to_string(), "[WH_003] slow");

        let err = Error::warehouse(WarehouseErrorCode::QueryFailed, "syntax error");
        assert!(!err.is_transient());
        assert_eq!(err.http_status(), 502);

        let err = Error::warehouse(WarehouseErrorCode::Connection, "bad password").permanent();
        assert!(!err.is_transient());
        assert_eq!(err.error_code(), Some("WH_001"));
    }

    #[test]
    fn test_uncoded_errors() {
        assert_eq!(Error::page_not_found("nope").http_status(), 404);
        assert_eq!(Error::validation("bad").error_code(), None);
    }
}
