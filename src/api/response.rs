//! Response types for the Meal Stipend Engine API.
//!
//! This module defines the success body of `/balances`, the error response
//! structures and the mapping from engine errors to HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::EmployeeResult;
use crate::pipeline::{BatchReport, SkippedDocument};

/// Response body for a completed batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// The year of the billing month.
    pub year: i32,
    /// The billing month.
    pub month: u32,
    /// The title of the results sheet for this period.
    pub sheet_name: String,
    /// Whether the results sheet was written.
    pub sheet_written: bool,
    /// When the batch finished.
    pub generated_at: DateTime<Utc>,
    /// Per-employee balances, ordered by name.
    pub results: Vec<EmployeeResult>,
    /// Documents left out of the batch.
    pub skipped: Vec<SkippedDocument>,
}

impl From<BatchReport> for BalanceResponse {
    fn from(report: BatchReport) -> Self {
        Self {
            year: report.period.year,
            month: report.period.month,
            sheet_written: report.sheet_name.is_some(),
            sheet_name: report
                .sheet_name
                .unwrap_or_else(|| report.period.sheet_title()),
            generated_at: Utc::now(),
            results: report.results,
            skipped: report.skipped,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an internal error response.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::SheetNotFound { .. } | EngineError::RangeFormatInvalid { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "EXTRACTION_ERROR",
                    message,
                    "The configured sheet name or cell range does not match the uploaded workbooks",
                ),
            ),
            EngineError::DocumentNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("DOCUMENT_NOT_FOUND", message),
            ),
            EngineError::DocumentParseError { .. } => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("DOCUMENT_PARSE_ERROR", message),
            ),
            EngineError::StorageError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Storage error", message),
            ),
            EngineError::LinkError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("LINK_ERROR", "Link resolution failed", message),
            ),
            EngineError::SinkError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("SINK_ERROR", "Writing results failed", message),
            ),
            EngineError::InvalidPeriod { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PERIOD", message),
            ),
            EngineError::NothingToProcess => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "NOTHING_TO_PROCESS",
                    message,
                    "No uploaded workbook produced attendance rows",
                ),
            ),
        }
    }
}
