//! Response types for the PAYE engine API.
//!
//! This module defines the success bodies that are not plain domain types,
//! the error response structure, and the mapping from [`EngineError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::config::{JurisdictionMetadata, PayrollSchedule};
use crate::error::{EngineError, FieldError};
use crate::presentation::Payslip;

/// Response body for `/payslip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipResponse {
    /// Suggested download file name.
    pub file_name: String,
    /// Structured payslip lines.
    pub payslip: Payslip,
    /// Fixed-width text rendering of the payslip.
    pub text: String,
}

/// Response body for `/schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// The jurisdiction the schedule belongs to.
    pub jurisdiction: JurisdictionMetadata,
    /// The schedule in force.
    pub schedule: PayrollSchedule,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Per-field problems, present on validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            errors: Vec::new(),
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response listing every failing field.
    pub fn validation_error(errors: Vec<FieldError>) -> Self {
        Self {
            errors,
            ..Self::new("VALIDATION_ERROR", "One or more fields are invalid")
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
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
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidTaxBands { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid tax bands", message),
            },
            EngineError::ScheduleNotFound { date } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "SCHEDULE_NOT_FOUND",
                    format!("No payroll schedule effective on {}", date),
                    "The requested date precedes every configured schedule",
                ),
            ),
            EngineError::InvalidInput { field, message } => ApiErrorResponse::bad_request(
                ApiError::validation_error(vec![FieldError::new(field, message)]),
            ),
            EngineError::ValidationFailed { errors } => {
                ApiErrorResponse::bad_request(ApiError::validation_error(errors))
            }
        }
    }
}
