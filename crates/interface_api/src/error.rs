//! API error handling
//!
//! Every domain error is mapped to an HTTP response here and nowhere else.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use core_kernel::{MoneyError, PortError};
use domain_car::CarError;
use domain_claims::ClaimError;
use domain_policy::PolicyError;

use crate::validation::DateValidationError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The car had no active policy on the claim date
    #[error("Invalid insurance: {0}")]
    InvalidInsurance(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation { message: String, details: Vec<String> },

    #[error("Storage error: {0}")]
    Storage(#[source] PortError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::InvalidInsurance(msg) => (StatusCode::BAD_REQUEST, "invalid_insurance", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, "validation_error", message, Some(details))
            }
            ApiError::Storage(e) => {
                error!(error = %e, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "A storage error occurred".to_string(),
                    None,
                )
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CarError> for ApiError {
    fn from(err: CarError) -> Self {
        match err {
            CarError::CarNotFound(_) => ApiError::NotFound(err.to_string()),
            CarError::DuplicateVin(_) => ApiError::Conflict(err.to_string()),
            CarError::Invalid(e) => ApiError::BadRequest(e.to_string()),
            CarError::Port(e) => ApiError::Storage(e),
        }
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::CarNotFound(_) => ApiError::NotFound(err.to_string()),
            PolicyError::Invalid(e) => ApiError::BadRequest(e.to_string()),
            PolicyError::Port(e) => ApiError::Storage(e),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::CarNotFound(_) => ApiError::NotFound(err.to_string()),
            ClaimError::InvalidInsurance { .. } => ApiError::InvalidInsurance(err.to_string()),
            ClaimError::Invalid(e) => ApiError::BadRequest(e.to_string()),
            ClaimError::Port(e) => ApiError::Storage(e),
        }
    }
}

impl From<DateValidationError> for ApiError {
    fn from(err: DateValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<MoneyError> for ApiError {
    fn from(err: MoneyError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let reason = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, reason)
                })
            })
            .collect();
        details.sort();

        ApiError::Validation {
            message: "Request validation failed".to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::CarId;

    #[test]
    fn test_status_mapping() {
        let car_id = CarId::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let cases: Vec<(ApiError, StatusCode)> = vec![
            (ClaimError::CarNotFound(car_id).into(), StatusCode::NOT_FOUND),
            (ClaimError::InvalidInsurance { car_id, date }.into(), StatusCode::BAD_REQUEST),
            (CarError::DuplicateVin("X".into()).into(), StatusCode::CONFLICT),
            (PolicyError::CarNotFound(car_id).into(), StatusCode::NOT_FOUND),
            (PolicyError::Port(PortError::connection("down")).into(), StatusCode::INTERNAL_SERVER_ERROR),
            (DateValidationError::Missing.into(), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_not_found_keeps_domain_message() {
        let car_id = CarId::new();
        let err: ApiError = PolicyError::CarNotFound(car_id).into();
        assert_eq!(err.to_string(), format!("Not found: Car not found with id: {}", car_id));
    }
}
