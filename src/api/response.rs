//! Response types for the Booking and Loyalty Engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CollaboratorError, EngineError};
use crate::models::slot_time;

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
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. }
            | EngineError::TierMisconfigured { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::Validation { field, .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details("VALIDATION_ERROR", message, format!("field: {field}")),
            ),
            EngineError::InvalidTransition { .. } | EngineError::InvalidInitialStatus { .. } => {
                Self::new(
                    StatusCode::BAD_REQUEST,
                    ApiError::new("INVALID_TRANSITION", message),
                )
            }
            EngineError::NoFreeCutAvailable { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("NO_FREE_CUT_AVAILABLE", message),
            ),
            EngineError::Inactive { .. } => {
                Self::new(StatusCode::BAD_REQUEST, ApiError::new("INACTIVE", message))
            }
            EngineError::SlotUnavailable { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::new("SLOT_UNAVAILABLE", message),
            ),
            EngineError::DuplicateCustomer { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_CUSTOMER", message),
            ),
            EngineError::ConcurrentModification { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "CONCURRENT_MODIFICATION",
                    message,
                    "The record changed while the request was processed; retry it",
                ),
            ),
            EngineError::RecordNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
            }
            EngineError::Collaborator(inner) => collaborator_response(inner, message),
        }
    }
}

fn collaborator_response(error: CollaboratorError, message: String) -> ApiErrorResponse {
    match error {
        CollaboratorError::NotFound { .. } => {
            ApiErrorResponse::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
        }
        CollaboratorError::EmailAlreadyInUse { .. } => ApiErrorResponse::new(
            StatusCode::CONFLICT,
            ApiError::new("EMAIL_ALREADY_IN_USE", message),
        ),
        CollaboratorError::WeakPassword { .. } | CollaboratorError::InvalidEmail { .. } => {
            ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::validation_error(message))
        }
        CollaboratorError::InvalidCredentials => ApiErrorResponse::new(
            StatusCode::UNAUTHORIZED,
            ApiError::new("INVALID_CREDENTIALS", message),
        ),
        CollaboratorError::Serialization { .. } | CollaboratorError::Unavailable { .. } => {
            ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Storage failure", message),
            )
        }
    }
}

/// Response body of `GET /availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The barber.
    pub barber_id: String,
    /// The day.
    pub date: NaiveDate,
    /// Open slot start times, formatted `HH:MM`.
    pub slots: Vec<String>,
}

impl AvailabilityResponse {
    /// Builds the response from the engine's open slots.
    pub fn new(barber_id: String, date: NaiveDate, slots: &[NaiveTime]) -> Self {
        Self {
            barber_id,
            date,
            slots: slots.iter().copied().map(slot_time::format).collect(),
        }
    }
}

/// Response body of `GET /appointments/:id/confirmation-link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationLinkResponse {
    /// The appointment.
    pub appointment_id: String,
    /// The `wa.me` deep link.
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_slot_conflict_maps_to_409() {
        let response: ApiErrorResponse = EngineError::SlotUnavailable {
            barber_id: "barber1".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 10, 10).unwrap(),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "SLOT_UNAVAILABLE");
    }

    #[test]
    fn test_validation_maps_to_400_with_field() {
        let response: ApiErrorResponse = EngineError::Validation {
            field: "phone".to_string(),
            message: "must have at least 10 digits".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.details.as_deref(), Some("field: phone"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let engine: ApiErrorResponse = EngineError::RecordNotFound {
            collection: "appointments".to_string(),
            id: "missing".to_string(),
        }
        .into();
        assert_eq!(engine.status, StatusCode::NOT_FOUND);

        let collaborator: ApiErrorResponse = EngineError::from(CollaboratorError::NotFound {
            collection: "customers".to_string(),
            id: "missing".to_string(),
        })
        .into();
        assert_eq!(collaborator.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let response: ApiErrorResponse = EngineError::from(CollaboratorError::Unavailable {
            message: "connection reset".to_string(),
        })
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "STORE_ERROR");
    }

    #[test]
    fn test_availability_formats_slots() {
        let response = AvailabilityResponse::new(
            "barber1".to_string(),
            NaiveDate::from_ymd_opt(2023, 10, 10).unwrap(),
            &[
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            ],
        );
        assert_eq!(response.slots, vec!["09:00", "09:30"]);
    }
}
