//! HTTP request handlers for the Booking and Loyalty Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::booking::BookingRequest;
use crate::error::EngineResult;
use crate::front_desk::CompletionOutcome;
use crate::models::NewCustomer;

use super::request::{
    AvailabilityQuery, CompleteRequest, CreateBarberRequest, CreateServiceRequest,
    StatusUpdateRequest,
};
use super::response::{ApiError, ApiErrorResponse, AvailabilityResponse, ConfirmationLinkResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/services", post(create_service_handler).get(list_services_handler))
        .route("/barbers", post(create_barber_handler).get(list_barbers_handler))
        .route("/customers", post(register_customer_handler))
        .route("/customers/:id/loyalty", get(loyalty_handler))
        .route("/availability", get(availability_handler))
        .route("/appointments", post(book_handler))
        .route("/appointments/:id", get(appointment_handler))
        .route("/appointments/:id/status", patch(update_status_handler))
        .route("/appointments/:id/complete", post(complete_handler))
        .route(
            "/appointments/:id/completion-preview",
            get(completion_preview_handler),
        )
        .route(
            "/appointments/:id/confirmation-link",
            get(confirmation_link_handler),
        )
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the bad field.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response())
}

/// Renders an engine result, logging failures under the correlation id.
fn respond<T: Serialize>(correlation_id: Uuid, status: StatusCode, result: EngineResult<T>) -> Response {
    match result {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /services.
async fn create_service_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateServiceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Adding service");

    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result = state.desk().add_service(&request.name, request.price);
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /services. Lists active services only.
async fn list_services_handler(State(state): State<AppState>) -> Response {
    respond(Uuid::new_v4(), StatusCode::OK, state.desk().active_services())
}

/// Handler for POST /barbers.
async fn create_barber_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateBarberRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Adding barber");

    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result = state.desk().add_barber(&request.name);
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /barbers. Lists barbers accepting bookings.
async fn list_barbers_handler(State(state): State<AppState>) -> Response {
    respond(Uuid::new_v4(), StatusCode::OK, state.desk().active_barbers())
}

/// Handler for POST /customers.
async fn register_customer_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewCustomer>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Registering customer");

    let details = match json_body(correlation_id, payload) {
        Ok(details) => details,
        Err(response) => return response,
    };
    let result = state.desk().register_customer(details);
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /customers/:id/loyalty.
async fn loyalty_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(correlation_id, StatusCode::OK, state.desk().loyalty_summary(&id))
}

/// Handler for GET /availability?barber_id=..&date=YYYY-MM-DD.
async fn availability_handler(
    State(state): State<AppState>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Query string error"
            );
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(rejection.body_text()),
            }
            .into_response();
        }
    };

    let result = state
        .desk()
        .available_slots(&query.barber_id, query.date)
        .map(|slots| AvailabilityResponse::new(query.barber_id.clone(), query.date, &slots));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /appointments.
async fn book_handler(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing booking request");

    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result = state.desk().book_appointment(request);
    if let Ok(appointment) = &result {
        info!(
            correlation_id = %correlation_id,
            appointment_id = %appointment.id,
            barber_id = %appointment.barber_id,
            "Booking accepted"
        );
    }
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /appointments/:id.
async fn appointment_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    respond(Uuid::new_v4(), StatusCode::OK, state.desk().appointment(&id))
}

/// Handler for PATCH /appointments/:id/status.
async fn update_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, appointment_id = %id, "Processing status change");

    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result = state.desk().update_status(&id, request.status);
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /appointments/:id/complete.
///
/// Completing an already completed appointment answers 200 with an
/// `already_completed` outcome and changes nothing.
async fn complete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CompleteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, appointment_id = %id, "Processing completion");

    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result = state.desk().complete_appointment(&id, request.settlement);
    if let Ok(CompletionOutcome::Completed { credit, .. }) = &result {
        info!(
            correlation_id = %correlation_id,
            appointment_id = %id,
            points_earned = credit.points_earned,
            free_cut_earned = credit.free_cut_earned,
            tier = %credit.tier,
            "Appointment completed"
        );
    }
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /appointments/:id/completion-preview.
async fn completion_preview_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    respond(Uuid::new_v4(), StatusCode::OK, state.desk().completion_preview(&id))
}

/// Handler for GET /appointments/:id/confirmation-link.
async fn confirmation_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let result = state
        .desk()
        .confirmation_link(&id)
        .map(|link| ConfirmationLinkResponse {
            appointment_id: id.clone(),
            link,
        });
    respond(Uuid::new_v4(), StatusCode::OK, result)
}
