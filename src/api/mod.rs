//! HTTP API for the Booking and Loyalty Engine.
//!
//! Exposes catalog management, customer registration, booking, status
//! changes and completion of one shop over JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AvailabilityQuery, CompleteRequest, CreateBarberRequest, CreateServiceRequest,
    StatusUpdateRequest,
};
pub use response::{ApiError, AvailabilityResponse, ConfirmationLinkResponse};
pub use state::AppState;
