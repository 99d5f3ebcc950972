//! Request types for the Booking and Loyalty Engine API.
//!
//! Bookings and customer registration reuse [`crate::booking::BookingRequest`]
//! and [`crate::models::NewCustomer`] as their bodies; the types here cover
//! the remaining endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::loyalty::Settlement;
use crate::models::AppointmentStatus;

/// Request body for `POST /services`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    /// Display name.
    pub name: String,
    /// Price charged for the service.
    pub price: Decimal,
}

/// Request body for `POST /barbers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBarberRequest {
    /// Display name.
    pub name: String,
}

/// Query string of `GET /availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// The barber to check.
    pub barber_id: String,
    /// The day to check.
    pub date: NaiveDate,
}

/// Request body for `PATCH /appointments/:id/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// The requested status.
    pub status: AppointmentStatus,
}

/// Request body for `POST /appointments/:id/complete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteRequest {
    /// How the appointment is paid for; defaults to paid.
    #[serde(default)]
    pub settlement: Settlement,
}
