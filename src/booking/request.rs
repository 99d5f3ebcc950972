//! Booking request payload and its boundary checks.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AppointmentStatus, NewCustomer, slot_time};
use crate::validation::{MIN_NAME_CHARS, MIN_PHONE_DIGITS, validate_email, validate_name, validate_phone};

/// A request to book one slot.
///
/// The customer is identified by contact details: an existing customer with
/// the same phone number is reused, otherwise one is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Who is booking.
    pub customer: NewCustomer,
    /// The barber to book with.
    pub barber_id: String,
    /// The service to book.
    pub service_id: String,
    /// The slot date.
    pub date: NaiveDate,
    /// The slot start time.
    #[serde(with = "slot_time")]
    pub time: NaiveTime,
    /// Requested initial status; defaults to pending.
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
}

impl BookingRequest {
    /// Runs the boundary validators over the request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] naming the first field that fails.
    pub fn validate(&self) -> EngineResult<()> {
        validate_contact(&self.customer)?;
        if self.barber_id.trim().is_empty() {
            return Err(validation_error("barber_id", "is required"));
        }
        if self.service_id.trim().is_empty() {
            return Err(validation_error("service_id", "is required"));
        }
        Ok(())
    }
}

/// Checks name, phone and optional email of a customer.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] naming the first field that fails.
pub fn validate_contact(contact: &NewCustomer) -> EngineResult<()> {
    if !validate_name(&contact.name) {
        return Err(validation_error(
            "name",
            &format!("must have at least {} characters", MIN_NAME_CHARS),
        ));
    }
    if !validate_phone(&contact.phone) {
        return Err(validation_error(
            "phone",
            &format!("must have at least {} digits", MIN_PHONE_DIGITS),
        ));
    }
    if let Some(email) = &contact.email {
        if !validate_email(email) {
            return Err(validation_error("email", "is not a valid address"));
        }
    }
    Ok(())
}

pub(crate) fn validation_error(field: &str, message: &str) -> EngineError {
    EngineError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
