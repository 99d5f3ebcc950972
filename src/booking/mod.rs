//! Booking rules: slot availability and the appointment lifecycle.
//!
//! Everything here is a pure function over data supplied by the caller.
//! Reservation under concurrent writers is the store's job; see
//! [`crate::store::DocumentStore::create_unless`].

mod availability;
mod lifecycle;
mod request;

pub use availability::{available_slots, day_slots, is_slot_available};
pub use lifecycle::initial_status;
pub use request::{BookingRequest, validate_contact};

pub use crate::models::AppointmentStatus;

pub(crate) use request::validation_error;
