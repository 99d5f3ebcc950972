//! Error types for the Booking and Loyalty Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Engine errors cover configuration, validation and rule violations, while
//! [`CollaboratorError`] carries failures reported by the persistence and
//! authentication layer unchanged.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::AppointmentStatus;

/// Failures reported by the collaborator (document store or auth provider).
///
/// The engine never reinterprets these; they are wrapped into
/// [`EngineError::Collaborator`] so callers can still match on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// An account with this email already exists.
    #[error("Email already in use: {email}")]
    EmailAlreadyInUse {
        /// The email that was rejected.
        email: String,
    },

    /// The password does not meet the minimum length.
    #[error("Password must have at least {min_length} characters")]
    WeakPassword {
        /// The minimum accepted length.
        min_length: usize,
    },

    /// The email/password pair did not match a known account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The email is not well-formed.
    #[error("Invalid email: {email}")]
    InvalidEmail {
        /// The email that was rejected.
        email: String,
    },

    /// A record addressed by id does not exist.
    #[error("Record not found in '{collection}': {id}")]
    NotFound {
        /// The collection that was searched.
        collection: String,
        /// The id that was not found.
        id: String,
    },

    /// A record could not be converted to or from its stored document.
    #[error("Serialization failed: {message}")]
    Serialization {
        /// A description of the failure.
        message: String,
    },

    /// The collaborator could not serve the request.
    #[error("Collaborator unavailable: {message}")]
    Unavailable {
        /// A description of the failure.
        message: String,
    },
}

/// The main error type for the Booking and Loyalty Engine.
///
/// # Example
///
/// ```
/// use barbershop_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/shop.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/shop.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Loyalty tier bands have gaps, overlaps or do not start at zero.
    #[error("Tier table misconfigured: {message}")]
    TierMisconfigured {
        /// A description of the problem.
        message: String,
    },

    /// Input failed a boundary validator.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// The requested status change is not in the transition table.
    #[error("Appointment '{appointment_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        /// The appointment being changed.
        appointment_id: String,
        /// The current status.
        from: AppointmentStatus,
        /// The requested status.
        to: AppointmentStatus,
    },

    /// A new appointment was requested with a status other than pending or confirmed.
    #[error("Appointments cannot be created as {status}")]
    InvalidInitialStatus {
        /// The rejected status.
        status: AppointmentStatus,
    },

    /// The barber already has a non-cancelled appointment in this slot.
    #[error("Slot {date} {time} is not available for barber '{barber_id}'")]
    SlotUnavailable {
        /// The barber.
        barber_id: String,
        /// The requested date.
        date: NaiveDate,
        /// The requested time.
        time: NaiveTime,
    },

    /// A free-cut redemption was requested but none is available.
    #[error("Customer '{customer_id}' has no free cut available")]
    NoFreeCutAvailable {
        /// The customer.
        customer_id: String,
    },

    /// A customer with this phone number is already registered.
    #[error("A customer with phone {phone} is already registered")]
    DuplicateCustomer {
        /// The normalized phone number.
        phone: String,
    },

    /// A referenced record does not exist.
    #[error("{collection} not found: {id}")]
    RecordNotFound {
        /// The kind of record.
        collection: String,
        /// The missing id.
        id: String,
    },

    /// A referenced barber or service is not active.
    #[error("{collection} '{id}' is not active")]
    Inactive {
        /// The kind of record.
        collection: String,
        /// The inactive id.
        id: String,
    },

    /// A conditional write lost against a concurrent writer.
    #[error("{collection} '{id}' was modified concurrently")]
    ConcurrentModification {
        /// The kind of record.
        collection: String,
        /// The contended id.
        id: String,
    },

    /// A failure reported by the persistence or auth collaborator.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/shop.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/shop.yaml"
        );
    }

    #[test]
    fn test_invalid_transition_displays_states() {
        let error = EngineError::InvalidTransition {
            appointment_id: "apt_001".to_string(),
            from: AppointmentStatus::Cancelled,
            to: AppointmentStatus::Confirmed,
        };
        assert_eq!(
            error.to_string(),
            "Appointment 'apt_001' cannot move from cancelled to confirmed"
        );
    }

    #[test]
    fn test_slot_unavailable_displays_slot() {
        let error = EngineError::SlotUnavailable {
            barber_id: "barber1".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 10, 10).unwrap(),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Slot 2023-10-10 14:00:00 is not available for barber 'barber1'"
        );
    }

    #[test]
    fn test_no_free_cut_displays_customer() {
        let error = EngineError::NoFreeCutAvailable {
            customer_id: "cus_001".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Customer 'cus_001' has no free cut available"
        );
    }

    #[test]
    fn test_collaborator_error_is_transparent() {
        let error: EngineError = CollaboratorError::WeakPassword { min_length: 6 }.into();
        assert_eq!(error.to_string(), "Password must have at least 6 characters");
        assert!(matches!(
            error,
            EngineError::Collaborator(CollaboratorError::WeakPassword { .. })
        ));
    }

    #[test]
    fn test_tier_misconfigured_displays_message() {
        let error = EngineError::TierMisconfigured {
            message: "gap between 99 and 150".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Tier table misconfigured: gap between 99 and 150"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<CollaboratorError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_collaborator_error() -> Result<(), CollaboratorError> {
            Err(CollaboratorError::InvalidCredentials)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_collaborator_error()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::Collaborator(CollaboratorError::InvalidCredentials))
        ));
    }
}
