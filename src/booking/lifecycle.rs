//! Appointment status state machine.
//!
//! ```text
//! pending ──> confirmed ──> completed
//!    │            │
//!    ├────────────┴──> cancelled
//!    └──────────────> completed
//! ```
//!
//! `completed` and `cancelled` are terminal.

use crate::error::{EngineError, EngineResult};
use crate::models::{Appointment, AppointmentStatus};

impl AppointmentStatus {
    /// Returns true for statuses with no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    /// Returns the statuses reachable from `self` in one move.
    pub fn allowed_transitions(self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Pending => &[
                AppointmentStatus::Confirmed,
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => {
                &[AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => &[],
        }
    }

    /// Returns true if the table allows moving from `self` to `next`.
    ///
    /// # Examples
    ///
    /// ```
    /// use barbershop_engine::models::AppointmentStatus;
    ///
    /// assert!(AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Confirmed));
    /// assert!(!AppointmentStatus::Cancelled.can_transition_to(AppointmentStatus::Confirmed));
    /// ```
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Checks the move from `self` to `next` for the given appointment.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the move is not in the table.
    pub fn transition(
        self,
        appointment_id: &str,
        next: AppointmentStatus,
    ) -> EngineResult<AppointmentStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(EngineError::InvalidTransition {
                appointment_id: appointment_id.to_string(),
                from: self,
                to: next,
            })
        }
    }
}

impl Appointment {
    /// Moves the appointment to `next`, returning the previous status.
    ///
    /// The appointment is left untouched when the move is rejected.
    pub fn transition_to(&mut self, next: AppointmentStatus) -> EngineResult<AppointmentStatus> {
        let previous = self.status;
        self.status = previous.transition(&self.id, next)?;
        Ok(previous)
    }
}

/// Resolves the status a new appointment starts in.
///
/// Defaults to `pending`. Only `pending` and `confirmed` may be requested.
pub fn initial_status(requested: Option<AppointmentStatus>) -> EngineResult<AppointmentStatus> {
    match requested {
        None => Ok(AppointmentStatus::Pending),
        Some(status @ (AppointmentStatus::Pending | AppointmentStatus::Confirmed)) => Ok(status),
        Some(status) => Err(EngineError::InvalidInitialStatus { status }),
    }
}
