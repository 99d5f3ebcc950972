//! Booking, status changes and completion.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::booking::{BookingRequest, day_slots, initial_status, is_slot_available, validation_error};
use crate::error::{EngineError, EngineResult};
use crate::loyalty::{CompletionCredit, Settlement, apply_completion};
use crate::models::{Appointment, AppointmentStatus, Barber, Customer, Service, slot_time};
use crate::store::{Document, DocumentStore, Filter, Record, to_document};

use super::{FrontDesk, record_not_found};

/// Optimistic attempts at crediting a customer before giving up.
const MAX_CREDIT_ATTEMPTS: usize = 3;

/// The result of a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    /// The appointment after the change.
    pub appointment: Appointment,
    /// The status before the change.
    pub previous: AppointmentStatus,
    /// Loyalty credit, present when this change completed the appointment.
    pub credit: Option<CompletionCredit>,
}

/// The result of completing an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// The appointment was completed and the customer credited.
    Completed {
        /// The completed appointment.
        appointment: Appointment,
        /// The status it was completed from.
        previous: AppointmentStatus,
        /// The customer after the credit.
        customer: Customer,
        /// What the credit did.
        credit: CompletionCredit,
    },
    /// The appointment had already been completed; nothing changed.
    AlreadyCompleted {
        /// The appointment as stored.
        appointment: Appointment,
    },
}

fn slot_filters(barber_id: &str, date: NaiveDate, time: NaiveTime) -> [Filter; 4] {
    [
        Filter::eq("barber_id", barber_id),
        Filter::eq("date", date.to_string()),
        Filter::eq("time", slot_time::format(time)),
        Filter::ne("status", AppointmentStatus::Cancelled.as_str()),
    ]
}

fn status_is(status: AppointmentStatus) -> [Filter; 1] {
    [Filter::eq("status", status.as_str())]
}

fn status_change(status: AppointmentStatus) -> Document {
    let mut changes = Document::new();
    changes.insert("status".to_string(), status.as_str().into());
    changes
}

impl<S: DocumentStore> FrontDesk<S> {
    /// Books a slot.
    ///
    /// The customer is matched by phone number and registered if new. The
    /// service price is captured on the appointment.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] for bad contact details or a time that
    ///   is not one of the shop's slots
    /// - [`EngineError::InvalidInitialStatus`] for a status other than pending or confirmed
    /// - [`EngineError::RecordNotFound`] / [`EngineError::Inactive`] for the barber or service
    /// - [`EngineError::SlotUnavailable`] if the slot is taken, including when
    ///   a concurrent booking wins the reservation
    pub fn book_appointment(&self, request: BookingRequest) -> EngineResult<Appointment> {
        request.validate()?;
        let status = initial_status(request.status)?;

        if !day_slots(self.config.schedule()).contains(&request.time) {
            return Err(validation_error("time", "is not one of the shop's slots"));
        }

        let barber = self.fetch::<Barber>(&request.barber_id)?;
        if !barber.active {
            return Err(inactive::<Barber>(&barber.id));
        }
        let service = self.fetch::<Service>(&request.service_id)?;
        if !service.active {
            return Err(inactive::<Service>(&service.id));
        }

        let taken = || EngineError::SlotUnavailable {
            barber_id: barber.id.clone(),
            date: request.date,
            time: request.time,
        };

        let same_day: Vec<Appointment> = self.store.find(
            self.tenant(),
            &[
                Filter::eq("barber_id", barber.id.as_str()),
                Filter::eq("date", request.date.to_string()),
            ],
        )?;
        if !is_slot_available(request.time, &same_day, &barber.id, request.date) {
            return Err(taken());
        }

        let customer = match self.find_customer_by_phone(&request.customer.phone)? {
            Some(customer) => customer,
            None => match self.register_customer(request.customer.clone()) {
                Ok(customer) => customer,
                // Registered concurrently by another booking.
                Err(EngineError::DuplicateCustomer { .. }) => self
                    .find_customer_by_phone(&request.customer.phone)?
                    .ok_or_else(|| EngineError::RecordNotFound {
                        collection: Customer::COLLECTION.to_string(),
                        id: request.customer.phone.clone(),
                    })?,
                Err(other) => return Err(other),
            },
        };

        let appointment = Appointment {
            id: String::new(),
            customer_id: customer.id,
            barber_id: barber.id.clone(),
            service_id: service.id,
            date: request.date,
            time: request.time,
            status,
            created_at: self.today(),
            price: Some(service.price),
        };

        let conflicts = slot_filters(&barber.id, request.date, request.time);
        match self
            .store
            .create_unless(self.tenant(), appointment, &conflicts)?
        {
            Some(created) => {
                info!(
                    tenant = %self.tenant(),
                    appointment_id = %created.id,
                    barber_id = %created.barber_id,
                    date = %created.date,
                    time = %slot_time::format(created.time),
                    status = %created.status,
                    "Appointment booked"
                );
                Ok(created)
            }
            None => {
                warn!(
                    tenant = %self.tenant(),
                    barber_id = %barber.id,
                    "Slot reserved by a concurrent booking"
                );
                Err(taken())
            }
        }
    }

    /// Returns the appointment with `appointment_id`.
    pub fn appointment(&self, appointment_id: &str) -> EngineResult<Appointment> {
        self.fetch(appointment_id)
    }

    /// Moves an appointment to `next`.
    ///
    /// Moving to `completed` runs [`FrontDesk::complete_appointment`] with a
    /// paid settlement, so loyalty is credited exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] for moves outside the
    /// transition table and [`EngineError::ConcurrentModification`] if the
    /// status changed between read and write.
    pub fn update_status(
        &self,
        appointment_id: &str,
        next: AppointmentStatus,
    ) -> EngineResult<StatusChange> {
        if next == AppointmentStatus::Completed {
            return Ok(
                match self.complete_appointment(appointment_id, Settlement::Paid)? {
                    CompletionOutcome::Completed {
                        appointment,
                        previous,
                        credit,
                        ..
                    } => StatusChange {
                        appointment,
                        previous,
                        credit: Some(credit),
                    },
                    CompletionOutcome::AlreadyCompleted { appointment } => StatusChange {
                        previous: appointment.status,
                        appointment,
                        credit: None,
                    },
                },
            );
        }

        let current = self.fetch::<Appointment>(appointment_id)?;
        let previous = current.status;
        previous.transition(appointment_id, next)?;

        let updated = self
            .store
            .update_if::<Appointment>(
                self.tenant(),
                appointment_id,
                &status_is(previous),
                status_change(next),
            )
            .map_err(record_not_found)?
            .ok_or_else(|| concurrent::<Appointment>(appointment_id))?;

        info!(
            tenant = %self.tenant(),
            appointment_id,
            from = %previous,
            to = %next,
            "Appointment status changed"
        );
        Ok(StatusChange {
            appointment: updated,
            previous,
            credit: None,
        })
    }

    /// Completes an appointment and credits the customer's loyalty account.
    ///
    /// Completing an already-completed appointment changes nothing and
    /// returns [`CompletionOutcome::AlreadyCompleted`]. The status is flipped
    /// with a conditional write before the customer is credited, so only one
    /// caller ever credits a given appointment.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidTransition`] if the appointment was cancelled
    /// - [`EngineError::NoFreeCutAvailable`] when redeeming without a free cut,
    ///   checked before any write
    /// - [`EngineError::ConcurrentModification`] if the customer record kept
    ///   changing underneath the credit; the completion is rolled back
    pub fn complete_appointment(
        &self,
        appointment_id: &str,
        settlement: Settlement,
    ) -> EngineResult<CompletionOutcome> {
        let appointment = self.fetch::<Appointment>(appointment_id)?;
        if appointment.status == AppointmentStatus::Completed {
            return Ok(CompletionOutcome::AlreadyCompleted { appointment });
        }
        let previous = appointment.status;
        previous.transition(appointment_id, AppointmentStatus::Completed)?;

        let customer = self.fetch::<Customer>(&appointment.customer_id)?;
        if settlement == Settlement::RedeemFreeCut && !customer.has_free_cut() {
            return Err(EngineError::NoFreeCutAvailable {
                customer_id: customer.id,
            });
        }
        let amount = self.completion_price(&appointment)?;

        let completed = self.store.update_if::<Appointment>(
            self.tenant(),
            appointment_id,
            &status_is(previous),
            status_change(AppointmentStatus::Completed),
        )?;
        let Some(completed) = completed else {
            let latest = self.fetch::<Appointment>(appointment_id)?;
            if latest.status == AppointmentStatus::Completed {
                return Ok(CompletionOutcome::AlreadyCompleted {
                    appointment: latest,
                });
            }
            return Err(concurrent::<Appointment>(appointment_id));
        };

        match self.credit_customer(customer, amount, settlement) {
            Ok((customer, credit)) => {
                info!(
                    tenant = %self.tenant(),
                    appointment_id,
                    customer_id = %customer.id,
                    settlement = ?settlement,
                    points_earned = credit.points_earned,
                    free_cut_earned = credit.free_cut_earned,
                    tier = %credit.tier,
                    "Appointment completed"
                );
                Ok(CompletionOutcome::Completed {
                    appointment: completed,
                    previous,
                    customer,
                    credit,
                })
            }
            Err(err) => {
                warn!(
                    tenant = %self.tenant(),
                    appointment_id,
                    error = %err,
                    "Loyalty credit failed, reverting completion"
                );
                match self.store.update_if::<Appointment>(
                    self.tenant(),
                    appointment_id,
                    &status_is(AppointmentStatus::Completed),
                    status_change(previous),
                ) {
                    Ok(Some(_)) => {}
                    Ok(None) => warn!(
                        tenant = %self.tenant(),
                        appointment_id,
                        "Completion revert skipped, status changed concurrently"
                    ),
                    Err(revert_err) => warn!(
                        tenant = %self.tenant(),
                        appointment_id,
                        error = %revert_err,
                        "Completion revert failed"
                    ),
                }
                Err(err)
            }
        }
    }

    /// Price credited on completion: the booking-time snapshot, else the
    /// current service price.
    pub(super) fn completion_price(&self, appointment: &Appointment) -> EngineResult<Decimal> {
        match appointment.price {
            Some(price) => Ok(price),
            None => Ok(self.fetch::<Service>(&appointment.service_id)?.price),
        }
    }

    /// Applies the completion credit, retrying when another writer updated
    /// the customer in between. `visits` serves as the version guard.
    fn credit_customer(
        &self,
        mut customer: Customer,
        amount: Decimal,
        settlement: Settlement,
    ) -> EngineResult<(Customer, CompletionCredit)> {
        for attempt in 1..=MAX_CREDIT_ATTEMPTS {
            let visits_before = customer.visits;
            let customer_id = customer.id.clone();
            let credit = apply_completion(&mut customer, amount, settlement, &self.config)?;

            let written = self.store.update_if::<Customer>(
                self.tenant(),
                &customer_id,
                &[Filter::eq("visits", visits_before)],
                to_document(&customer)?,
            )?;
            if let Some(written) = written {
                return Ok((written, credit));
            }

            warn!(
                tenant = %self.tenant(),
                customer_id = %customer_id,
                attempt,
                "Customer changed during credit, retrying"
            );
            customer = self.fetch::<Customer>(&customer_id)?;
        }

        Err(concurrent::<Customer>(&customer.id))
    }
}

fn inactive<R: Record>(id: &str) -> EngineError {
    EngineError::Inactive {
        collection: R::COLLECTION.to_string(),
        id: id.to_string(),
    }
}

fn concurrent<R: Record>(id: &str) -> EngineError {
    EngineError::ConcurrentModification {
        collection: R::COLLECTION.to_string(),
        id: id.to_string(),
    }
}
