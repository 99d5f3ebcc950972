//! Front desk orchestration.
//!
//! [`FrontDesk`] ties the pure booking and loyalty rules to a
//! [`DocumentStore`] for one shop. It validates input at the boundary, reads
//! the records a rule needs, applies the rule and writes the result back
//! with the store's conditional writes.

mod appointments;
mod views;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::booking::{validate_contact, validation_error};
use crate::config::EngineConfig;
use crate::error::{CollaboratorError, EngineError, EngineResult};
use crate::models::{Barber, Customer, NewCustomer, Service, TenantId};
use crate::store::{Document, DocumentStore, Filter, Record};
use crate::validation::validate_name;

pub use appointments::{CompletionOutcome, StatusChange};
pub use views::CompletionPreview;

/// Booking and loyalty operations for one shop.
///
/// # Example
///
/// ```no_run
/// use barbershop_engine::config::ConfigLoader;
/// use barbershop_engine::front_desk::FrontDesk;
/// use barbershop_engine::store::MemoryStore;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/demo")?.into_config();
/// let desk = FrontDesk::new(MemoryStore::new(), config);
/// let haircut = desk.add_service("Haircut", Decimal::from(50))?;
/// assert!(haircut.active);
/// # Ok::<(), barbershop_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct FrontDesk<S> {
    store: S,
    config: EngineConfig,
}

impl<S: DocumentStore> FrontDesk<S> {
    /// Creates a front desk writing to `store` under the configured tenant.
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Returns the shop configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn tenant(&self) -> &TenantId {
        self.config.tenant()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Reads a record by id, reporting a missing one as [`EngineError::RecordNotFound`].
    fn fetch<R: Record>(&self, id: &str) -> EngineResult<R> {
        self.store.get(self.tenant(), id).map_err(record_not_found)
    }

    /// Adds a service to the catalog. New services are active.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if the name is too short or the
    /// price is not positive.
    pub fn add_service(&self, name: &str, price: Decimal) -> EngineResult<Service> {
        if !validate_name(name) {
            return Err(validation_error("name", "must have at least 3 characters"));
        }
        if price <= Decimal::ZERO {
            return Err(validation_error("price", "must be greater than zero"));
        }

        let service = self.store.create(
            self.tenant(),
            Service {
                id: String::new(),
                name: name.trim().to_string(),
                price,
                active: true,
            },
        )?;
        info!(tenant = %self.tenant(), service_id = %service.id, "Service added");
        Ok(service)
    }

    /// Shows or hides a service in the booking flow.
    pub fn set_service_active(&self, service_id: &str, active: bool) -> EngineResult<Service> {
        self.store
            .update::<Service>(self.tenant(), service_id, active_flag(active))
            .map_err(record_not_found)
    }

    /// Returns the services offered in the booking flow.
    pub fn active_services(&self) -> EngineResult<Vec<Service>> {
        Ok(self
            .store
            .find::<Service>(self.tenant(), &[Filter::eq("active", true)])?)
    }

    /// Adds a barber. New barbers accept bookings.
    pub fn add_barber(&self, name: &str) -> EngineResult<Barber> {
        if !validate_name(name) {
            return Err(validation_error("name", "must have at least 3 characters"));
        }

        let barber = self.store.create(
            self.tenant(),
            Barber {
                id: String::new(),
                name: name.trim().to_string(),
                active: true,
            },
        )?;
        info!(tenant = %self.tenant(), barber_id = %barber.id, "Barber added");
        Ok(barber)
    }

    /// Opens or closes a barber's agenda.
    pub fn set_barber_active(&self, barber_id: &str, active: bool) -> EngineResult<Barber> {
        self.store
            .update::<Barber>(self.tenant(), barber_id, active_flag(active))
            .map_err(record_not_found)
    }

    /// Returns the barbers accepting bookings.
    pub fn active_barbers(&self) -> EngineResult<Vec<Barber>> {
        Ok(self
            .store
            .find::<Barber>(self.tenant(), &[Filter::eq("active", true)])?)
    }

    /// Registers a customer with zeroed loyalty counters in the lowest tier.
    ///
    /// The phone number is stored as digits only and must be unique.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] for bad contact details and
    /// [`EngineError::DuplicateCustomer`] if the phone number is taken.
    pub fn register_customer(&self, details: NewCustomer) -> EngineResult<Customer> {
        validate_contact(&details)?;

        let phone = phone_digits(&details.phone);
        let customer = Customer::register(
            NewCustomer {
                phone: phone.clone(),
                email: details.email.map(|e| e.trim().to_lowercase()),
                ..details
            },
            self.today(),
            &self.config.tiers().lowest().name,
        );

        let created = self
            .store
            .create_unless(self.tenant(), customer, &[Filter::eq("phone", phone.clone())])?
            .ok_or(EngineError::DuplicateCustomer { phone })?;
        info!(tenant = %self.tenant(), customer_id = %created.id, "Customer registered");
        Ok(created)
    }

    /// Looks a customer up by phone number, ignoring formatting.
    pub fn find_customer_by_phone(&self, phone: &str) -> EngineResult<Option<Customer>> {
        let mut found: Vec<Customer> = self
            .store
            .find(self.tenant(), &[Filter::eq("phone", phone_digits(phone))])?;
        Ok(found.pop())
    }

    /// Returns the customer with `customer_id`.
    pub fn customer(&self, customer_id: &str) -> EngineResult<Customer> {
        self.fetch(customer_id)
    }

    /// Deletes a customer. Their appointments are kept.
    pub fn delete_customer(&self, customer_id: &str) -> EngineResult<()> {
        self.store
            .delete::<Customer>(self.tenant(), customer_id)
            .map_err(record_not_found)?;
        info!(tenant = %self.tenant(), customer_id, "Customer deleted");
        Ok(())
    }
}

fn record_not_found(error: CollaboratorError) -> EngineError {
    match error {
        CollaboratorError::NotFound { collection, id } => {
            EngineError::RecordNotFound { collection, id }
        }
        other => other.into(),
    }
}

fn active_flag(active: bool) -> Document {
    let mut changes = Document::new();
    changes.insert("active".to_string(), active.into());
    changes
}

fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::store::MemoryStore;

    pub fn desk() -> FrontDesk<MemoryStore> {
        let config = ConfigLoader::load("./config/demo").unwrap().into_config();
        FrontDesk::new(MemoryStore::new(), config)
    }

    pub fn contact(name: &str, phone: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
        }
    }
}
