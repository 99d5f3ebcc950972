//! Core data models for the Booking and Loyalty Engine.
//!
//! This module contains the records the engine reads and produces: customers,
//! appointments, the service/barber catalog and loyalty tiers.

mod appointment;
mod audit;
mod catalog;
mod customer;
mod tenant;
mod tier;

pub use appointment::{Appointment, AppointmentStatus, slot_time};
pub use audit::AuditStep;
pub use catalog::{Barber, Service};
pub use customer::{Customer, NewCustomer};
pub use tenant::TenantId;
pub use tier::{LoyaltyTier, NextTier, TierTable};
