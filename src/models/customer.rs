//! Customer model and related types.
//!
//! This module defines the Customer record, which carries the loyalty
//! counters, and the NewCustomer payload used at registration.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contact details supplied when a customer registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    /// Full name.
    pub name: String,
    /// Phone number as typed by the customer.
    pub phone: String,
    /// Optional email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// A registered customer and their loyalty state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Opaque identifier assigned by the store.
    #[serde(default)]
    pub id: String,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Optional email address.
    #[serde(default)]
    pub email: Option<String>,
    /// The date the customer registered.
    pub registered_at: NaiveDate,
    /// Points accumulated from spend.
    pub loyalty_points: u64,
    /// Name of the tier the points fall into.
    pub tier: String,
    /// Paid cuts counted toward the next free cut.
    pub loyalty_cuts: u32,
    /// Free cuts earned and not yet redeemed.
    pub free_cuts_available: u32,
    /// Total amount paid across completed appointments.
    pub total_spent: Decimal,
    /// Completed visits, paid or free.
    pub visits: u32,
    /// Completed cuts, paid or free.
    pub total_cuts_completed: u32,
}

impl Customer {
    /// Creates a freshly registered customer with all counters zeroed.
    ///
    /// # Examples
    ///
    /// ```
    /// use barbershop_engine::models::{Customer, NewCustomer};
    /// use chrono::NaiveDate;
    ///
    /// let customer = Customer::register(
    ///     NewCustomer {
    ///         name: "John Doe".to_string(),
    ///         phone: "11987654321".to_string(),
    ///         email: None,
    ///     },
    ///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     "Bronze",
    /// );
    /// assert_eq!(customer.loyalty_points, 0);
    /// assert_eq!(customer.tier, "Bronze");
    /// ```
    pub fn register(details: NewCustomer, registered_at: NaiveDate, base_tier: &str) -> Self {
        Self {
            id: String::new(),
            name: details.name.trim().to_string(),
            phone: details.phone,
            email: details.email,
            registered_at,
            loyalty_points: 0,
            tier: base_tier.to_string(),
            loyalty_cuts: 0,
            free_cuts_available: 0,
            total_spent: Decimal::ZERO,
            visits: 0,
            total_cuts_completed: 0,
        }
    }

    /// Returns true if the customer can redeem a free cut.
    pub fn has_free_cut(&self) -> bool {
        self.free_cuts_available > 0
    }
}
