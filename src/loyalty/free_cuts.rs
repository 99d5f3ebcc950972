//! Free-cut cycle accounting and completion hints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Customer;

/// Paid cuts per free cut when a shop does not configure a cycle.
pub const DEFAULT_FREE_CUT_CYCLE: u32 = 10;

/// Counts one completed paid cut toward the next free cut.
///
/// When the counter reaches `cycle` it resets to zero and one free cut is
/// added. Returns true if a free cut was earned.
///
/// # Examples
///
/// ```
/// use barbershop_engine::loyalty::record_paid_cut;
/// use barbershop_engine::models::{Customer, NewCustomer};
/// use chrono::NaiveDate;
///
/// let mut customer = Customer::register(
///     NewCustomer { name: "John Doe".into(), phone: "11987654321".into(), email: None },
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "Bronze",
/// );
/// customer.loyalty_cuts = 9;
///
/// assert!(record_paid_cut(&mut customer, 10));
/// assert_eq!(customer.loyalty_cuts, 0);
/// assert_eq!(customer.free_cuts_available, 1);
/// ```
pub fn record_paid_cut(customer: &mut Customer, cycle: u32) -> bool {
    customer.loyalty_cuts = customer.loyalty_cuts.saturating_add(1);
    if customer.loyalty_cuts >= cycle.max(1) {
        customer.loyalty_cuts = 0;
        customer.free_cuts_available = customer.free_cuts_available.saturating_add(1);
        true
    } else {
        false
    }
}

/// Spends one free cut. The cycle counter is not touched.
///
/// # Errors
///
/// Returns [`EngineError::NoFreeCutAvailable`] if the customer has none; the
/// customer is left unchanged.
pub fn redeem_free_cut(customer: &mut Customer) -> EngineResult<()> {
    if !customer.has_free_cut() {
        return Err(EngineError::NoFreeCutAvailable {
            customer_id: customer.id.clone(),
        });
    }
    customer.free_cuts_available -= 1;
    Ok(())
}

/// Operator guidance shown when completing an appointment.
///
/// The three cases are mutually exclusive and checked in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionHint {
    /// The customer can redeem a free cut.
    RedeemFreeCut {
        /// Free cuts on the account.
        available: u32,
    },
    /// The next paid cut earns a free cut.
    AboutToEarnFreeCut,
    /// Plain completion.
    Standard,
}

/// Derives the completion hint for a customer.
pub fn completion_hint(customer: &Customer, cycle: u32) -> CompletionHint {
    if customer.has_free_cut() {
        CompletionHint::RedeemFreeCut {
            available: customer.free_cuts_available,
        }
    } else if customer.loyalty_cuts.saturating_add(1) >= cycle.max(1) {
        CompletionHint::AboutToEarnFreeCut
    } else {
        CompletionHint::Standard
    }
}

/// Position in the free-cut cycle, rendered as `cuts/cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyProgress {
    /// Paid cuts counted so far.
    pub cuts: u32,
    /// Cuts needed for a free one.
    pub cycle: u32,
}

impl LoyaltyProgress {
    /// Reads the progress of `customer`.
    pub fn of(customer: &Customer, cycle: u32) -> Self {
        Self {
            cuts: customer.loyalty_cuts,
            cycle,
        }
    }

    /// Paid cuts still needed for the next free cut.
    pub fn remaining(&self) -> u32 {
        self.cycle.saturating_sub(self.cuts)
    }
}

impl fmt::Display for LoyaltyProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cuts, self.cycle)
    }
}
