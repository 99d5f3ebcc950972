//! Loyalty accounting for the Booking and Loyalty Engine.
//!
//! This module contains the point calculation, tier lookup and next-tier
//! projection, free-cut accrual and redemption, the completion hints shown to
//! operators, and the credit applied to a customer when an appointment is
//! completed.

mod completion;
mod free_cuts;
mod points;
mod tiers;

pub use completion::{CompletionCredit, LoyaltySummary, Settlement, apply_completion};
pub use free_cuts::{
    CompletionHint, DEFAULT_FREE_CUT_CYCLE, LoyaltyProgress, completion_hint, record_paid_cut,
    redeem_free_cut,
};
pub use points::{DEFAULT_POINTS_RATE, calculate_loyalty_points};
pub use tiers::{get_next_tier, get_tier_by_points};
