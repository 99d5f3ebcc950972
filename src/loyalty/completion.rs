//! Loyalty credit applied when an appointment is completed.
//!
//! A paid completion earns points, counts toward the free-cut cycle and may
//! move the customer to another tier. A redeemed completion spends a free cut
//! and earns nothing. Each rule application is recorded as an [`AuditStep`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::format::format_currency_with;
use crate::models::{AuditStep, Customer, NextTier};

use super::free_cuts::{LoyaltyProgress, record_paid_cut, redeem_free_cut};
use super::points::calculate_loyalty_points;
use super::tiers::{get_next_tier, get_tier_by_points};

/// How a completed appointment is paid for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    /// The customer paid the service price.
    #[default]
    Paid,
    /// The customer spent a free cut.
    RedeemFreeCut,
}

/// What a completion did to a customer's loyalty account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCredit {
    /// How the appointment was settled.
    pub settlement: Settlement,
    /// Amount added to the customer's total spend.
    pub amount_charged: Decimal,
    /// Points added to the balance.
    pub points_earned: u64,
    /// Whether the cut completed a free-cut cycle.
    pub free_cut_earned: bool,
    /// Tier before the completion.
    pub previous_tier: String,
    /// Tier after the completion.
    pub tier: String,
    /// Rule applications, in order.
    pub audit_steps: Vec<AuditStep>,
}

impl CompletionCredit {
    /// Returns true if the completion moved the customer to another tier.
    pub fn tier_changed(&self) -> bool {
        self.previous_tier != self.tier
    }
}

/// Credits `customer` for one completed appointment priced at `amount`.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::NoFreeCutAvailable`] when redeeming
/// without a free cut. The customer is unchanged on error.
///
/// # Examples
///
/// ```no_run
/// use barbershop_engine::config::ConfigLoader;
/// use barbershop_engine::loyalty::{Settlement, apply_completion};
/// use barbershop_engine::models::{Customer, NewCustomer};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/demo")?.into_config();
/// let mut customer = Customer::register(
///     NewCustomer { name: "John Doe".into(), phone: "11987654321".into(), email: None },
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     &config.tiers().lowest().name,
/// );
///
/// let credit = apply_completion(&mut customer, Decimal::from(50), Settlement::Paid, &config)?;
/// assert_eq!(credit.points_earned, 25);
/// # Ok::<(), barbershop_engine::error::EngineError>(())
/// ```
pub fn apply_completion(
    customer: &mut Customer,
    amount: Decimal,
    settlement: Settlement,
    config: &EngineConfig,
) -> EngineResult<CompletionCredit> {
    let previous_tier = customer.tier.clone();
    let mut audit_steps = Vec::new();

    let (amount_charged, points_earned, free_cut_earned) = match settlement {
        Settlement::Paid => {
            let rate = config.loyalty().points_rate;
            let cycle = config.loyalty().free_cut_cycle;

            let points = calculate_loyalty_points(amount, rate);
            customer.loyalty_points = customer.loyalty_points.saturating_add(points);
            customer.total_spent += amount;
            audit_steps.push(AuditStep {
                step_number: 1,
                rule_id: "loyalty_points".to_string(),
                rule_name: "Loyalty Points".to_string(),
                input: serde_json::json!({
                    "amount_spent": amount.normalize().to_string(),
                    "rate": rate.normalize().to_string()
                }),
                output: serde_json::json!({
                    "points": points,
                    "balance": customer.loyalty_points
                }),
                reasoning: format!(
                    "floor({} x {}) = {} points",
                    amount.normalize(),
                    rate.normalize(),
                    points
                ),
            });

            let cuts_before = customer.loyalty_cuts;
            let earned = record_paid_cut(customer, cycle);
            audit_steps.push(AuditStep {
                step_number: 2,
                rule_id: "free_cut_cycle".to_string(),
                rule_name: "Free Cut Cycle".to_string(),
                input: serde_json::json!({
                    "loyalty_cuts": cuts_before,
                    "cycle": cycle
                }),
                output: serde_json::json!({
                    "loyalty_cuts": customer.loyalty_cuts,
                    "free_cuts_available": customer.free_cuts_available,
                    "free_cut_earned": earned
                }),
                reasoning: if earned {
                    format!("Paid cut {} of {} earns a free cut", cycle, cycle)
                } else {
                    format!("Paid cut counted: {}/{}", customer.loyalty_cuts, cycle)
                },
            });

            (amount, points, earned)
        }
        Settlement::RedeemFreeCut => {
            let available_before = customer.free_cuts_available;
            redeem_free_cut(customer)?;
            audit_steps.push(AuditStep {
                step_number: 1,
                rule_id: "free_cut_redemption".to_string(),
                rule_name: "Free Cut Redemption".to_string(),
                input: serde_json::json!({
                    "free_cuts_available": available_before,
                    "service_price": amount.normalize().to_string()
                }),
                output: serde_json::json!({
                    "free_cuts_available": customer.free_cuts_available,
                    "loyalty_cuts": customer.loyalty_cuts
                }),
                reasoning: "Free cut redeemed; no points earned and cycle unchanged".to_string(),
            });

            (Decimal::ZERO, 0, false)
        }
    };

    customer.visits = customer.visits.saturating_add(1);
    customer.total_cuts_completed = customer.total_cuts_completed.saturating_add(1);

    let tier = get_tier_by_points(customer.loyalty_points, config.tiers()).name.clone();
    audit_steps.push(AuditStep {
        step_number: audit_steps.len() as u32 + 1,
        rule_id: "tier_assignment".to_string(),
        rule_name: "Tier Assignment".to_string(),
        input: serde_json::json!({
            "loyalty_points": customer.loyalty_points,
            "previous_tier": previous_tier
        }),
        output: serde_json::json!({ "tier": tier }),
        reasoning: if tier == previous_tier {
            format!("{} points stay in {}", customer.loyalty_points, tier)
        } else {
            format!(
                "{} points move customer from {} to {}",
                customer.loyalty_points, previous_tier, tier
            )
        },
    });
    customer.tier = tier.clone();

    Ok(CompletionCredit {
        settlement,
        amount_charged,
        points_earned,
        free_cut_earned,
        previous_tier,
        tier,
        audit_steps,
    })
}

/// A customer's loyalty standing, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltySummary {
    /// The customer.
    pub customer_id: String,
    /// The customer's name.
    pub name: String,
    /// Point balance.
    pub points: u64,
    /// Tier containing the balance.
    pub tier: String,
    /// Next tier, absent in the topmost band.
    pub next_tier: Option<NextTier>,
    /// Free-cut cycle position.
    pub progress: LoyaltyProgress,
    /// Progress rendered as `cuts/cycle`.
    pub progress_text: String,
    /// Free cuts available.
    pub free_cuts_available: u32,
    /// Completed visits.
    pub visits: u32,
    /// Total spend.
    pub total_spent: Decimal,
    /// Total spend in the shop's currency format.
    pub total_spent_text: String,
}

impl LoyaltySummary {
    /// Summarises `customer` against the shop's tiers and cycle.
    pub fn for_customer(customer: &Customer, config: &EngineConfig) -> Self {
        let progress = LoyaltyProgress::of(customer, config.loyalty().free_cut_cycle);
        Self {
            customer_id: customer.id.clone(),
            name: customer.name.clone(),
            points: customer.loyalty_points,
            tier: get_tier_by_points(customer.loyalty_points, config.tiers())
                .name
                .clone(),
            next_tier: get_next_tier(customer.loyalty_points, config.tiers()),
            progress_text: progress.to_string(),
            progress,
            free_cuts_available: customer.free_cuts_available,
            visits: customer.visits,
            total_spent: customer.total_spent,
            total_spent_text: format_currency_with(customer.total_spent, config.currency()),
        }
    }
}
