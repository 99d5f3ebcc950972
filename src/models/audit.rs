//! Audit steps recorded by loyalty accounting.

use serde::{Deserialize, Serialize};

/// A single step in a loyalty audit trail.
///
/// Each step captures the input, output, and reasoning for a rule application,
/// so operators can see why a customer's balance changed.
///
/// # Example
///
/// ```
/// use barbershop_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "loyalty_points".to_string(),
///     rule_name: "Loyalty Points".to_string(),
///     input: serde_json::json!({"amount_spent": "50.00", "rate": "0.5"}),
///     output: serde_json::json!({"points": 25}),
///     reasoning: "floor(50.00 x 0.5) = 25 points".to_string(),
/// };
/// assert_eq!(step.rule_id, "loyalty_points");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
