//! Loyalty point calculation.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Points earned per currency unit when a shop does not configure a rate (0.5).
pub const DEFAULT_POINTS_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Returns `floor(amount_spent * rate)` as a non-negative point count.
///
/// Rounding is always toward zero. A negative amount or rate earns nothing,
/// and products beyond `u64::MAX` saturate.
///
/// # Examples
///
/// ```
/// use barbershop_engine::loyalty::{DEFAULT_POINTS_RATE, calculate_loyalty_points};
/// use rust_decimal::Decimal;
///
/// assert_eq!(calculate_loyalty_points(Decimal::from(15), DEFAULT_POINTS_RATE), 7);
/// assert_eq!(calculate_loyalty_points(Decimal::from(100), DEFAULT_POINTS_RATE), 50);
/// ```
pub fn calculate_loyalty_points(amount_spent: Decimal, rate: Decimal) -> u64 {
    if amount_spent <= Decimal::ZERO || rate <= Decimal::ZERO {
        return 0;
    }

    amount_spent
        .checked_mul(rate)
        .map(|product| product.trunc().to_u64().unwrap_or(u64::MAX))
        .unwrap_or(u64::MAX)
}
