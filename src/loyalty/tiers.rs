//! Tier lookup and next-tier projection.

use crate::models::{LoyaltyTier, NextTier, TierTable};

/// Returns the band containing `points`.
///
/// A validated [`TierTable`] partitions `[0, ∞)`, so there is always exactly
/// one match.
pub fn get_tier_by_points(points: u64, tiers: &TierTable) -> &LoyaltyTier {
    tiers.tier_for_points(points)
}

/// Returns the next-higher band and the points needed to reach it.
///
/// Returns `None` when `points` already falls in the topmost band.
///
/// # Examples
///
/// ```
/// use barbershop_engine::loyalty::get_next_tier;
/// use barbershop_engine::models::{LoyaltyTier, TierTable};
///
/// let table = TierTable::new(vec![
///     LoyaltyTier { name: "Bronze".to_string(), min_points: 0, max_points: Some(99) },
///     LoyaltyTier { name: "Silver".to_string(), min_points: 100, max_points: None },
/// ]).unwrap();
///
/// let next = get_next_tier(40, &table).unwrap();
/// assert_eq!(next.tier.name, "Silver");
/// assert_eq!(next.points_needed, 60);
/// assert!(get_next_tier(100, &table).is_none());
/// ```
pub fn get_next_tier(points: u64, tiers: &TierTable) -> Option<NextTier> {
    let position = tiers.position_for_points(points);
    tiers.tier_after(position).map(|next| NextTier {
        tier: next.clone(),
        // `next` starts above `points`, otherwise it would be the current band.
        points_needed: next.min_points - points,
    })
}
