//! Loyalty tier models.
//!
//! A [`TierTable`] is the validated, ordered set of [`LoyaltyTier`] bands.
//! Construction fails loudly when the bands leave gaps, overlap or do not
//! start at zero points, so a valid table always maps every point balance to
//! exactly one band.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A named loyalty band keyed by a cumulative points range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyTier {
    /// Display name (e.g., "Bronze").
    pub name: String,
    /// Lowest point balance in the band (inclusive).
    pub min_points: u64,
    /// Highest point balance in the band (inclusive). `None` means unbounded.
    #[serde(default)]
    pub max_points: Option<u64>,
}

impl LoyaltyTier {
    /// Returns true if `points` falls inside this band's own bounds.
    pub fn contains(&self, points: u64) -> bool {
        points >= self.min_points && self.max_points.is_none_or(|max| points <= max)
    }
}

/// The next band above a point balance, and how far away it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextTier {
    /// The next-higher band.
    pub tier: LoyaltyTier,
    /// Points still needed to enter it. Always at least 1.
    pub points_needed: u64,
}

/// An ordered, contiguous partition of `[0, ∞)` into loyalty bands.
///
/// The topmost band is open-ended: balances above its `max_points` still
/// belong to it.
///
/// # Examples
///
/// ```
/// use barbershop_engine::models::{LoyaltyTier, TierTable};
///
/// let table = TierTable::new(vec![
///     LoyaltyTier { name: "Bronze".to_string(), min_points: 0, max_points: Some(99) },
///     LoyaltyTier { name: "Silver".to_string(), min_points: 100, max_points: Some(499) },
///     LoyaltyTier { name: "Gold".to_string(), min_points: 500, max_points: None },
/// ]).unwrap();
///
/// assert_eq!(table.tier_for_points(250).name, "Silver");
/// assert_eq!(table.lowest().name, "Bronze");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<LoyaltyTier>,
}

impl TierTable {
    /// Builds a table from bands in any order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TierMisconfigured`] if the list is empty, a name is
    /// blank, the lowest band does not start at 0, a band ends before it starts,
    /// a band other than the topmost is unbounded, or neighbouring bands leave a
    /// gap or overlap.
    pub fn new(mut tiers: Vec<LoyaltyTier>) -> EngineResult<Self> {
        if tiers.is_empty() {
            return Err(misconfigured("at least one tier is required".to_string()));
        }

        tiers.sort_by_key(|t| t.min_points);

        if let Some(blank) = tiers.iter().find(|t| t.name.trim().is_empty()) {
            return Err(misconfigured(format!(
                "tier starting at {} has no name",
                blank.min_points
            )));
        }

        if tiers[0].min_points != 0 {
            return Err(misconfigured(format!(
                "lowest tier '{}' starts at {} instead of 0",
                tiers[0].name, tiers[0].min_points
            )));
        }

        if let Some(inverted) = tiers
            .iter()
            .find(|t| t.max_points.is_some_and(|max| max < t.min_points))
        {
            return Err(misconfigured(format!(
                "tier '{}' ends before it starts at {}",
                inverted.name, inverted.min_points
            )));
        }

        for pair in tiers.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            let Some(max) = lower.max_points else {
                return Err(misconfigured(format!(
                    "tier '{}' is unbounded but '{}' comes after it",
                    lower.name, upper.name
                )));
            };
            if upper.min_points <= max {
                return Err(misconfigured(format!(
                    "tiers '{}' and '{}' overlap at {}",
                    lower.name, upper.name, upper.min_points
                )));
            }
            if upper.min_points > max + 1 {
                return Err(misconfigured(format!(
                    "gap between tier '{}' (ends at {}) and '{}' (starts at {})",
                    lower.name, max, upper.name, upper.min_points
                )));
            }
        }

        Ok(Self { tiers })
    }

    /// Returns the bands in ascending order.
    pub fn tiers(&self) -> &[LoyaltyTier] {
        &self.tiers
    }

    /// Returns the band new customers start in.
    pub fn lowest(&self) -> &LoyaltyTier {
        &self.tiers[0]
    }

    /// Returns the topmost band.
    pub fn highest(&self) -> &LoyaltyTier {
        &self.tiers[self.tiers.len() - 1]
    }

    /// Returns the index of the band containing `points`.
    pub fn position_for_points(&self, points: u64) -> usize {
        // The first band starts at 0, so at least one band qualifies.
        self.tiers
            .partition_point(|t| t.min_points <= points)
            .saturating_sub(1)
    }

    /// Returns the band containing `points`.
    pub fn tier_for_points(&self, points: u64) -> &LoyaltyTier {
        &self.tiers[self.position_for_points(points)]
    }

    /// Returns the band after the one at `position`, if any.
    pub fn tier_after(&self, position: usize) -> Option<&LoyaltyTier> {
        self.tiers.get(position + 1)
    }
}

fn misconfigured(message: String) -> EngineError {
    EngineError::TierMisconfigured { message }
}
