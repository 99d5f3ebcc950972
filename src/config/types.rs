//! Configuration types for a barbershop.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`EngineConfig`] built from them.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::format::{CurrencyFormat, DEFAULT_COUNTRY_CODE};
use crate::loyalty::{DEFAULT_FREE_CUT_CYCLE, DEFAULT_POINTS_RATE};
use crate::models::{LoyaltyTier, TenantId, TierTable, slot_time};

/// Messaging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Country code prepended to national phone numbers in deep links.
    pub country_code: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

/// Loyalty program settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoyaltySettings {
    /// Points earned per currency unit spent.
    pub points_rate: Decimal,
    /// Paid cuts needed to earn one free cut.
    pub free_cut_cycle: u32,
}

impl Default for LoyaltySettings {
    fn default() -> Self {
        Self {
            points_rate: DEFAULT_POINTS_RATE,
            free_cut_cycle: DEFAULT_FREE_CUT_CYCLE,
        }
    }
}

/// Opening hours and slot length used to offer booking times.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// First bookable slot of the day.
    #[serde(with = "slot_time")]
    pub opening_time: NaiveTime,
    /// Closing time; no slot starts at or after it.
    #[serde(with = "slot_time")]
    pub closing_time: NaiveTime,
    /// Length of one slot in minutes.
    pub slot_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            opening_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            closing_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_minutes: 30,
        }
    }
}

/// Shop configuration file structure (`shop.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
    /// The tenant every store call is scoped to.
    pub tenant_id: TenantId,
    /// Display name of the shop.
    pub name: String,
    /// Currency rendering.
    #[serde(default)]
    pub currency: CurrencyFormat,
    /// Messaging settings.
    #[serde(default)]
    pub messaging: MessagingConfig,
    /// Loyalty program settings.
    #[serde(default)]
    pub loyalty: LoyaltySettings,
    /// Opening hours.
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Tier configuration file structure (`tiers.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    /// The loyalty bands, in any order.
    pub tiers: Vec<LoyaltyTier>,
}

/// The complete, validated engine configuration for one barbershop.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    shop: ShopConfig,
    tiers: TierTable,
}

impl EngineConfig {
    /// Creates a configuration from its parts, validating the shop settings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the tenant id is blank, the
    /// points rate is negative, the free-cut cycle is zero, the schedule is
    /// empty, or the country code is not made of digits.
    pub fn new(shop: ShopConfig, tiers: TierTable) -> EngineResult<Self> {
        if shop.tenant_id.as_str().trim().is_empty() {
            return Err(invalid("tenant_id", "must not be blank"));
        }
        if shop.loyalty.points_rate.is_sign_negative() {
            return Err(invalid("loyalty.points_rate", "must not be negative"));
        }
        if shop.loyalty.free_cut_cycle == 0 {
            return Err(invalid("loyalty.free_cut_cycle", "must be at least 1"));
        }
        if shop.schedule.slot_minutes == 0 {
            return Err(invalid("schedule.slot_minutes", "must be at least 1"));
        }
        if shop.schedule.opening_time >= shop.schedule.closing_time {
            return Err(invalid(
                "schedule",
                "opening_time must be before closing_time",
            ));
        }
        let country_code = &shop.messaging.country_code;
        if country_code.is_empty() || !country_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("messaging.country_code", "must contain only digits"));
        }

        Ok(Self { shop, tiers })
    }

    /// Returns the shop settings.
    pub fn shop(&self) -> &ShopConfig {
        &self.shop
    }

    /// Returns the tenant this configuration belongs to.
    pub fn tenant(&self) -> &TenantId {
        &self.shop.tenant_id
    }

    /// Returns the validated tier table.
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Returns the loyalty settings.
    pub fn loyalty(&self) -> &LoyaltySettings {
        &self.shop.loyalty
    }

    /// Returns the schedule.
    pub fn schedule(&self) -> &ScheduleConfig {
        &self.shop.schedule
    }

    /// Returns the currency format.
    pub fn currency(&self) -> &CurrencyFormat {
        &self.shop.currency
    }

    /// Returns the messaging settings.
    pub fn messaging(&self) -> &MessagingConfig {
        &self.shop.messaging
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}
