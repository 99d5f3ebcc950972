//! Configuration loading and management for the Booking and Loyalty Engine.
//!
//! This module loads a barbershop's configuration from YAML files: the tenant
//! id, currency and messaging settings, loyalty rules, opening hours and the
//! loyalty tier bands.
//!
//! # Example
//!
//! ```no_run
//! use barbershop_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/demo").unwrap();
//! println!("Loaded shop: {}", config.config().shop().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, LoyaltySettings, MessagingConfig, ScheduleConfig, ShopConfig, TiersConfig,
};
