//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a barbershop's
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{TenantId, TierTable};

use super::types::{EngineConfig, ShopConfig, TiersConfig};

/// Loads and provides access to a barbershop's configuration.
///
/// # Directory Structure
///
/// ```text
/// config/demo/
/// ├── shop.yaml   # Tenant, currency, messaging, loyalty and schedule settings
/// └── tiers.yaml  # Loyalty tier bands
/// ```
///
/// # Example
///
/// ```no_run
/// use barbershop_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/demo")?;
/// println!("Tenant: {}", loader.tenant());
/// # Ok::<(), barbershop_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The tier bands do not partition the point range (`TierMisconfigured`)
    /// - A shop setting is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let shop = Self::load_yaml::<ShopConfig>(&path.join("shop.yaml"))?;
        let tiers_config = Self::load_yaml::<TiersConfig>(&path.join("tiers.yaml"))?;
        let tiers = TierTable::new(tiers_config.tiers)?;

        let config = EngineConfig::new(shop, tiers)?;
        tracing::debug!(
            tenant = %config.tenant(),
            tiers = config.tiers().tiers().len(),
            "Loaded shop configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// Returns the tenant the configuration belongs to.
    pub fn tenant(&self) -> &TenantId {
        self.config.tenant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/demo"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "barbershop-engine-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.tenant().as_str(), "demo");
        assert_eq!(loader.config().shop().name, "Barbearia Demo");
    }

    #[test]
    fn test_demo_tiers_loaded_in_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let names: Vec<&str> = loader
            .config()
            .tiers()
            .tiers()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bronze", "Silver", "Gold"]);
    }

    #[test]
    fn test_demo_loyalty_settings() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config().loyalty().points_rate, Decimal::new(5, 1));
        assert_eq!(loader.config().loyalty().free_cut_cycle, 10);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("shop.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = scratch_dir("malformed");
        fs::write(dir.join("shop.yaml"), "tenant_id: [unclosed").unwrap();

        let result = ConfigLoader::load(&dir);
        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("shop.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_tier_gap_fails_loudly() {
        let dir = scratch_dir("gap");
        fs::write(dir.join("shop.yaml"), "tenant_id: gap\nname: Gap Shop\n").unwrap();
        fs::write(
            dir.join("tiers.yaml"),
            "tiers:\n  - name: Bronze\n    min_points: 0\n    max_points: 99\n  - name: Silver\n    min_points: 200\n",
        )
        .unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::TierMisconfigured { .. })));
        fs::remove_dir_all(dir).ok();
    }
}
