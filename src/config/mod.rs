//! Configuration management for the quota engine
//!
//! All billing conversion parameters are injected explicitly at
//! construction time. Nothing in this crate reads ambient state: the
//! session's `quota_per_unit` is loaded once (from file or defaults) and
//! passed into the formatter, which treats it as immutable.

use crate::utils::error::{QuotaError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Quota units per display currency unit ($1 = 500,000 quota units,
/// i.e. $0.002 per 1K tokens at ratio 1).
pub const DEFAULT_QUOTA_PER_UNIT: Decimal = dec!(500000);

/// Billing configuration, read once at session start
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BillingConfig {
    /// How many raw quota units make up one display currency unit
    pub quota_per_unit: Decimal,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            quota_per_unit: DEFAULT_QUOTA_PER_UNIT,
        }
    }
}

impl BillingConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading billing configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .map_err(|e| QuotaError::config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| QuotaError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Billing configuration loaded successfully");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.quota_per_unit <= Decimal::ZERO {
            return Err(QuotaError::config(format!(
                "quota_per_unit must be positive, got {}",
                self.quota_per_unit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BillingConfig::default();
        assert_eq!(config.quota_per_unit, dec!(500000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "quota_per_unit: 250000").unwrap();

        let config = BillingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.quota_per_unit, dec!(250000));
    }

    #[test]
    fn test_from_file_defaults_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{}}").unwrap();

        let config = BillingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.quota_per_unit, DEFAULT_QUOTA_PER_UNIT);
    }

    #[test]
    fn test_validate_rejects_non_positive_unit() {
        let config = BillingConfig {
            quota_per_unit: Decimal::ZERO,
        };
        assert!(matches!(config.validate(), Err(QuotaError::Config(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = BillingConfig::from_file("/nonexistent/billing.yaml");
        assert!(matches!(result, Err(QuotaError::Config(_))));
    }
}
