//! Bloom filter configuration and validation
//!
//! # Example
//!
//! ```
//! use probably::{BloomConfigBuilder, HashScheme};
//!
//! let config = BloomConfigBuilder::new()
//!     .filter_size(10_000)
//!     .fp_rate(0.001)
//!     .hash_scheme(HashScheme::Sha2)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.filter_size, 10_000);
//! ```

use serde::{Deserialize, Serialize};

use super::hash_functions::HashScheme;
use crate::error::FilterError;

/// Bloom filter configuration
///
/// Two filters can be merged only when their configurations are equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomConfig {
    /// Expected number of elements (n)
    pub filter_size: usize,
    /// Target false positive rate, strictly between 0 and 1
    pub fp_rate: f64,
    /// Hash functions seeding the probe generator
    #[serde(default)]
    pub hash_scheme: HashScheme,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            filter_size: 1000,
            fp_rate: 0.01,
            hash_scheme: HashScheme::default(),
        }
    }
}

impl BloomConfig {
    /// Create a new configuration with validation
    pub fn new(filter_size: usize, fp_rate: f64) -> Result<Self, FilterError> {
        let config = Self {
            filter_size,
            fp_rate,
            hash_scheme: HashScheme::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let config: BloomConfig =
            serde_json::from_str(json).map_err(|e| FilterError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes and rates that make the sizing formulas degenerate
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.filter_size == 0 {
            return Err(FilterError::InvalidConfiguration(
                "filter_size must be at least 1".to_string(),
            ));
        }

        // Also rejects NaN
        if !(self.fp_rate > 0.0 && self.fp_rate < 1.0) {
            return Err(FilterError::InvalidConfiguration(format!(
                "fp_rate must be in (0, 1), got {}",
                self.fp_rate
            )));
        }

        Ok(())
    }

    /// Builder-style method to set the hash scheme
    pub fn with_hash_scheme(mut self, scheme: HashScheme) -> Self {
        self.hash_scheme = scheme;
        self
    }
}

/// Builder for BloomConfig with validation
#[derive(Default)]
pub struct BloomConfigBuilder {
    filter_size: Option<usize>,
    fp_rate: Option<f64>,
    hash_scheme: Option<HashScheme>,
}

impl BloomConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expected number of elements
    pub fn filter_size(mut self, size: usize) -> Self {
        self.filter_size = Some(size);
        self
    }

    /// Set the target false positive rate
    pub fn fp_rate(mut self, rate: f64) -> Self {
        self.fp_rate = Some(rate);
        self
    }

    /// Set the hash scheme
    pub fn hash_scheme(mut self, scheme: HashScheme) -> Self {
        self.hash_scheme = Some(scheme);
        self
    }

    /// Build the BloomConfig, validating all parameters
    pub fn build(self) -> Result<BloomConfig, FilterError> {
        let defaults = BloomConfig::default();

        let config = BloomConfig {
            filter_size: self.filter_size.unwrap_or(defaults.filter_size),
            fp_rate: self.fp_rate.unwrap_or(defaults.fp_rate),
            hash_scheme: self.hash_scheme.unwrap_or(defaults.hash_scheme),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BloomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hash_scheme, HashScheme::Murmur3);
    }

    #[test]
    fn test_config_validation_rejects_zero_size() {
        let result = BloomConfig::new(0, 0.01);
        assert!(matches!(result, Err(FilterError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_config_validation_rejects_fp_rate_out_of_range() {
        for fp_rate in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let result = BloomConfig::new(100, fp_rate);
            assert!(
                matches!(result, Err(FilterError::InvalidConfiguration(_))),
                "fp_rate {} should be rejected",
                fp_rate
            );
        }
    }

    #[test]
    fn test_config_validation_accepts_valid_values() {
        assert!(BloomConfig::new(1, 0.5).is_ok());
        assert!(BloomConfig::new(100, 0.001).is_ok());
        assert!(BloomConfig::new(1_000_000, 1e-9).is_ok());
    }

    #[test]
    fn test_builder_creates_valid_config() {
        let config = BloomConfigBuilder::new()
            .filter_size(500)
            .fp_rate(0.05)
            .hash_scheme(HashScheme::Sha2)
            .build()
            .unwrap();

        assert_eq!(config.filter_size, 500);
        assert_eq!(config.fp_rate, 0.05);
        assert_eq!(config.hash_scheme, HashScheme::Sha2);
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = BloomConfigBuilder::new().build().unwrap();
        assert_eq!(config, BloomConfig::default());
    }

    #[test]
    fn test_builder_rejects_invalid() {
        let result = BloomConfigBuilder::new().fp_rate(1.0).build();
        assert!(matches!(result, Err(FilterError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_from_json() {
        let config =
            BloomConfig::from_json(r#"{"filter_size": 100, "fp_rate": 0.001, "hash_scheme": "sha2"}"#)
                .unwrap();
        assert_eq!(config.filter_size, 100);
        assert_eq!(config.hash_scheme, HashScheme::Sha2);

        let config = BloomConfig::from_json(r#"{"filter_size": 100, "fp_rate": 0.001}"#).unwrap();
        assert_eq!(config.hash_scheme, HashScheme::Murmur3, "Scheme defaults when omitted");
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            BloomConfig::from_json("not json"),
            Err(FilterError::ConfigParse(_))
        ));
        assert!(matches!(
            BloomConfig::from_json(r#"{"filter_size": 0, "fp_rate": 0.1}"#),
            Err(FilterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = BloomConfig::default().with_hash_scheme(HashScheme::Sha2);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"sha2\""));
        assert_eq!(BloomConfig::from_json(&json).unwrap(), config);
    }
}
