//! Configuration types for the tracking system
//!
//! This module defines all configuration structures used throughout the
//! crate. The core itself reads no files and no environment variables; these
//! types exist so integration layers can assemble a registry and engine from
//! declarative data.

use serde::{Deserialize, Serialize};

/// Main tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Couriers to instantiate, in detection order (first match wins)
    pub couriers: Vec<CourierConfig>,

    /// Optional engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl TrackerConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            couriers: Vec::new(),
            engine: EngineConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        for courier in &self.couriers {
            courier.validate()?;
        }
        self.engine.validate()?;
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Courier adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CourierConfig {
    /// ELTA Courier (Greek national postal courier)
    Elta {
        /// Override the tracking endpoint (testing or proxy setups)
        #[serde(default)]
        endpoint: Option<String>,
    },

    /// Box Now (locker-network courier)
    BoxNow {
        /// Override the tracking endpoint (testing or proxy setups)
        #[serde(default)]
        endpoint: Option<String>,
    },

    /// Custom courier
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl CourierConfig {
    /// Validate the courier configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            CourierConfig::Elta { endpoint } | CourierConfig::BoxNow { endpoint } => {
                if let Some(url) = endpoint
                    && !(url.starts_with("http://") || url.starts_with("https://"))
                {
                    return Err(crate::Error::config(format!(
                        "courier endpoint must be an HTTP(S) URL, got: {}",
                        url
                    )));
                }
                Ok(())
            }
            CourierConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config("custom courier factory cannot be empty"));
                }
                if config.is_null() {
                    return Err(crate::Error::config("custom courier config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Get the courier type name, used as the factory lookup key
    pub fn type_name(&self) -> &str {
        match self {
            CourierConfig::Elta { .. } => "elta",
            CourierConfig::BoxNow { .. } => "box_now",
            CourierConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Overall bound on one tracking call, in seconds, measured from request
    /// dispatch. A call exceeding the bound yields the standard error result.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EngineConfig {
    /// Validate the engine configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("engine timeout must be > 0 seconds"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = EngineConfig { timeout_secs: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_courier_config_type_names() {
        assert_eq!(CourierConfig::Elta { endpoint: None }.type_name(), "elta");
        assert_eq!(CourierConfig::BoxNow { endpoint: None }.type_name(), "box_now");
    }

    #[test]
    fn test_endpoint_override_must_be_http() {
        let config = CourierConfig::Elta {
            endpoint: Some("ftp://example.invalid".into()),
        };
        assert!(config.validate().is_err());

        let config = CourierConfig::Elta {
            endpoint: Some("http://127.0.0.1:9999/track.php".into()),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = TrackerConfig {
            couriers: vec![
                CourierConfig::BoxNow { endpoint: None },
                CourierConfig::Elta { endpoint: None },
            ],
            engine: EngineConfig { timeout_secs: 10 },
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TrackerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.couriers.len(), 2);
        assert_eq!(parsed.engine.timeout_secs, 10);
    }
}
