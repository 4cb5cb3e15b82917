//! Configuration for the Binary Value object

use serde::{Deserialize, Serialize};
use shared_types::BACNET_MAX_INSTANCE;
use std::env;

use crate::domain::{ConfigError, DEFAULT_ACTIVE_TEXT, DEFAULT_INACTIVE_TEXT};

/// Binary Value configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryValueConfig {
    /// Maximum number of objects the store will hold
    pub max_objects: usize,
    /// Prefix of the Object_Name reported for unnamed objects
    pub name_prefix: String,
    /// Active_Text given to newly created objects
    pub default_active_text: String,
    /// Inactive_Text given to newly created objects
    pub default_inactive_text: String,
}

impl Default for BinaryValueConfig {
    fn default() -> Self {
        Self {
            max_objects: 1024,
            name_prefix: "BINARY VALUE".to_string(),
            default_active_text: DEFAULT_ACTIVE_TEXT.to_string(),
            default_inactive_text: DEFAULT_INACTIVE_TEXT.to_string(),
        }
    }
}

impl BinaryValueConfig {
    /// Create config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_objects: 8,
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BO_MAX_OBJECTS`: Store capacity (default: 1024)
    /// - `BO_NAME_PREFIX`: Default Object_Name prefix (default: BINARY VALUE)
    /// - `BO_ACTIVE_TEXT`: Default Active_Text (default: Active)
    /// - `BO_INACTIVE_TEXT`: Default Inactive_Text (default: Inactive)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_objects: env::var("BO_MAX_OBJECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_objects),
            name_prefix: env::var("BO_NAME_PREFIX").unwrap_or(defaults.name_prefix),
            default_active_text: env::var("BO_ACTIVE_TEXT")
                .unwrap_or(defaults.default_active_text),
            default_inactive_text: env::var("BO_INACTIVE_TEXT")
                .unwrap_or(defaults.default_inactive_text),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_objects == 0 {
            return Err(ConfigError::Invalid(
                "max_objects cannot be 0".to_string(),
            ));
        }

        // Instances 1..BACNET_MAX_INSTANCE are the only ones a wildcard can hand out.
        if self.max_objects >= BACNET_MAX_INSTANCE as usize {
            return Err(ConfigError::Invalid(format!(
                "max_objects must be below {}",
                BACNET_MAX_INSTANCE
            )));
        }

        if self.default_active_text.is_empty() || self.default_inactive_text.is_empty() {
            return Err(ConfigError::Invalid(
                "state texts cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the store capacity
    pub fn with_max_objects(mut self, max: usize) -> Self {
        self.max_objects = max;
        self
    }

    /// Builder-style method to set the default name prefix
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }
}
