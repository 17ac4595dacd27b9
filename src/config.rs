// Static configuration: cache timing knobs and the provider directory

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::model::{ProviderCapability, ProviderId, VehicleType};

/// Timing knobs of the aggregation cache.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    // Snapshot is unusable after this long and must be reloaded before serving
    pub expire_after_write_secs: u64,
    // Snapshot is still served after this long, but a background reload is started
    pub refresh_after_write_secs: u64,
    pub reload_on_failure: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expire_after_write_secs: 600,
            refresh_after_write_secs: 60,
            reload_on_failure: true,
        }
    }
}

impl CacheConfig {
    pub fn expire_after_write(&self) -> Duration {
        Duration::from_secs(self.expire_after_write_secs)
    }

    pub fn refresh_after_write(&self) -> Duration {
        Duration::from_secs(self.refresh_after_write_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expire_after_write_secs == 0 {
            return Err(ConfigError::InvalidCache(
                "expire_after_write_secs must be positive".to_string(),
            ));
        }
        if self.refresh_after_write_secs >= self.expire_after_write_secs {
            return Err(ConfigError::InvalidCache(format!(
                "refresh_after_write_secs ({}) must be lower than expire_after_write_secs ({})",
                self.refresh_after_write_secs, self.expire_after_write_secs
            )));
        }
        Ok(())
    }
}

// Wire shape of a provider's API; selects the adapter variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Json,
    Xml,
}

fn default_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderConfig {
    pub id: ProviderId,
    pub kind: ProviderKind,
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    pub city: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub vehicle_types: Vec<VehicleType>,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn capability(&self) -> ProviderCapability {
        ProviderCapability {
            id: self.id.clone(),
            city: self.city.clone(),
            address: self.address.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            vehicle_types: self.vehicle_types.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidProvider {
            provider: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.as_str().trim().is_empty() {
            return Err(invalid("id must not be blank"));
        }
        if self.base_url.trim().is_empty() {
            return Err(invalid("base_url must not be blank"));
        }
        if self.vehicle_types.is_empty() {
            return Err(invalid("at least one vehicle type is required"));
        }
        if self.timeout_ms == 0 {
            return Err(invalid("timeout_ms must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    pub providers: Vec<ProviderConfig>,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: AppConfig =
            serde_json::from_str(json).context("Failed to parse provider configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.validate()?;
        if self.providers.is_empty() {
            return Err(ConfigError::NoProviders);
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            provider.validate()?;
            if !seen.insert(&provider.id) {
                return Err(ConfigError::DuplicateProvider(provider.id.clone()));
            }
        }
        Ok(())
    }
}
