use crate::di::Lifetime;
use crate::error::{DispatchError, Result};
use crate::routing::AREA_TOKEN;
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

pub const AREA_TOKEN_KEY: &str = "DISPATCH_AREA_TOKEN";
pub const CONTROLLER_VALUE_KEY: &str = "DISPATCH_CONTROLLER_VALUE";
pub const DEFAULT_LIFETIME_KEY: &str = "DISPATCH_DEFAULT_LIFETIME";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Snapshot of the process environment
    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Settings that shape dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Data token holding the area name
    pub area_token: String,
    /// Route value holding the controller name
    pub controller_value: String,
    /// Lifetime for controllers registered without an explicit one
    pub default_lifetime: Lifetime,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            area_token: AREA_TOKEN.to_string(),
            controller_value: "controller".to_string(),
            default_lifetime: Lifetime::default(),
        }
    }
}

impl DispatchConfig {
    /// Read `DISPATCH_*` settings, keeping defaults for anything unset.
    ///
    /// # Errors
    /// Returns [`DispatchError::InvalidConfig`] for an unknown lifetime or an empty
    /// token name.
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(token) = config.get(AREA_TOKEN_KEY) {
            settings.area_token = non_empty(AREA_TOKEN_KEY, token)?;
        }
        if let Some(value) = config.get(CONTROLLER_VALUE_KEY) {
            settings.controller_value = non_empty(CONTROLLER_VALUE_KEY, value)?;
        }
        if let Some(lifetime) = config.get(DEFAULT_LIFETIME_KEY) {
            settings.default_lifetime = Lifetime::from_str(lifetime.trim())
                .map_err(|_| DispatchError::invalid_config(DEFAULT_LIFETIME_KEY, lifetime))?;
        }

        tracing::debug!(?settings, "Dispatch configuration loaded");
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(&ConfigService::from_env())
    }
}

fn non_empty(key: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DispatchError::invalid_config(key, value));
    }
    Ok(trimmed.to_string())
}
