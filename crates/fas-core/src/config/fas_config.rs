//! Top-level search configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{defaults, KnowledgeConfig, ObservabilityConfig, SearchConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`FAS_*`)
/// 2. Config file passed to [`FasConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FasConfig {
    pub search: SearchConfig,
    pub knowledge: KnowledgeConfig,
    pub observability: ObservabilityConfig,
}

impl FasConfig {
    /// Load a config file, apply `FAS_*` environment overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_overrides(path, |key| std::env::var(key).ok())
    }

    /// Like [`FasConfig::load`], with overrides taken from `lookup`
    /// instead of the process environment.
    pub fn load_with_overrides<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: FasConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.apply_overrides(lookup);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string. No environment overrides.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: FasConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Apply overrides from an arbitrary key lookup.
    /// Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(defaults::ENV_DEPTH).and_then(|v| v.trim().parse::<i64>().ok()) {
            self.search.depth = v;
        }
        if let Some(v) = lookup(defaults::ENV_VERBOSE).and_then(|v| v.trim().parse::<bool>().ok())
        {
            self.search.verbose = v;
        }
        if let Some(v) = lookup(defaults::ENV_PARALLEL).and_then(|v| v.trim().parse::<bool>().ok())
        {
            self.search.parallel = v;
        }
        if let Some(v) = lookup(defaults::ENV_LOG_LEVEL) {
            if !v.trim().is_empty() {
                self.observability.log_level = v.trim().to_string();
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(config: &FasConfig) -> Result<(), ConfigError> {
        if config.search.depth < defaults::UNBOUNDED_DEPTH {
            return Err(ConfigError::ValidationFailed {
                field: "search.depth".to_string(),
                message: format!("must be -1 or >= 0, got {}", config.search.depth),
            });
        }
        if config.observability.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        for &tier in &config.knowledge.forbidden_within_tiers {
            if tier >= config.knowledge.tiers.len() {
                return Err(ConfigError::ValidationFailed {
                    field: "knowledge.forbidden_within_tiers".to_string(),
                    message: format!(
                        "tier {tier} out of range ({} tiers)",
                        config.knowledge.tiers.len()
                    ),
                });
            }
        }
        Ok(())
    }
}
