// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Smoothing group configuration

use crate::mesh::DEFAULT_CROSSTALK_THRESHOLD;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`SmoothingConfig::load`]
pub const CONFIG_FILE: &str = "smoothing.toml";

/// Smoothing group configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Hard/boundary edges a vertex may have before crosstalk correction kicks in
    pub crosstalk_threshold: usize,
    /// Whether to add hard edges between faces that only share a vertex
    pub crosstalk_correction: bool,
    /// Whether a still-valid previous encoding is returned as is
    pub reuse_previous_encoding: bool,
    /// Whether meshes with uniform edge smoothness skip colouring
    pub constant_shortcut: bool,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            crosstalk_threshold: DEFAULT_CROSSTALK_THRESHOLD,
            crosstalk_correction: true,
            reuse_previous_encoding: true,
            constant_shortcut: true,
        }
    }
}

impl SmoothingConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: SmoothingConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `SMOOTHING_*` environment variables on top of this configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(threshold) = std::env::var("SMOOTHING_CROSSTALK_THRESHOLD") {
            if let Ok(threshold) = threshold.parse() {
                self.crosstalk_threshold = threshold;
            }
        }

        if let Ok(correction) = std::env::var("SMOOTHING_CROSSTALK_CORRECTION") {
            self.crosstalk_correction = correction.parse().unwrap_or(self.crosstalk_correction);
        }

        if let Ok(reuse) = std::env::var("SMOOTHING_REUSE_ENCODING") {
            self.reuse_previous_encoding = reuse.parse().unwrap_or(self.reuse_previous_encoding);
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Configuration that always recomputes and never corrects crosstalk
    pub fn raw() -> Self {
        Self {
            crosstalk_correction: false,
            reuse_previous_encoding: false,
            constant_shortcut: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SmoothingConfig::default();
        assert_eq!(config.crosstalk_threshold, 3);
        assert!(config.crosstalk_correction);
        assert!(config.reuse_previous_encoding);
        assert!(config.constant_shortcut);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SmoothingConfig = toml::from_str("crosstalk_threshold = 5").unwrap();
        assert_eq!(config.crosstalk_threshold, 5);
        assert!(config.crosstalk_correction);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SmoothingConfig::raw();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SmoothingConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    // Only test touching SMOOTHING_* variables
    #[test]
    fn test_env_overrides() {
        std::env::set_var("SMOOTHING_CROSSTALK_THRESHOLD", "7");
        std::env::set_var("SMOOTHING_CROSSTALK_CORRECTION", "false");
        let mut config = SmoothingConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.crosstalk_threshold, 7);
        assert!(!config.crosstalk_correction);
        assert!(config.reuse_previous_encoding);

        // No smoothing.toml in the crate root, so load starts from the defaults
        let loaded = SmoothingConfig::load().unwrap();
        assert_eq!(loaded.crosstalk_threshold, 7);

        // Unparsable values leave the setting alone
        std::env::set_var("SMOOTHING_CROSSTALK_THRESHOLD", "not-a-number");
        std::env::set_var("SMOOTHING_CROSSTALK_CORRECTION", "maybe");
        let mut config = SmoothingConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.crosstalk_threshold, 3);
        assert!(config.crosstalk_correction);

        std::env::remove_var("SMOOTHING_CROSSTALK_THRESHOLD");
        std::env::remove_var("SMOOTHING_CROSSTALK_CORRECTION");
    }
}
