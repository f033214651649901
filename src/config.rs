//! YAML configuration file support.
//!
//! One file configures preprocessing and both domain matchers. Every section
//! and every field is optional; omitted values fall back to the matcher's
//! own defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "assistant"
//!
//! preprocess:
//!   version: 1
//!   normalize_unicode: true
//!   lowercase: true
//!   strip_punctuation: true
//!   remove_stop_words: true
//!
//! contact:
//!   phonetic_weight_percentage: 0.7
//!   max_returns: 4
//!   find_threshold: 0.35
//!
//! place:
//!   max_returns: 8
//!   best_distance_multiplier: 1.1
//!
//! search:
//!   strategy: "accelerated"
//!   min_targets_for_acceleration: 2048
//! ```

use std::fs;
use std::path::Path;

use canonical::PreprocessConfig;
use index::SearchConfig;
use matcher::MatcherConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PhonematchConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Text preprocessing shared by both matchers
    #[serde(default)]
    pub preprocess: PreprocessYamlConfig,

    /// Contact matcher overrides
    #[serde(default)]
    pub contact: MatcherYamlConfig,

    /// Place matcher overrides
    #[serde(default)]
    pub place: MatcherYamlConfig,

    /// Scan strategy for every index
    #[serde(default)]
    pub search: SearchConfig,
}

impl PhonematchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PhonematchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.preprocess.validate()?;
        self.contact.validate("contact", MatcherConfig::contact_defaults())?;
        self.place.validate("place", MatcherConfig::place_defaults())?;
        Ok(())
    }

    /// Contact defaults with this file's overrides applied.
    pub fn contact_config(&self) -> MatcherConfig {
        self.contact
            .apply(MatcherConfig::contact_defaults())
            .with_search(self.search)
    }

    /// Place defaults with this file's overrides applied.
    pub fn place_config(&self) -> MatcherConfig {
        self.place
            .apply(MatcherConfig::place_defaults())
            .with_search(self.search)
    }

    pub fn contact_preprocess(&self) -> PreprocessConfig {
        self.preprocess.to_preprocess_config(false)
    }

    /// Same as [`contact_preprocess`](Self::contact_preprocess) plus
    /// street and direction expansion.
    pub fn place_preprocess(&self) -> PreprocessConfig {
        self.preprocess.to_preprocess_config(true)
    }
}

impl Default for PhonematchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            preprocess: PreprocessYamlConfig::default(),
            contact: MatcherYamlConfig::default(),
            place: MatcherYamlConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// Preprocessing YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub normalize_unicode: bool,

    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default = "true_value")]
    pub strip_punctuation: bool,

    #[serde(default = "true_value")]
    pub remove_stop_words: bool,
}

impl PreprocessYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "preprocess.version must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_preprocess_config(&self, expand_place_abbreviations: bool) -> PreprocessConfig {
        PreprocessConfig {
            version: self.version,
            normalize_unicode: self.normalize_unicode,
            lowercase: self.lowercase,
            strip_punctuation: self.strip_punctuation,
            remove_stop_words: self.remove_stop_words,
            expand_place_abbreviations,
        }
    }
}

impl Default for PreprocessYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
            strip_punctuation: true,
            remove_stop_words: true,
        }
    }
}

/// Per-matcher YAML overrides. Unset fields keep the matcher's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatcherYamlConfig {
    #[serde(default)]
    pub phonetic_weight_percentage: Option<f64>,

    #[serde(default)]
    pub max_returns: Option<usize>,

    #[serde(default)]
    pub find_threshold: Option<f64>,

    #[serde(default)]
    pub max_distance_margin_returns: Option<f64>,

    #[serde(default)]
    pub best_distance_multiplier: Option<f64>,
}

impl MatcherYamlConfig {
    fn validate(&self, section: &str, defaults: MatcherConfig) -> Result<(), ConfigLoadError> {
        let resolved = self.apply(defaults);
        resolved
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("{section}: {err}")))?;
        if !resolved.find_threshold.is_finite() || resolved.find_threshold < 0.0 {
            return Err(ConfigLoadError::Validation(format!(
                "{section}.find_threshold must be a non-negative number"
            )));
        }
        Ok(())
    }

    fn apply(&self, defaults: MatcherConfig) -> MatcherConfig {
        MatcherConfig {
            phonetic_weight_percentage: self
                .phonetic_weight_percentage
                .unwrap_or(defaults.phonetic_weight_percentage),
            max_returns: self.max_returns.unwrap_or(defaults.max_returns),
            find_threshold: self.find_threshold.unwrap_or(defaults.find_threshold),
            max_distance_margin_returns: self
                .max_distance_margin_returns
                .unwrap_or(defaults.max_distance_margin_returns),
            best_distance_multiplier: self
                .best_distance_multiplier
                .unwrap_or(defaults.best_distance_multiplier),
            search: defaults.search,
        }
    }
}

// Default value functions for serde
fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
