//! Configuration types for phrase preprocessing.
//!
//! [`PreprocessConfig`] selects which normalization steps run before a phrase
//! is tokenized and windowed. The same config must be used for indexed
//! entities and for queries, otherwise their phrases are not comparable.
//!
//! # Examples
//!
//! ```rust
//! use canonical::PreprocessConfig;
//!
//! let config = PreprocessConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.remove_stop_words);
//! assert!(!config.expand_place_abbreviations);
//!
//! let places = PreprocessConfig::places();
//! assert!(places.expand_place_abbreviations);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the English phrase preprocessor.
///
/// Steps run in a fixed order: NFKC, lowercasing, punctuation and symbol
/// clearing, stop-word removal, place rewrites, whitespace collapse.
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": true,
///   "lowercase": true,
///   "strip_punctuation": true,
///   "remove_stop_words": true,
///   "expand_place_abbreviations": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Version of the preprocessing rules. Must be >= 1.
    pub version: u32,

    /// Apply Unicode NFKC normalization before other transforms.
    #[serde(default = "default_true")]
    pub normalize_unicode: bool,

    /// Apply locale-free Unicode lowercasing.
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Treat Unicode punctuation and symbol characters as word delimiters.
    ///
    /// ```text
    /// "Nick and Nat's" → "nick and nat s"
    /// "7 Fake Cres."   → "7 fake cres"
    /// ```
    #[serde(default = "default_true")]
    pub strip_punctuation: bool,

    /// Drop English filler words (`the`, `of`, `my`, ...) and the Spanish
    /// articles that commonly prefix place names (`el`, `la`, `san`, ...).
    #[serde(default = "default_true")]
    pub remove_stop_words: bool,

    /// Rewrite cardinal directions and street abbreviations into their long
    /// form (`n` → `north`, `blvd` → `boulevard`, `st` → `street`).
    #[serde(default)]
    pub expand_place_abbreviations: bool,
}

impl PreprocessConfig {
    /// Defaults plus place-specific rewrites.
    pub fn places() -> Self {
        Self {
            expand_place_abbreviations: true,
            ..Self::default()
        }
    }

    /// Version 0 is reserved.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
            strip_punctuation: true,
            remove_stop_words: true,
            expand_place_abbreviations: false,
        }
    }
}

fn default_true() -> bool {
    true
}
