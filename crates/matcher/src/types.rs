use index::{IndexError, MetricError, SearchConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning knobs shared by the contact and place matchers.
///
/// `MatcherConfig` is cheap to clone and serde-friendly so it can be embedded
/// in higher-level configs. Only `phonetic_weight_percentage` is range
/// checked; the other values are used as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherConfig {
    /// Share of the phonetic distance in the hybrid distance, in `[0, 1]`.
    /// `0.0` disables pronunciation entirely.
    pub phonetic_weight_percentage: f64,
    /// Maximum number of distinct entities returned by a find.
    pub max_returns: usize,
    /// Normalized distance a window must stay below to be a candidate.
    pub find_threshold: f64,
    /// Floor of the selection cutoff, so a perfect best match still lets
    /// near-perfect siblings through.
    pub max_distance_margin_returns: f64,
    /// Candidates within `best * best_distance_multiplier` of the best
    /// distance are returned alongside it.
    pub best_distance_multiplier: f64,
    /// Scan strategy for the underlying indices.
    #[serde(default)]
    pub search: SearchConfig,
}

impl MatcherConfig {
    /// Validated constructor.
    pub fn new(
        phonetic_weight_percentage: f64,
        max_returns: usize,
        find_threshold: f64,
        max_distance_margin_returns: f64,
        best_distance_multiplier: f64,
    ) -> Result<Self, MatchError> {
        let cfg = Self {
            phonetic_weight_percentage,
            max_returns,
            find_threshold,
            max_distance_margin_returns,
            best_distance_multiplier,
            search: SearchConfig::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults tuned for person names.
    pub fn contact_defaults() -> Self {
        Self {
            phonetic_weight_percentage: 0.7,
            max_returns: 4,
            find_threshold: 0.35,
            max_distance_margin_returns: 0.02,
            best_distance_multiplier: 1.1,
            search: SearchConfig::default(),
        }
    }

    /// Defaults tuned for place names and addresses.
    pub fn place_defaults() -> Self {
        Self {
            max_returns: 8,
            ..Self::contact_defaults()
        }
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.phonetic_weight_percentage) {
            return Err(MatchError::InvalidArgument(format!(
                "phonetic_weight_percentage must be between 0.0 and 1.0, got {}",
                self.phonetic_weight_percentage
            )));
        }
        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::contact_defaults()
    }
}

/// Which index a [`FindRequest`] searches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Every index of the matcher, merged.
    #[default]
    All,
    /// Contact names only.
    Name,
    /// Contact aliases only.
    Alias,
}

impl SearchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchScope::All => "all",
            SearchScope::Name => "name",
            SearchScope::Alias => "alias",
        }
    }
}

/// A find call as it arrives over a process boundary.
///
/// ```json
/// { "query": "jon", "scope": "name" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FindRequest {
    /// Free-text query. Required; `""` is valid and finds nothing.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub scope: SearchScope,
}

impl FindRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            scope: SearchScope::All,
        }
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub(crate) fn query(&self) -> Result<&str, MatchError> {
        self.query
            .as_deref()
            .ok_or_else(|| MatchError::InvalidArgument("query must be present".into()))
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// Missing query or out-of-range configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A required mapping between target, extraction and feature types was
    /// not supplied.
    #[error("type mismatch: no mapping supplied from `{from}` to `{to}`")]
    TypeMismatch {
        from: &'static str,
        to: &'static str,
    },
    /// A distance metric or pronouncer failed.
    #[error("metric failure: {0}")]
    Metric(#[from] MetricError),
}

impl From<IndexError> for MatchError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::InvalidArgument(msg) => MatchError::InvalidArgument(msg),
            IndexError::TypeMismatch { from, to } => MatchError::TypeMismatch { from, to },
            IndexError::Metric(err) => MatchError::Metric(err),
        }
    }
}
