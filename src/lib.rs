//! Workspace umbrella crate for phonematch.
//!
//! Re-exports the preprocessing (`canonical`), search (`index`) and domain
//! matching (`matcher`) crates, and wires a [`PhonematchConfig`] file into
//! the matcher builders so callers can configure everything in one place.
//!
//! ```
//! use phonematch::{ContactFields, ContactMatcher, PhonematchConfig, configure_contacts};
//!
//! let config = PhonematchConfig::from_yaml(
//!     "version: \"1.0\"\ncontact:\n  phonetic_weight_percentage: 0.0\n",
//! )
//! .unwrap();
//!
//! let builder = ContactMatcher::builder(vec![ContactFields::named("John B")]);
//! let matcher = configure_contacts(builder, &config).unwrap().build().unwrap();
//! assert_eq!(matcher.find("john").unwrap().len(), 1);
//! ```

pub mod config;

pub use canonical::{
    CanonicalError, EnPreprocessor, PreprocessConfig, Preprocessor, STOP_WORDS, Token, Tokenizer,
    WhitespaceTokenizer, normalize_phrase, tokenize,
};
pub use config::{ConfigLoadError, MatcherYamlConfig, PhonematchConfig, PreprocessYamlConfig};
pub use index::{
    DistanceMetric, FuzzyMatcher, FuzzyMatcherBuilder, IndexError, Match, MetricError,
    SearchConfig, SearchStrategy,
};
pub use matcher::{
    ContactFields, ContactMatcher, ContactMatcherBuilder, FindMetrics, FindRequest,
    HybridDistance, HybridInput, LevenshteinDistance, MatchError, MatcherConfig, MatcherKind,
    NormalizedMatcher, PhoneticBackend, PlaceFields, PlaceMatcher, PlaceMatcherBuilder,
    Pronouncer, Pronunciation, SearchScope, SelectionPolicy, Target, WindowGenerator,
    merge_ascending, set_find_metrics,
};

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

/// Errors that can occur while wiring a configuration into a matcher.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Canonical(CanonicalError),
    Match(MatchError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Canonical(err) => write!(f, "preprocessing failure: {err}"),
            PipelineError::Match(err) => write!(f, "matcher failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Canonical(err) => Some(err),
            PipelineError::Match(err) => Some(err),
        }
    }
}

impl From<CanonicalError> for PipelineError {
    fn from(value: CanonicalError) -> Self {
        PipelineError::Canonical(value)
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

/// Applies the file's contact settings and preprocessing to `builder`.
pub fn configure_contacts<C>(
    builder: ContactMatcherBuilder<C>,
    config: &PhonematchConfig,
) -> Result<ContactMatcherBuilder<C>, PipelineError>
where
    C: Send + Sync + 'static,
{
    let preprocessor = EnPreprocessor::with_config(config.contact_preprocess())?;
    let matcher_config = config.contact_config();
    matcher_config.validate()?;
    debug!(
        phonetic_weight = matcher_config.phonetic_weight_percentage,
        max_returns = matcher_config.max_returns,
        "configure_contacts"
    );
    Ok(builder
        .config(matcher_config)
        .preprocessor(Arc::new(preprocessor)))
}

/// Applies the file's place settings and preprocessing to `builder`.
pub fn configure_places<P>(
    builder: PlaceMatcherBuilder<P>,
    config: &PhonematchConfig,
) -> Result<PlaceMatcherBuilder<P>, PipelineError>
where
    P: Send + Sync + 'static,
{
    let preprocessor = EnPreprocessor::with_config(config.place_preprocess())?;
    let matcher_config = config.place_config();
    matcher_config.validate()?;
    debug!(
        phonetic_weight = matcher_config.phonetic_weight_percentage,
        max_returns = matcher_config.max_returns,
        "configure_places"
    );
    Ok(builder
        .config(matcher_config)
        .preprocessor(Arc::new(preprocessor)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_preprocess_config_is_reported() {
        let config = PhonematchConfig {
            preprocess: PreprocessYamlConfig {
                version: 0,
                ..PreprocessYamlConfig::default()
            },
            ..PhonematchConfig::default()
        };
        let err = configure_places(PlaceMatcher::builder(vec![PlaceFields::named("x")]), &config)
            .err()
            .expect("version 0 is rejected");
        assert!(matches!(err, PipelineError::Canonical(_)));
    }

    #[test]
    fn invalid_matcher_config_is_reported() {
        let config = PhonematchConfig {
            contact: MatcherYamlConfig {
                phonetic_weight_percentage: Some(-0.5),
                ..MatcherYamlConfig::default()
            },
            ..PhonematchConfig::default()
        };
        let err = configure_contacts(ContactMatcher::builder(Vec::<ContactFields>::new()), &config)
            .err()
            .expect("negative weight is rejected");
        assert!(matches!(err, PipelineError::Match(MatchError::InvalidArgument(_))));
    }

    #[test]
    fn place_preprocessing_expands_streets() {
        let mut config = PhonematchConfig::default();
        config.place.phonetic_weight_percentage = Some(0.0);
        let builder = PlaceMatcher::builder(vec![PlaceFields::named("Corner").with_address("1 Main St")]);
        let matcher = configure_places(builder, &config).unwrap().build().unwrap();
        assert_eq!(matcher.find("main street").unwrap().len(), 1);
    }
}
