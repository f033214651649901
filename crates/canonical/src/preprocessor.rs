use crate::config::PreprocessConfig;
use crate::error::CanonicalError;
use crate::pipeline::normalize_phrase;

/// Maps raw entity fields and queries into comparable phrases.
///
/// Implementations must be deterministic: the matcher applies the same
/// preprocessor at index time and at query time.
pub trait Preprocessor: Send + Sync {
    fn preprocess(&self, text: &str) -> String;
}

impl<F> Preprocessor for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn preprocess(&self, text: &str) -> String {
        self(text)
    }
}

/// English phrase preprocessor driven by a [`PreprocessConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnPreprocessor {
    config: PreprocessConfig,
}

impl EnPreprocessor {
    /// Preprocessor for person names and general labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preprocessor for place names and street addresses.
    pub fn places() -> Self {
        Self {
            config: PreprocessConfig::places(),
        }
    }

    pub fn with_config(config: PreprocessConfig) -> Result<Self, CanonicalError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }
}

impl Preprocessor for EnPreprocessor {
    fn preprocess(&self, text: &str) -> String {
        normalize_phrase(text, &self.config)
    }
}
