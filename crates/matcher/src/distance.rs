use std::fmt;
use std::sync::Arc;

use index::{DistanceMetric, MetricError};

use crate::pronounce::{PhoneticBackend, Pronunciation};
use crate::types::MatchError;

/// Character-level Levenshtein distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevenshteinDistance;

impl DistanceMetric<str> for LevenshteinDistance {
    fn distance(&self, a: &str, b: &str) -> Result<f64, MetricError> {
        Ok(strsim::levenshtein(a, b) as f64)
    }
}

impl DistanceMetric<String> for LevenshteinDistance {
    fn distance(&self, a: &String, b: &String) -> Result<f64, MetricError> {
        Ok(strsim::levenshtein(a, b) as f64)
    }
}

/// Feature compared by [`HybridDistance`]: a phrase and, when the phonetic
/// weight is non-zero, its pronunciation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridInput {
    pub phrase: String,
    pub pronunciation: Option<Pronunciation>,
}

/// Weighted sum of a phonetic and a lexical distance:
/// `w * phonetic(a, b) + (1 - w) * lexical(a, b)`.
///
/// A component with zero weight is never evaluated, and phrases are only
/// pronounced when `w > 0`.
pub struct HybridDistance {
    phonetic_weight: f64,
    lexical: Arc<dyn DistanceMetric<str>>,
    phonetics: Option<PhoneticBackend>,
}

impl HybridDistance {
    /// Fails when `phonetic_weight` is outside `[0, 1]`, or when it is
    /// positive and no phonetic backend is supplied.
    pub fn new(
        phonetic_weight: f64,
        lexical: Arc<dyn DistanceMetric<str>>,
        phonetics: Option<PhoneticBackend>,
    ) -> Result<Self, MatchError> {
        if !(0.0..=1.0).contains(&phonetic_weight) {
            return Err(MatchError::InvalidArgument(format!(
                "phonetic weight must be between 0.0 and 1.0, got {phonetic_weight}"
            )));
        }
        if phonetic_weight > 0.0 && phonetics.is_none() {
            return Err(MatchError::InvalidArgument(
                "a phonetic backend is required when the phonetic weight is positive".into(),
            ));
        }
        Ok(Self {
            phonetic_weight,
            lexical,
            phonetics,
        })
    }

    /// Pure lexical distance (`w = 0`) over Levenshtein.
    pub fn lexical_only() -> Self {
        Self {
            phonetic_weight: 0.0,
            lexical: Arc::new(LevenshteinDistance),
            phonetics: None,
        }
    }

    pub fn phonetic_weight(&self) -> f64 {
        self.phonetic_weight
    }

    /// Builds the feature for `phrase`, pronouncing it only when needed.
    pub fn prepare(&self, phrase: &str) -> Result<HybridInput, MetricError> {
        let pronunciation = match &self.phonetics {
            Some(backend) if self.phonetic_weight > 0.0 => {
                Some(backend.pronouncer.pronounce(phrase)?)
            }
            _ => None,
        };
        Ok(HybridInput {
            phrase: phrase.to_string(),
            pronunciation,
        })
    }

    /// `w * phone_count + (1 - w) * character_count`.
    pub fn threshold_scale(&self, input: &HybridInput) -> f64 {
        let w = self.phonetic_weight;
        let phones = input
            .pronunciation
            .as_ref()
            .map_or(0, Pronunciation::phone_count) as f64;
        let chars = input.phrase.chars().count() as f64;
        w * phones + (1.0 - w) * chars
    }
}

impl DistanceMetric<HybridInput> for HybridDistance {
    fn distance(&self, a: &HybridInput, b: &HybridInput) -> Result<f64, MetricError> {
        let w = self.phonetic_weight;
        let mut total = 0.0;
        if w > 0.0 {
            let backend = self
                .phonetics
                .as_ref()
                .ok_or_else(|| MetricError::new("no phonetic backend configured"))?;
            let (pa, pb) = match (&a.pronunciation, &b.pronunciation) {
                (Some(pa), Some(pb)) => (pa, pb),
                _ => return Err(MetricError::new("hybrid input has no pronunciation")),
            };
            total += w * backend.distance.distance(pa, pb)?;
        }
        if w < 1.0 {
            total += (1.0 - w) * self.lexical.distance(&a.phrase, &b.phrase)?;
        }
        Ok(total)
    }
}

impl fmt::Debug for HybridDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridDistance")
            .field("phonetic_weight", &self.phonetic_weight)
            .field("phonetic", &self.phonetics.is_some())
            .finish()
    }
}
