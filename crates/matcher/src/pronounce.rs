//! Pronunciation seam.
//!
//! The crate does not ship a grapheme-to-phoneme model or a phonetic
//! distance. Callers inject both through [`PhoneticBackend`].

use std::fmt;
use std::sync::Arc;

use index::{DistanceMetric, MetricError};
use serde::{Deserialize, Serialize};

/// Phonetic transcription of a phrase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Pronunciation {
    /// Phone symbols in spoken order.
    pub phones: Vec<String>,
    /// IPA rendering of the whole phrase.
    pub ipa: String,
}

impl Pronunciation {
    /// Builds a pronunciation whose IPA string is the concatenated phones.
    pub fn from_phones<S: Into<String>>(phones: impl IntoIterator<Item = S>) -> Self {
        let phones: Vec<String> = phones.into_iter().map(Into::into).collect();
        let ipa = phones.concat();
        Self { phones, ipa }
    }

    pub fn phone_count(&self) -> usize {
        self.phones.len()
    }

    /// Length of the IPA rendering in characters.
    pub fn ipa_len(&self) -> usize {
        self.ipa.chars().count()
    }
}

/// Maps text to a [`Pronunciation`].
pub trait Pronouncer: Send + Sync {
    fn pronounce(&self, text: &str) -> Result<Pronunciation, MetricError>;
}

impl<F> Pronouncer for F
where
    F: Fn(&str) -> Result<Pronunciation, MetricError> + Send + Sync,
{
    fn pronounce(&self, text: &str) -> Result<Pronunciation, MetricError> {
        self(text)
    }
}

/// A pronouncer paired with the distance used to compare its output.
#[derive(Clone)]
pub struct PhoneticBackend {
    pub pronouncer: Arc<dyn Pronouncer>,
    pub distance: Arc<dyn DistanceMetric<Pronunciation>>,
}

impl PhoneticBackend {
    pub fn new(
        pronouncer: Arc<dyn Pronouncer>,
        distance: Arc<dyn DistanceMetric<Pronunciation>>,
    ) -> Self {
        Self {
            pronouncer,
            distance,
        }
    }
}

impl fmt::Debug for PhoneticBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhoneticBackend").finish_non_exhaustive()
    }
}
