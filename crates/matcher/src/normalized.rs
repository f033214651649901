//! Length-normalized fuzzy matching.
//!
//! Raw distances grow with phrase length, so a fixed threshold is too strict
//! for long queries and too loose for short ones. [`NormalizedMatcher`]
//! derives a scale from the query (its length in characters, IPA symbols or
//! phones), widens the search limit by that scale and divides every returned
//! distance by it. Thresholds passed in and distances handed back are both
//! "per unit of query".

use std::fmt;
use std::sync::Arc;

use index::{DistanceMetric, FuzzyMatcher, Match, SearchConfig};

use crate::distance::{HybridDistance, HybridInput};
use crate::pronounce::{PhoneticBackend, Pronunciation};
use crate::types::MatchError;

type Scale<P> = Arc<dyn Fn(&P) -> f64 + Send + Sync>;

/// A [`FuzzyMatcher`] queried by phrase whose thresholds and distances are
/// relative to the query's size.
pub struct NormalizedMatcher<T, P> {
    inner: FuzzyMatcher<T, String, P>,
    scale: Scale<P>,
}

impl<T, P> NormalizedMatcher<T, P> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn inner(&self) -> &FuzzyMatcher<T, String, P> {
        &self.inner
    }
}

impl<T, P> NormalizedMatcher<T, P>
where
    T: Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
{
    /// Wraps `inner`, scaling by `threshold_scale(query_feature)`.
    pub fn new(
        inner: FuzzyMatcher<T, String, P>,
        threshold_scale: impl Fn(&P) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner,
            scale: Arc::new(threshold_scale),
        }
    }

    pub fn nearest(&self, query: &str) -> Result<Option<Match<&T>>, MatchError> {
        self.nearest_within(query, f64::INFINITY)
    }

    pub fn nearest_within(&self, query: &str, limit: f64) -> Result<Option<Match<&T>>, MatchError> {
        Ok(self.k_nearest_within(query, 1, limit)?.into_iter().next())
    }

    pub fn k_nearest(&self, query: &str, k: usize) -> Result<Vec<Match<&T>>, MatchError> {
        self.k_nearest_within(query, k, f64::INFINITY)
    }

    /// Up to `k` targets whose normalized distance is below `limit`.
    pub fn k_nearest_within(
        &self,
        query: &str,
        k: usize,
        limit: f64,
    ) -> Result<Vec<Match<&T>>, MatchError> {
        let feature = self.inner.query_feature(&query.to_string())?;
        let mut scale = (self.scale)(&feature);
        if scale == 0.0 {
            scale = 1.0;
        }
        let hits = self
            .inner
            .k_nearest_within_feature(&feature, k, limit * scale)?;
        Ok(hits.into_iter().map(|hit| hit.scaled(scale)).collect())
    }
}

impl<T> NormalizedMatcher<T, String>
where
    T: Send + Sync + 'static,
{
    /// Compares spellings; scale is the query length in characters.
    pub fn string(
        targets: Vec<T>,
        to_phrase: impl Fn(&T) -> String + Send + Sync + 'static,
        metric: Arc<dyn DistanceMetric<String>>,
        search: SearchConfig,
    ) -> Result<Self, MatchError> {
        let inner = FuzzyMatcher::<T, String, String>::builder(targets, metric)
            .target_to_extraction(move |target| Ok(to_phrase(target)))
            .search(search)
            .build()?;
        Ok(Self::new(inner, |query: &String| query.chars().count() as f64))
    }
}

impl<T> NormalizedMatcher<T, Pronunciation>
where
    T: Send + Sync + 'static,
{
    /// Compares pronunciations; scale is the query's IPA length.
    pub fn phonetic(
        targets: Vec<T>,
        to_phrase: impl Fn(&T) -> String + Send + Sync + 'static,
        backend: PhoneticBackend,
        search: SearchConfig,
    ) -> Result<Self, MatchError> {
        let pronouncer = Arc::clone(&backend.pronouncer);
        let inner = FuzzyMatcher::<T, String, Pronunciation>::builder(targets, backend.distance)
            .target_to_extraction(move |target| Ok(to_phrase(target)))
            .extraction_to_pronounceable(move |phrase: &String| pronouncer.pronounce(phrase))
            .search(search)
            .build()?;
        Ok(Self::new(inner, |query: &Pronunciation| query.ipa_len() as f64))
    }
}

impl<T> NormalizedMatcher<T, HybridInput>
where
    T: Send + Sync + 'static,
{
    /// Compares phrases with a [`HybridDistance`]; scale is
    /// `w * phone_count + (1 - w) * character_count`.
    pub fn hybrid(
        targets: Vec<T>,
        to_phrase: impl Fn(&T) -> String + Send + Sync + 'static,
        distance: Arc<HybridDistance>,
        search: SearchConfig,
    ) -> Result<Self, MatchError> {
        let metric: Arc<dyn DistanceMetric<HybridInput>> = distance.clone();
        let prepare = Arc::clone(&distance);
        let inner = FuzzyMatcher::<T, String, HybridInput>::builder(targets, metric)
            .target_to_extraction(move |target| Ok(to_phrase(target)))
            .extraction_to_pronounceable(move |phrase: &String| prepare.prepare(phrase))
            .search(search)
            .build()?;
        Ok(Self::new(inner, move |query: &HybridInput| {
            distance.threshold_scale(query)
        }))
    }
}

impl<T, P> fmt::Debug for NormalizedMatcher<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedMatcher")
            .field("inner", &self.inner)
            .finish()
    }
}
