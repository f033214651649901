use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::cache::FeatureCache;
use crate::error::IndexError;
use crate::metric::{DistanceMetric, MetricError};
use crate::query::Match;
use crate::search::{linear_scan, parallel_scan, Candidate, SearchConfig, SearchStrategy};


type Extractor<A, B> = Arc<dyn Fn(&A) -> Result<B, MetricError> + Send + Sync>;

/// Nearest-neighbour matcher over a fixed list of targets.
///
/// - `T` is the stored target type,
/// - `E` is the extraction type; queries are expressed in it,
/// - `P` is the feature type compared by the metric.
///
/// Target features are derived through `target_to_extraction` followed by
/// `extraction_to_pronounceable` on first use and cached. Omitted mappings
/// default to the identity, which requires the two types to be equal.
///
/// The matcher is immutable after [`FuzzyMatcherBuilder::build`] and can be
/// shared across threads.
pub struct FuzzyMatcher<T, E, P = E> {
    targets: Vec<T>,
    metric: Arc<dyn DistanceMetric<P>>,
    target_feature: Extractor<T, P>,
    query_feature: Extractor<E, P>,
    cache: FeatureCache<P>,
    search: SearchConfig,
}

impl<T, E, P> FuzzyMatcher<T, E, P> {
    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }
}

impl<T, E, P> FuzzyMatcher<T, E, P>
where
    T: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
{
    pub fn builder(
        targets: Vec<T>,
        metric: Arc<dyn DistanceMetric<P>>,
    ) -> FuzzyMatcherBuilder<T, E, P> {
        FuzzyMatcherBuilder {
            targets,
            metric,
            target_to_extraction: None,
            extraction_to_pronounceable: None,
            search: SearchConfig::default(),
        }
    }

    /// Number of target features computed so far.
    pub fn cached_features(&self) -> usize {
        self.cache.initialized()
    }

    /// The closest target, if any.
    pub fn nearest(&self, query: &E) -> Result<Option<Match<&T>>, IndexError> {
        self.nearest_within(query, f64::INFINITY)
    }

    /// The closest target with `distance < limit`, if any.
    pub fn nearest_within(&self, query: &E, limit: f64) -> Result<Option<Match<&T>>, IndexError> {
        Ok(self.k_nearest_within(query, 1, limit)?.into_iter().next())
    }

    /// Up to `k` closest targets, ascending by distance.
    pub fn k_nearest(&self, query: &E, k: usize) -> Result<Vec<Match<&T>>, IndexError> {
        self.k_nearest_within(query, k, f64::INFINITY)
    }

    /// Up to `k` closest targets with `distance < limit`, ascending by
    /// distance. `k` is clamped to `[1, len()]`.
    pub fn k_nearest_within(
        &self,
        query: &E,
        k: usize,
        limit: f64,
    ) -> Result<Vec<Match<&T>>, IndexError> {
        let feature = self.query_feature(query)?;
        self.k_nearest_within_feature(&feature, k, limit)
    }

    /// Maps a query into feature space.
    pub fn query_feature(&self, query: &E) -> Result<P, IndexError> {
        Ok((self.query_feature)(query)?)
    }

    /// Same as [`k_nearest_within`](Self::k_nearest_within) for a query
    /// whose feature was already computed.
    pub fn k_nearest_within_feature(
        &self,
        feature: &P,
        k: usize,
        limit: f64,
    ) -> Result<Vec<Match<&T>>, IndexError> {
        if limit.is_nan() {
            return Err(IndexError::InvalidArgument("limit must not be NaN".into()));
        }
        if self.targets.is_empty() {
            return Ok(Vec::new());
        }
        let k = k.clamp(1, self.targets.len());

        let distance_at = |index: usize| -> Result<f64, IndexError> {
            let target = self
                .cache
                .get_or_try_init(index, || (self.target_feature)(&self.targets[index]))?;
            Ok(self.metric.distance(feature, target)?)
        };

        let candidates = if self.search.should_accelerate(self.targets.len()) {
            parallel_scan(self.targets.len(), k, limit, distance_at)?
        } else {
            linear_scan(self.targets.len(), k, limit, distance_at)?
        };

        Ok(self.resolve(candidates))
    }

    fn resolve(&self, candidates: Vec<Candidate>) -> Vec<Match<&T>> {
        candidates
            .into_iter()
            .map(|c| Match::new(&self.targets[c.index], c.distance))
            .collect()
    }
}

impl<T, E, P> fmt::Debug for FuzzyMatcher<T, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzyMatcher")
            .field("targets", &self.targets.len())
            .field("cached_features", &self.cache.initialized())
            .field("search", &self.search)
            .finish()
    }
}

/// Builder for [`FuzzyMatcher`].
pub struct FuzzyMatcherBuilder<T, E, P> {
    targets: Vec<T>,
    metric: Arc<dyn DistanceMetric<P>>,
    target_to_extraction: Option<Extractor<T, E>>,
    extraction_to_pronounceable: Option<Extractor<E, P>>,
    search: SearchConfig,
}

impl<T, E, P> FuzzyMatcherBuilder<T, E, P>
where
    T: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
{
    pub fn target_to_extraction(
        mut self,
        f: impl Fn(&T) -> Result<E, MetricError> + Send + Sync + 'static,
    ) -> Self {
        self.target_to_extraction = Some(Arc::new(f));
        self
    }

    pub fn extraction_to_pronounceable(
        mut self,
        f: impl Fn(&E) -> Result<P, MetricError> + Send + Sync + 'static,
    ) -> Self {
        self.extraction_to_pronounceable = Some(Arc::new(f));
        self
    }

    pub fn search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Fails with [`IndexError::TypeMismatch`] when a mapping was omitted
    /// between two different types.
    pub fn build(self) -> Result<FuzzyMatcher<T, E, P>, IndexError> {
        let to_extraction = match self.target_to_extraction {
            Some(f) => f,
            None => identity::<T, E>()?,
        };
        let to_feature = match self.extraction_to_pronounceable {
            Some(f) => f,
            None => identity::<E, P>()?,
        };

        let query_feature = Arc::clone(&to_feature);
        let target_feature: Extractor<T, P> = Arc::new(move |target: &T| {
            let extraction = to_extraction(target)?;
            to_feature(&extraction)
        });

        if self.search.strategy == SearchStrategy::Accelerated
            && !self.search.should_accelerate(self.targets.len())
        {
            debug!(
                "accelerated search requested for {} targets, below threshold {}; using linear scan",
                self.targets.len(),
                self.search.min_targets_for_acceleration
            );
        }

        Ok(FuzzyMatcher {
            cache: FeatureCache::new(self.targets.len()),
            targets: self.targets,
            metric: self.metric,
            target_feature,
            query_feature,
            search: self.search,
        })
    }
}

/// Identity mapping for two types that are the same at runtime.
fn identity<A, B>() -> Result<Extractor<A, B>, IndexError>
where
    A: 'static,
    B: Clone + 'static,
{
    if TypeId::of::<A>() != TypeId::of::<B>() {
        return Err(IndexError::TypeMismatch {
            from: type_name::<A>(),
            to: type_name::<B>(),
        });
    }
    Ok(Arc::new(|value: &A| {
        (value as &dyn Any)
            .downcast_ref::<B>()
            .cloned()
            .ok_or_else(|| {
                MetricError::new(format!("`{}` is not `{}`", type_name::<A>(), type_name::<B>()))
            })
    }))
}
