use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use canonical::{EnPreprocessor, Preprocessor, Tokenizer};
use index::{DistanceMetric, Match};
use tracing::{debug, warn, Level};

use crate::distance::{HybridDistance, HybridInput, LevenshteinDistance};
use crate::metrics::{metrics_recorder, MatcherKind};
use crate::normalized::NormalizedMatcher;
use crate::pronounce::PhoneticBackend;
use crate::target::Target;
use crate::types::{MatchError, MatcherConfig, SearchScope};
use crate::windows::{TargetSet, WindowGenerator};

pub(crate) type FieldExtractor<E, F> = Box<dyn Fn(&E) -> F + Send + Sync>;

/// Injected collaborators shared by the domain matcher builders.
#[derive(Clone)]
pub(crate) struct Collaborators {
    pub(crate) preprocessor: Arc<dyn Preprocessor>,
    pub(crate) windows: WindowGenerator,
    pub(crate) lexical: Arc<dyn DistanceMetric<str>>,
    pub(crate) phonetics: Option<PhoneticBackend>,
}

impl Collaborators {
    pub(crate) fn with_preprocessor(preprocessor: EnPreprocessor) -> Self {
        Self {
            preprocessor: Arc::new(preprocessor),
            windows: WindowGenerator::default(),
            lexical: Arc::new(LevenshteinDistance),
            phonetics: None,
        }
    }

    pub(crate) fn set_tokenizer(&mut self, tokenizer: Arc<dyn Tokenizer>) {
        self.windows = WindowGenerator::new(tokenizer);
    }

    pub(crate) fn distance(&self, config: &MatcherConfig) -> Result<Arc<HybridDistance>, MatchError> {
        let distance = HybridDistance::new(
            config.phonetic_weight_percentage,
            Arc::clone(&self.lexical),
            self.phonetics.clone(),
        )?;
        Ok(Arc::new(distance))
    }
}

/// Falls back to the identity when the entity already is its field struct.
pub(crate) fn resolve_extractor<E, F>(
    extract: Option<FieldExtractor<E, F>>,
) -> Result<FieldExtractor<E, F>, MatchError>
where
    E: 'static,
    F: Clone + Default + 'static,
{
    if let Some(extract) = extract {
        return Ok(extract);
    }
    if TypeId::of::<E>() != TypeId::of::<F>() {
        return Err(MatchError::TypeMismatch {
            from: type_name::<E>(),
            to: type_name::<F>(),
        });
    }
    Ok(Box::new(|entity: &E| {
        (entity as &dyn Any)
            .downcast_ref::<F>()
            .cloned()
            .unwrap_or_default()
    }))
}

/// One hybrid index over the windows of one or more entity fields.
pub(crate) struct PhraseIndex<V> {
    matcher: NormalizedMatcher<Target<V>, HybridInput>,
    max_window: usize,
}

impl<V> PhraseIndex<V>
where
    V: Send + Sync + 'static,
{
    pub(crate) fn build(
        targets: TargetSet<V>,
        distance: Arc<HybridDistance>,
        config: &MatcherConfig,
    ) -> Result<Self, MatchError> {
        let (targets, max_window) = targets.finish();
        let matcher = NormalizedMatcher::hybrid(
            targets,
            |target: &Target<V>| target.phrase.clone(),
            distance,
            config.search,
        )?;
        Ok(Self {
            matcher,
            max_window,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.matcher.len()
    }

    pub(crate) fn max_window(&self) -> usize {
        self.max_window
    }

    /// Window hits for an already preprocessed query.
    pub(crate) fn search(
        &self,
        query: &str,
        config: &MatcherConfig,
    ) -> Result<Vec<Match<&Target<V>>>, MatchError> {
        let k = self.max_window.saturating_mul(config.max_returns);
        self.matcher.k_nearest_within(query, k, config.find_threshold)
    }
}

impl<V> fmt::Debug for PhraseIndex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhraseIndex")
            .field("targets", &self.matcher.len())
            .field("max_window", &self.max_window)
            .finish()
    }
}

/// Preprocesses `query`, runs `search` and reports the outcome.
///
/// Queries that preprocess to nothing find nothing.
pub(crate) fn run_find<V>(
    kind: MatcherKind,
    scope: SearchScope,
    preprocessor: &dyn Preprocessor,
    query: &str,
    search: impl FnOnce(&str) -> Result<Vec<Arc<V>>, MatchError>,
) -> Result<Vec<Arc<V>>, MatchError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::DEBUG,
        "matcher.find",
        kind = kind.as_str(),
        scope = scope.as_str()
    );
    let _guard = span.enter();

    let phrase = preprocessor.preprocess(query);
    let outcome = if phrase.is_empty() {
        Ok(Vec::new())
    } else {
        search(&phrase)
    };

    let latency = start.elapsed();
    let elapsed_micros = latency.as_micros();
    match &outcome {
        Ok(found) => {
            debug!(query = %phrase, hits = found.len(), elapsed_micros, "find_success");
            if let Some(recorder) = metrics_recorder() {
                recorder.record_find(kind, scope, latency, found.len());
            }
        }
        Err(err) => {
            warn!(query = %phrase, error = %err, elapsed_micros, "find_failure");
        }
    }
    outcome
}
