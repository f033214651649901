use std::fmt;
use std::sync::Arc;

use canonical::{EnPreprocessor, Preprocessor, Tokenizer};
use index::DistanceMetric;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{resolve_extractor, run_find, Collaborators, FieldExtractor, PhraseIndex};
use crate::metrics::MatcherKind;
use crate::pronounce::PhoneticBackend;
use crate::select::SelectionPolicy;
use crate::types::{FindRequest, MatchError, MatcherConfig, SearchScope};
use crate::windows::TargetSet;

#[cfg(test)]
mod tests;

/// The searchable fields of a place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Categories such as "Bars" or "Canadian (New)".
    #[serde(default)]
    pub types: Vec<String>,
}

impl PlaceFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.types.push(kind.into());
        self
    }
}

/// Finds places by name, address, a mix of both, or category.
///
/// All fields share one index. Names and addresses are windowed together
/// (see [`WindowGenerator::place_windows`](crate::WindowGenerator::place_windows)),
/// each category on its own.
pub struct PlaceMatcher<P> {
    index: PhraseIndex<P>,
    preprocessor: Arc<dyn Preprocessor>,
    config: MatcherConfig,
    policy: SelectionPolicy,
}

impl<P> PlaceMatcher<P>
where
    P: Send + Sync + 'static,
{
    pub fn builder(places: Vec<P>) -> PlaceMatcherBuilder<P> {
        PlaceMatcherBuilder {
            places,
            extract: None,
            config: MatcherConfig::place_defaults(),
            collaborators: Collaborators::with_preprocessor(EnPreprocessor::places()),
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Places matching `query`, best first.
    pub fn find(&self, query: &str) -> Result<Vec<Arc<P>>, MatchError> {
        run_find(
            MatcherKind::Place,
            SearchScope::All,
            self.preprocessor.as_ref(),
            query,
            |phrase| Ok(self.policy.select(&self.index.search(phrase, &self.config)?)),
        )
    }

    /// Only [`SearchScope::All`] applies to places.
    pub fn find_request(&self, request: &FindRequest) -> Result<Vec<Arc<P>>, MatchError> {
        let query = request.query()?;
        match request.scope {
            SearchScope::All => self.find(query),
            scope => Err(MatchError::InvalidArgument(format!(
                "places cannot be searched by {}",
                scope.as_str()
            ))),
        }
    }
}

impl<P> fmt::Debug for PlaceMatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceMatcher")
            .field("index", &self.index)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`PlaceMatcher`].
pub struct PlaceMatcherBuilder<P> {
    places: Vec<P>,
    extract: Option<FieldExtractor<P, PlaceFields>>,
    config: MatcherConfig,
    collaborators: Collaborators,
}

impl<P> PlaceMatcherBuilder<P>
where
    P: Send + Sync + 'static,
{
    /// Maps a place to its searchable fields. Required unless the places
    /// are [`PlaceFields`] themselves.
    pub fn fields(mut self, extract: impl Fn(&P) -> PlaceFields + Send + Sync + 'static) -> Self {
        self.extract = Some(Box::new(extract));
        self
    }

    pub fn config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn phonetics(mut self, backend: PhoneticBackend) -> Self {
        self.collaborators.phonetics = Some(backend);
        self
    }

    /// Replaces the default preprocessor, which expands street abbreviations.
    pub fn preprocessor(mut self, preprocessor: Arc<dyn Preprocessor>) -> Self {
        self.collaborators.preprocessor = preprocessor;
        self
    }

    pub fn tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.collaborators.set_tokenizer(tokenizer);
        self
    }

    pub fn lexical_metric(mut self, metric: Arc<dyn DistanceMetric<str>>) -> Self {
        self.collaborators.lexical = metric;
        self
    }

    pub fn build(self) -> Result<PlaceMatcher<P>, MatchError> {
        self.config.validate()?;
        let extract = resolve_extractor(self.extract)?;
        let distance = self.collaborators.distance(&self.config)?;
        let preprocessor = Arc::clone(&self.collaborators.preprocessor);
        let windows = &self.collaborators.windows;

        let mut targets = TargetSet::new();
        let place_count = self.places.len();
        for (id, place) in self.places.into_iter().enumerate() {
            let place = Arc::new(place);
            let fields = extract(place.as_ref());

            let name = fields
                .name
                .as_deref()
                .map(|name| preprocessor.preprocess(name))
                .unwrap_or_default();
            let address = fields
                .address
                .as_deref()
                .map(|address| preprocessor.preprocess(address))
                .unwrap_or_default();
            targets.extend(&place, id, windows.place_windows(&name, &address));

            for kind in &fields.types {
                let phrase = preprocessor.preprocess(kind);
                targets.extend(&place, id, windows.phrase_windows(&phrase));
            }
        }

        let index = PhraseIndex::build(targets, distance, &self.config)?;
        info!(
            places = place_count,
            targets = index.len(),
            window = index.max_window(),
            "place_matcher_built"
        );

        Ok(PlaceMatcher {
            index,
            preprocessor,
            policy: SelectionPolicy::from_config(&self.config),
            config: self.config,
        })
    }
}
