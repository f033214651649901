use std::fmt;
use std::sync::Arc;

use canonical::{EnPreprocessor, Preprocessor, Tokenizer};
use index::DistanceMetric;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{resolve_extractor, run_find, Collaborators, FieldExtractor, PhraseIndex};
use crate::metrics::MatcherKind;
use crate::pronounce::PhoneticBackend;
use crate::select::{merge_ascending, SelectionPolicy};
use crate::types::{FindRequest, MatchError, MatcherConfig, SearchScope};
use crate::windows::TargetSet;

#[cfg(test)]
mod tests;

/// The searchable fields of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl ContactFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// Finds contacts by (partial, misspelled or misheard) name or alias.
///
/// Names and aliases live in two separate indices; [`find`](Self::find)
/// searches both and merges the hits, while [`find_by_name`](Self::find_by_name)
/// and [`find_by_alias`](Self::find_by_alias) search one.
pub struct ContactMatcher<C> {
    names: PhraseIndex<C>,
    aliases: PhraseIndex<C>,
    preprocessor: Arc<dyn Preprocessor>,
    config: MatcherConfig,
    policy: SelectionPolicy,
}

impl<C> ContactMatcher<C>
where
    C: Send + Sync + 'static,
{
    pub fn builder(contacts: Vec<C>) -> ContactMatcherBuilder<C> {
        ContactMatcherBuilder {
            contacts,
            extract: None,
            config: MatcherConfig::contact_defaults(),
            collaborators: Collaborators::with_preprocessor(EnPreprocessor::new()),
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Contacts whose name or alias matches `query`, best first.
    pub fn find(&self, query: &str) -> Result<Vec<Arc<C>>, MatchError> {
        run_find(
            MatcherKind::Contact,
            SearchScope::All,
            self.preprocessor.as_ref(),
            query,
            |phrase| {
                let names = self.names.search(phrase, &self.config)?;
                let aliases = self.aliases.search(phrase, &self.config)?;
                Ok(self.policy.select(&merge_ascending(names, aliases)))
            },
        )
    }

    /// Contacts whose name matches `name`, best first.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<Arc<C>>, MatchError> {
        run_find(
            MatcherKind::Contact,
            SearchScope::Name,
            self.preprocessor.as_ref(),
            name,
            |phrase| Ok(self.policy.select(&self.names.search(phrase, &self.config)?)),
        )
    }

    /// Contacts with an alias matching `alias`, best first.
    pub fn find_by_alias(&self, alias: &str) -> Result<Vec<Arc<C>>, MatchError> {
        run_find(
            MatcherKind::Contact,
            SearchScope::Alias,
            self.preprocessor.as_ref(),
            alias,
            |phrase| Ok(self.policy.select(&self.aliases.search(phrase, &self.config)?)),
        )
    }

    /// Dispatches a [`FindRequest`] on its scope.
    pub fn find_request(&self, request: &FindRequest) -> Result<Vec<Arc<C>>, MatchError> {
        let query = request.query()?;
        match request.scope {
            SearchScope::All => self.find(query),
            SearchScope::Name => self.find_by_name(query),
            SearchScope::Alias => self.find_by_alias(query),
        }
    }
}

impl<C> fmt::Debug for ContactMatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactMatcher")
            .field("names", &self.names)
            .field("aliases", &self.aliases)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`ContactMatcher`].
pub struct ContactMatcherBuilder<C> {
    contacts: Vec<C>,
    extract: Option<FieldExtractor<C, ContactFields>>,
    config: MatcherConfig,
    collaborators: Collaborators,
}

impl<C> ContactMatcherBuilder<C>
where
    C: Send + Sync + 'static,
{
    /// Maps a contact to its searchable fields. Required unless the contacts
    /// are [`ContactFields`] themselves.
    pub fn fields(mut self, extract: impl Fn(&C) -> ContactFields + Send + Sync + 'static) -> Self {
        self.extract = Some(Box::new(extract));
        self
    }

    pub fn config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Pronouncer and phonetic distance; required when the phonetic weight
    /// is positive.
    pub fn phonetics(mut self, backend: PhoneticBackend) -> Self {
        self.collaborators.phonetics = Some(backend);
        self
    }

    pub fn preprocessor(mut self, preprocessor: Arc<dyn Preprocessor>) -> Self {
        self.collaborators.preprocessor = preprocessor;
        self
    }

    pub fn tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.collaborators.set_tokenizer(tokenizer);
        self
    }

    /// Spelling distance; Levenshtein by default.
    pub fn lexical_metric(mut self, metric: Arc<dyn DistanceMetric<str>>) -> Self {
        self.collaborators.lexical = metric;
        self
    }

    pub fn build(self) -> Result<ContactMatcher<C>, MatchError> {
        self.config.validate()?;
        let extract = resolve_extractor(self.extract)?;
        let distance = self.collaborators.distance(&self.config)?;
        let preprocessor = Arc::clone(&self.collaborators.preprocessor);
        let windows = &self.collaborators.windows;

        let mut names = TargetSet::new();
        let mut aliases = TargetSet::new();
        let contact_count = self.contacts.len();
        for (id, contact) in self.contacts.into_iter().enumerate() {
            let contact = Arc::new(contact);
            let fields = extract(contact.as_ref());

            if let Some(name) = fields.name.as_deref() {
                let phrase = preprocessor.preprocess(name);
                names.extend(&contact, id, windows.phrase_windows(&phrase));
            }
            for alias in &fields.aliases {
                let phrase = preprocessor.preprocess(alias);
                aliases.extend(&contact, id, windows.phrase_windows(&phrase));
            }
        }

        let names = PhraseIndex::build(names, Arc::clone(&distance), &self.config)?;
        let aliases = PhraseIndex::build(aliases, distance, &self.config)?;
        info!(
            contacts = contact_count,
            name_targets = names.len(),
            alias_targets = aliases.len(),
            name_window = names.max_window(),
            alias_window = aliases.max_window(),
            "contact_matcher_built"
        );

        Ok(ContactMatcher {
            names,
            aliases,
            preprocessor,
            policy: SelectionPolicy::from_config(&self.config),
            config: self.config,
        })
    }
}
