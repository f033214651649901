use super::*;
use std::sync::Mutex;
use std::time::Duration;

use index::MetricError;

use crate::metrics::{set_find_metrics, FindMetrics};
use crate::pronounce::Pronunciation;

#[derive(Debug, Clone, PartialEq)]
struct Contact {
    first: &'static str,
    last: &'static str,
    aliases: Vec<&'static str>,
}

fn contact(first: &'static str, last: &'static str) -> Contact {
    Contact {
        first,
        last,
        aliases: Vec::new(),
    }
}

fn contacts() -> Vec<Contact> {
    vec![
        contact("Andrew", "Smith"),
        contact("Andrew", ""),
        contact("John", "B"),
        contact("John", "C"),
        Contact {
            aliases: vec!["Jenny", "Mom"],
            ..contact("Jennifer", "")
        },
    ]
}

fn fields(c: &Contact) -> ContactFields {
    ContactFields {
        name: Some(format!("{} {}", c.first, c.last)),
        aliases: c.aliases.iter().map(|a| a.to_string()).collect(),
    }
}

fn lexical_config() -> MatcherConfig {
    MatcherConfig {
        phonetic_weight_percentage: 0.0,
        ..MatcherConfig::contact_defaults()
    }
}

fn lexical_matcher() -> ContactMatcher<Contact> {
    ContactMatcher::builder(contacts())
        .fields(fields)
        .config(lexical_config())
        .build()
        .expect("lexical matcher builds without phonetics")
}

/// Rough sound classes: vowels collapse to `V`, `h` and `w` are silent.
fn toy_pronounce(text: &str) -> Result<Pronunciation, MetricError> {
    if text.contains("xyz") {
        return Err(MetricError::new("cannot pronounce xyz"));
    }
    let mut phones: Vec<String> = Vec::new();
    for ch in text.chars().filter(|c| !matches!(c, 'h' | 'w')) {
        let phone = if "aeiouy".contains(ch) {
            "V".to_string()
        } else {
            ch.to_string()
        };
        if phone == "V" && phones.last().map(String::as_str) == Some("V") {
            continue;
        }
        phones.push(phone);
    }
    Ok(Pronunciation::from_phones(phones))
}

fn phone_edits(a: &Pronunciation, b: &Pronunciation) -> Result<f64, MetricError> {
    Ok(strsim::generic_levenshtein(&a.phones, &b.phones) as f64)
}

fn toy_backend() -> PhoneticBackend {
    PhoneticBackend::new(Arc::new(toy_pronounce), Arc::new(phone_edits))
}

fn hybrid_matcher() -> ContactMatcher<Contact> {
    ContactMatcher::builder(contacts())
        .fields(fields)
        .phonetics(toy_backend())
        .build()
        .expect("hybrid matcher builds")
}

fn first_names(found: &[Arc<Contact>]) -> Vec<(&str, &str)> {
    found.iter().map(|c| (c.first, c.last)).collect()
}

#[test]
fn partial_name_returns_every_sibling() {
    let found = lexical_matcher().find("john").expect("find");
    assert_eq!(first_names(&found), vec![("John", "B"), ("John", "C")]);
}

#[test]
fn full_name_returns_only_that_contact() {
    let found = lexical_matcher().find("Andrew Smith").expect("find");
    assert_eq!(first_names(&found), vec![("Andrew", "Smith")]);
}

#[test]
fn empty_query_returns_nothing() {
    let matcher = lexical_matcher();
    assert!(matcher.find("").expect("find").is_empty());
    assert!(matcher.find("  the ").expect("find").is_empty());
}

#[test]
fn misspelling_is_found_phonetically() {
    let matcher = hybrid_matcher();
    let found = matcher.find("andru").expect("find");
    assert_eq!(first_names(&found), vec![("Andrew", "Smith"), ("Andrew", "")]);

    // spelling alone is not close enough
    assert!(lexical_matcher().find("andru").expect("find").is_empty());
}

#[test]
fn aliases_are_searched_separately_and_merged() {
    let matcher = lexical_matcher();
    let by_alias = matcher.find_by_alias("jenny").expect("alias");
    assert_eq!(first_names(&by_alias), vec![("Jennifer", "")]);
    assert!(matcher.find_by_name("jenny").expect("name").is_empty());
    assert_eq!(first_names(&matcher.find("mom").expect("find")), vec![("Jennifer", "")]);
}

#[test]
fn max_returns_caps_results() {
    let config = MatcherConfig {
        max_returns: 1,
        ..lexical_config()
    };
    let matcher = ContactMatcher::builder(contacts())
        .fields(fields)
        .config(config)
        .build()
        .expect("builds");
    assert_eq!(matcher.find("john").expect("find").len(), 1);

    let none = ContactMatcher::builder(contacts())
        .fields(fields)
        .config(MatcherConfig {
            max_returns: 0,
            ..lexical_config()
        })
        .build()
        .expect("builds");
    assert!(none.find("john").expect("find").is_empty());
}

#[test]
fn positive_weight_without_phonetics_is_rejected() {
    let err = ContactMatcher::builder(contacts())
        .fields(fields)
        .build()
        .expect_err("default weight needs a pronouncer");
    assert!(matches!(err, MatchError::InvalidArgument(_)));

    let err = ContactMatcher::builder(contacts())
        .fields(fields)
        .config(MatcherConfig {
            phonetic_weight_percentage: 1.5,
            ..lexical_config()
        })
        .build()
        .expect_err("weight out of range");
    assert!(matches!(err, MatchError::InvalidArgument(_)));
}

#[test]
fn missing_extractor_requires_field_entities() {
    let err = ContactMatcher::builder(contacts())
        .config(lexical_config())
        .build()
        .expect_err("Contact is not ContactFields");
    assert!(matches!(err, MatchError::TypeMismatch { .. }));

    let direct = ContactMatcher::builder(vec![
        ContactFields::named("Ada Lovelace").with_alias("Countess"),
        ContactFields::named("Alan Turing"),
    ])
    .config(lexical_config())
    .build()
    .expect("fields need no extractor");
    let found = direct.find("lovelace").expect("find");
    assert_eq!(found[0].name.as_deref(), Some("Ada Lovelace"));
}

#[test]
fn pronouncer_failure_surfaces_and_matcher_recovers() {
    let matcher = hybrid_matcher();
    let err = matcher.find("xyz").expect_err("pronouncer fails");
    assert_eq!(err, MatchError::Metric(MetricError::new("cannot pronounce xyz")));
    assert_eq!(matcher.find("john").expect("find").len(), 2);
}

#[test]
fn find_request_dispatches_on_scope() {
    let matcher = lexical_matcher();
    let req = FindRequest::new("jenny").with_scope(SearchScope::Alias);
    assert_eq!(matcher.find_request(&req).expect("find").len(), 1);

    let missing = FindRequest {
        query: None,
        scope: SearchScope::Name,
    };
    assert!(matches!(
        matcher.find_request(&missing),
        Err(MatchError::InvalidArgument(_))
    ));
}

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(MatcherKind, SearchScope, usize)>>,
}

impl FindMetrics for Recorder {
    fn record_find(
        &self,
        kind: MatcherKind,
        scope: SearchScope,
        _latency: Duration,
        hit_count: usize,
    ) {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((kind, scope, hit_count));
    }
}

#[test]
fn finds_are_reported_to_metrics() {
    let recorder = Arc::new(Recorder::default());
    let shared: Arc<dyn FindMetrics> = recorder.clone();
    set_find_metrics(Some(shared));

    lexical_matcher().find_by_alias("mom").expect("find");

    let seen = recorder.seen.lock().expect("lock").clone();
    assert!(seen.contains(&(MatcherKind::Contact, SearchScope::Alias, 1)));
    set_find_metrics(None);
}
