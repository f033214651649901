use std::sync::Arc;

use phonematch::{
    ContactFields, ContactMatcher, DistanceMetric, FindRequest, MetricError, PhonematchConfig,
    PhoneticBackend, PlaceFields, PlaceMatcher, Pronunciation, SearchScope, configure_contacts,
    configure_places,
};

const CONFIG: &str = r#"
version: "1.0"
name: "integration"
contact:
  phonetic_weight_percentage: 0.0
place:
  phonetic_weight_percentage: 0.0
"#;

fn config() -> PhonematchConfig {
    PhonematchConfig::from_yaml(CONFIG).expect("integration config is valid")
}

fn contacts() -> Vec<ContactFields> {
    vec![
        ContactFields::named("Andrew Smith"),
        ContactFields::named("Andrew"),
        ContactFields::named("John B"),
        ContactFields::named("John C"),
        ContactFields::named("Jennifer")
            .with_alias("Jenny")
            .with_alias("Mom"),
    ]
}

fn places() -> Vec<PlaceFields> {
    vec![
        PlaceFields::named("Marbles Restaurant")
            .with_address("8 William Street E")
            .with_type("Canadian (New)"),
        PlaceFields::named("Beertown")
            .with_address("75 King Street S")
            .with_type("Canadian (New)")
            .with_type("Beer, Wine & Spirits")
            .with_type("Bars"),
        PlaceFields::named("Nick and Nat's Uptown 21").with_address("21 King St N"),
        PlaceFields::named("The Shops").with_address("7 Fake Cres. Toronto"),
    ]
}

fn contact_names(found: &[Arc<ContactFields>]) -> Vec<&str> {
    found.iter().filter_map(|c| c.name.as_deref()).collect()
}

fn place_names(found: &[Arc<PlaceFields>]) -> Vec<&str> {
    found.iter().filter_map(|p| p.name.as_deref()).collect()
}

#[test]
fn contact_scenarios_through_config() {
    let cfg = config();
    let matcher = configure_contacts(ContactMatcher::builder(contacts()), &cfg)
        .expect("configure")
        .build()
        .expect("build");

    assert_eq!(
        contact_names(&matcher.find("john").unwrap()),
        vec!["John B", "John C"]
    );
    assert_eq!(
        contact_names(&matcher.find("Andrew Smith").unwrap()),
        vec!["Andrew Smith"]
    );
    assert_eq!(contact_names(&matcher.find("mom").unwrap()), vec!["Jennifer"]);
    assert!(matcher.find("").unwrap().is_empty());
}

#[test]
fn place_scenarios_through_config() {
    let cfg = config();
    let matcher = configure_places(PlaceMatcher::builder(places()), &cfg)
        .expect("configure")
        .build()
        .expect("build");

    let hits = matcher.find("king street").unwrap();
    let mut king = place_names(&hits);
    king.sort_unstable();
    assert_eq!(king, vec!["Beertown", "Nick and Nat's Uptown 21"]);

    assert_eq!(
        place_names(&matcher.find("fake crescent").unwrap()),
        vec!["The Shops"]
    );
    assert_eq!(place_names(&matcher.find("Bars").unwrap()), vec!["Beertown"]);
    assert_eq!(
        place_names(&matcher.find("The Shops").unwrap()),
        vec!["The Shops"]
    );
}

#[test]
fn requests_arrive_as_json() {
    let matcher = configure_contacts(ContactMatcher::builder(contacts()), &config())
        .unwrap()
        .build()
        .unwrap();

    let request: FindRequest =
        serde_json::from_str(r#"{"query": "jenny", "scope": "alias"}"#).unwrap();
    assert_eq!(request.scope, SearchScope::Alias);
    assert_eq!(
        contact_names(&matcher.find_request(&request).unwrap()),
        vec!["Jennifer"]
    );

    let request: FindRequest = serde_json::from_str(r#"{"query": "jenny", "scope": "name"}"#).unwrap();
    assert!(matcher.find_request(&request).unwrap().is_empty());
}

/// Letters stand in for phones; vowels share one class and `h`/`w` are silent.
fn sound_classes(text: &str) -> Result<Pronunciation, MetricError> {
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

fn phone_edits() -> Arc<dyn DistanceMetric<Pronunciation>> {
    Arc::new(
        |a: &Pronunciation, b: &Pronunciation| -> Result<f64, MetricError> {
            Ok(strsim::generic_levenshtein(&a.phones, &b.phones) as f64)
        },
    )
}

#[test]
fn misheard_name_found_by_sound() {
    let yaml = r#"
version: "1.0"
contact:
  phonetic_weight_percentage: 0.7
"#;
    let cfg = PhonematchConfig::from_yaml(yaml).unwrap();
    let backend = PhoneticBackend::new(Arc::new(sound_classes), phone_edits());
    let matcher = configure_contacts(ContactMatcher::builder(contacts()), &cfg)
        .unwrap()
        .phonetics(backend)
        .build()
        .unwrap();

    assert_eq!(
        contact_names(&matcher.find("andru").unwrap()),
        vec!["Andrew Smith", "Andrew"]
    );

    let lexical = configure_contacts(ContactMatcher::builder(contacts()), &config())
        .unwrap()
        .build()
        .unwrap();
    assert!(lexical.find("andru").unwrap().is_empty());
}
