use super::*;

#[derive(Debug, Clone, PartialEq)]
struct Place {
    name: &'static str,
    address: &'static str,
    types: Vec<&'static str>,
}

fn places() -> Vec<Place> {
    vec![
        Place {
            name: "Marbles Restaurant",
            address: "8 William Street E",
            types: vec!["Canadian (New)"],
        },
        Place {
            name: "Beertown",
            address: "75 King Street S",
            types: vec!["Canadian (New)", "Beer, Wine & Spirits", "Bars"],
        },
        Place {
            name: "Nick and Nat's Uptown 21",
            address: "21 King St N",
            types: Vec::new(),
        },
        Place {
            name: "The Shops",
            address: "7 Fake Cres. Toronto",
            types: Vec::new(),
        },
    ]
}

fn fields(place: &Place) -> PlaceFields {
    PlaceFields {
        name: Some(place.name.to_string()),
        address: Some(place.address.to_string()),
        types: place.types.iter().map(|t| t.to_string()).collect(),
    }
}

fn matcher() -> PlaceMatcher<Place> {
    PlaceMatcher::builder(places())
        .fields(fields)
        .config(MatcherConfig {
            phonetic_weight_percentage: 0.0,
            ..MatcherConfig::place_defaults()
        })
        .build()
        .expect("lexical place matcher builds")
}

fn names(found: &[Arc<Place>]) -> Vec<&'static str> {
    found.iter().map(|p| p.name).collect()
}

#[test]
fn street_query_returns_both_king_street_places() {
    let found = matcher().find("king street").unwrap();
    let mut found = names(&found);
    found.sort_unstable();
    assert_eq!(found, vec!["Beertown", "Nick and Nat's Uptown 21"]);
}

#[test]
fn abbreviated_address_matches_expanded_query() {
    let found = matcher().find("fake crescent").unwrap();
    assert_eq!(names(&found), vec!["The Shops"]);
}

#[test]
fn category_matches() {
    let found = matcher().find("Bars").unwrap();
    assert_eq!(names(&found), vec!["Beertown"]);
}

#[test]
fn stop_words_are_ignored_in_names() {
    let found = matcher().find("The Shops").unwrap();
    assert_eq!(names(&found), vec!["The Shops"]);
}

#[test]
fn name_and_address_prefix_combined() {
    let found = matcher().find("beertown 75 king").unwrap();
    assert_eq!(names(&found), vec!["Beertown"]);
}

#[test]
fn empty_query_finds_nothing() {
    let m = matcher();
    assert!(m.find("").unwrap().is_empty());
    assert!(m.find("the").unwrap().is_empty());
}

#[test]
fn unrelated_query_finds_nothing() {
    assert!(matcher().find("Unrelated").unwrap().is_empty());
}

#[test]
fn debug_output_reports_index_shape() {
    let rendered = format!("{:?}", matcher());
    assert!(rendered.contains("PlaceMatcher"));
    assert!(rendered.contains("targets"));
    assert!(rendered.contains("max_window"));
}

#[test]
fn defaults_return_up_to_eight() {
    let m = PlaceMatcher::builder(vec![PlaceFields::named("Beertown")])
        .config(MatcherConfig {
            phonetic_weight_percentage: 0.0,
            ..MatcherConfig::place_defaults()
        })
        .build()
        .unwrap();
    assert_eq!(m.config().max_returns, 8);
}

#[test]
fn place_fields_need_no_extractor() {
    let m = PlaceMatcher::builder(vec![
        PlaceFields::named("Marbles").with_address("8 William St E"),
        PlaceFields::named("Beertown").with_type("Bars"),
    ])
    .config(MatcherConfig {
        phonetic_weight_percentage: 0.0,
        ..MatcherConfig::place_defaults()
    })
    .build()
    .unwrap();

    let found = m.find("william street").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name.as_deref(), Some("Marbles"));
}

#[test]
fn other_entities_need_an_extractor() {
    let err = PlaceMatcher::builder(places())
        .config(MatcherConfig {
            phonetic_weight_percentage: 0.0,
            ..MatcherConfig::place_defaults()
        })
        .build()
        .unwrap_err();
    assert!(matches!(err, MatchError::TypeMismatch { .. }));
}

#[test]
fn phonetic_weight_requires_backend() {
    let err = PlaceMatcher::builder(places()).fields(fields).build().unwrap_err();
    assert!(matches!(err, MatchError::InvalidArgument(_)));
}

#[test]
fn requests_are_scoped_to_all() {
    let m = matcher();
    let found = m.find_request(&FindRequest::new("bars")).unwrap();
    assert_eq!(names(&found), vec!["Beertown"]);

    let err = m
        .find_request(&FindRequest::new("bars").with_scope(SearchScope::Name))
        .unwrap_err();
    assert!(matches!(err, MatchError::InvalidArgument(_)));

    let err = m.find_request(&FindRequest::default()).unwrap_err();
    assert!(matches!(err, MatchError::InvalidArgument(_)));
}
