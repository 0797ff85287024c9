use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use xb_codec::{Error, Formatter};
use xb_reflect::describe;

#[derive(Default, Debug, PartialEq)]
struct Address {
    street: String,
    number: u32,
}

describe! { Address = "Address" { street, number } }

#[derive(Default, Debug, PartialEq)]
struct Person {
    name: String,
    age: u8,
    height: f64,
    active: bool,
    nickname: Option<String>,
    address: Address,
    born: chrono::DateTime<Utc>,
    tenure: std::time::Duration,
}

describe! {
    Person = "Person" { name, age, height, active, nickname, address, born, tenure }
}

fn sample() -> Person {
    Person {
        name: "Jo äöü ÄÖÜ ß &<>\"".into(),
        age: 41,
        height: 1.78,
        active: true,
        nickname: Some("J".into()),
        address: Address {
            street: "Main".into(),
            number: 7,
        },
        born: Utc.with_ymd_and_hms(1984, 12, 3, 10, 30, 5).unwrap(),
        tenure: std::time::Duration::new(86_400, 250),
    }
}

#[test]
fn full_graph_round_trips() {
    let formatter = Formatter::<Person>::new();
    let text = formatter.save_to_string(&sample()).unwrap();
    assert_eq!(formatter.load_from_str(&text).unwrap(), sample());
}

#[test]
fn vacant_option_round_trips_as_vacant() {
    let formatter = Formatter::<Person>::new();
    let mut person = sample();
    person.nickname = None;

    let text = formatter.save_to_string(&person).unwrap();
    let loaded = formatter.load_from_str(&text).unwrap();
    assert_eq!(loaded.nickname, None);
    assert_eq!(loaded, person);
}

#[test]
fn hostile_text_is_escaped_not_mangled() {
    let formatter = Formatter::<Person>::new();
    let text = formatter.save_to_string(&sample()).unwrap();
    assert!(text.contains("&amp;"));
    assert!(text.contains("&lt;"));
    assert!(!text.contains("&<>\""));
}

#[test]
fn files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("person.xml");

    let formatter = Formatter::<Person>::new();
    formatter.save_to_file(&sample(), &path).unwrap();
    assert_eq!(formatter.load_from_file(&path).unwrap(), sample());
}

#[test]
fn missing_properties_keep_their_defaults() {
    let formatter = Formatter::<Person>::new();
    let loaded = formatter
        .load_from_str("<?xml version=\"1.0\"?><Person><name>only</name></Person>")
        .unwrap();
    assert_eq!(loaded.name, "only");
    assert_eq!(loaded.age, 0);
    assert_eq!(loaded.address, Address::default());
}

#[test]
fn foreign_root_is_refused() {
    let formatter = Formatter::<Person>::new();
    let err = formatter
        .load_from_str("<Animal><name>x</name></Animal>")
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedRoot { .. }));
}

#[test]
fn root_element_is_the_type_tag() {
    let formatter = Formatter::<Person>::new();
    let text = formatter.save_to_string(&sample()).unwrap();
    assert!(text.contains("<Person"));
    // No polymorphism, no secrets, no side channel: no reserved names.
    assert!(!text.contains("xmlns:xb"));
}

#[test]
fn garbage_input_is_an_error_not_a_panic() {
    let formatter = Formatter::<Person>::new();
    assert!(formatter.load_from_str("").is_err());
    assert!(formatter.load_from_str("not xml at all").is_err());
    assert!(formatter.load_from_str("<Person><age>elderly</age></Person>").is_err());
}
