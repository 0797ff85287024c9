use pretty_assertions::assert_eq;
use xb_codec::Formatter;
use xb_reflect::describe;

#[derive(Default, Debug, PartialEq)]
struct Credentials {
    user: String,
    password: String,
    tokens: Vec<String>,
}

describe! {
    Credentials = "Credentials" { user, #[secret] password, #[secret] tokens }
}

fn sample() -> Credentials {
    Credentials {
        user: "admin".into(),
        password: "correct horse battery staple".into(),
        tokens: vec!["tok-1".into(), "tok-2".into()],
    }
}

#[test]
fn confidential_plaintext_never_reaches_the_output() {
    let formatter = Formatter::<Credentials>::with_passphrase("SuperSecretKey");
    let text = formatter.save_to_string(&sample()).unwrap();

    assert!(text.contains("admin"));
    assert!(!text.contains("correct horse"));
    assert!(!text.contains("tok-1"));
    assert!(!text.contains("<password"));
    assert!(text.contains("xb:Secret"));
}

#[test]
fn same_passphrase_interoperates_across_formatters() {
    let writer = Formatter::<Credentials>::with_passphrase("SuperSecretKey");
    let reader = Formatter::<Credentials>::with_passphrase("SuperSecretKey");

    let text = writer.save_to_string(&sample()).unwrap();
    assert_eq!(reader.load_from_str(&text).unwrap(), sample());
}

#[test]
fn wrong_passphrase_fails_loudly() {
    let writer = Formatter::<Credentials>::with_passphrase("right");
    let reader = Formatter::<Credentials>::with_passphrase("wrong");

    let text = writer.save_to_string(&sample()).unwrap();
    assert!(reader.load_from_str(&text).is_err());
}

#[test]
fn default_formatters_still_conceal() {
    let formatter = Formatter::<Credentials>::new();
    let text = formatter.save_to_string(&sample()).unwrap();

    assert!(!text.contains("correct horse"));
    assert!(!text.contains("tok-1"));
    assert!(text.contains("xb:Secret"));

    let reader = Formatter::<Credentials>::new();
    assert_eq!(reader.load_from_str(&text).unwrap(), sample());
}

#[test]
fn a_default_formatter_cannot_read_passphrase_protected_documents() {
    let writer = Formatter::<Credentials>::with_passphrase("k");
    let text = writer.save_to_string(&sample()).unwrap();

    let bare = Formatter::<Credentials>::new();
    assert!(bare.load_from_str(&text).is_err());
}

#[test]
fn concealed_collections_round_trip_whole() {
    let formatter = Formatter::<Credentials>::with_passphrase("k");
    let loaded = formatter
        .load_from_str(&formatter.save_to_string(&sample()).unwrap())
        .unwrap();
    assert_eq!(loaded.tokens, ["tok-1", "tok-2"]);
}
