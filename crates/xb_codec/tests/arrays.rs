use pretty_assertions::assert_eq;
use xb_codec::{Error, Formatter};
use xb_reflect::describe;
use xb_reflect::ops::MultiArray;

#[derive(Default, Debug, PartialEq)]
struct Measurements {
    grid: MultiArray<i32>,
    triple: [u8; 3],
}

describe! { Measurements = "Measurements" { grid, triple } }

fn formatter() -> Formatter<Measurements> {
    Formatter::new()
}

#[test]
fn two_dimensional_arrays_round_trip() {
    let mut grid: MultiArray<i32> = MultiArray::new([3, 2]);
    for (n, tuple) in xb_reflect::ops::Odometer::new(&[3, 2]).enumerate() {
        *grid.get_mut(&tuple).unwrap() = n as i32 * 10;
    }
    let data = Measurements {
        grid,
        triple: [1, 2, 3],
    };

    let text = formatter().save_to_string(&data).unwrap();
    let loaded = formatter().load_from_str(&text).unwrap();
    assert_eq!(loaded, data);
}

#[test]
fn dimensions_are_declared_on_the_element() {
    let data = Measurements {
        grid: MultiArray::new([2, 2, 2]),
        triple: [0; 3],
    };
    let text = formatter().save_to_string(&data).unwrap();
    assert!(text.contains("xb:dims=\"2,2,2\""));
    assert!(text.contains("xb:dims=\"3\""));
    assert!(text.contains("xmlns:xb"));
}

#[test]
fn empty_arrays_round_trip() {
    let data = Measurements::default();
    let text = formatter().save_to_string(&data).unwrap();
    let loaded = formatter().load_from_str(&text).unwrap();
    assert_eq!(loaded.grid.dims(), &[0]);
    assert_eq!(loaded.grid.len(), 0);
}

#[test]
fn item_count_must_match_the_dimensions() {
    let text = "<Measurements xmlns:xb=\"urn:xb:codec\">\
                <grid xb:dims=\"2,2\"><Item>1</Item></grid>\
                <triple xb:dims=\"3\"><Item>0</Item><Item>0</Item><Item>0</Item></triple>\
                </Measurements>";
    let err = formatter().load_from_str(text).unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
}

#[test]
fn bad_dimension_tokens_are_rejected() {
    let text = "<Measurements xmlns:xb=\"urn:xb:codec\">\
                <grid xb:dims=\"two\"></grid>\
                </Measurements>";
    let err = formatter().load_from_str(text).unwrap_err();
    assert!(matches!(err, Error::BadDimensions(_)));
}

#[test]
fn missing_dimensions_are_rejected() {
    let text = "<Measurements><grid><Item>1</Item></grid></Measurements>";
    let err = formatter().load_from_str(text).unwrap_err();
    assert!(matches!(err, Error::MissingAttribute { .. }));
}

#[test]
fn fixed_arrays_cannot_change_length() {
    let text = "<Measurements xmlns:xb=\"urn:xb:codec\">\
                <triple xb:dims=\"2\"><Item>1</Item><Item>2</Item></triple>\
                </Measurements>";
    let err = formatter().load_from_str(text).unwrap_err();
    assert!(matches!(err, Error::Shape(_)));
}
