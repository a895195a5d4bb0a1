//! List-or-object normalization, standalone and through `account.positions`

use opthouse_client::optionshouse::AccountPositions;
use opthouse_client::ApiResponse;
use opthouse_core::shape::{self, CollectionShape, ParsedShape, SingleShape};
use opthouse_core::{ParsePath, ShapeError};
use rstest::*;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Leg {
    key: String,
    #[serde(default)]
    qty: i64,
}

#[derive(Deserialize)]
struct Legs {
    label: String,
    #[serde(default)]
    legs: Option<Vec<Leg>>,
}

#[derive(Deserialize)]
struct OneLeg {
    label: String,
    legs: Leg,
}

impl CollectionShape for Legs {
    type Head = String;
    type Item = Leg;

    fn into_parts(self) -> (String, Vec<Leg>) {
        (self.label, self.legs.unwrap_or_default())
    }
}

impl SingleShape for OneLeg {
    type Head = String;
    type Item = Leg;

    fn into_parts(self) -> (String, Leg) {
        (self.label, self.legs)
    }
}

#[rstest]
#[case(r#"{"label":"x","legs":[{"key":"A:::S","qty":1},{"key":"B:::S","qty":2}]}"#, 2, ParsePath::Strict)]
#[case(r#"{"label":"x","legs":[{"key":"A:::S","qty":1}]}"#, 1, ParsePath::Strict)]
#[case(r#"{"label":"x","legs":{"key":"A:::S","qty":1}}"#, 1, ParsePath::Fallback)]
#[case(r#"{"label":"x","legs":[]}"#, 0, ParsePath::Strict)]
#[case(r#"{"label":"x","legs":null}"#, 0, ParsePath::Strict)]
#[case(r#"{"label":"x"}"#, 0, ParsePath::Strict)]
fn test_normalize_counts(#[case] raw: &str, #[case] len: usize, #[case] path: ParsePath) {
    let normalized = shape::normalize::<Legs, OneLeg>(raw).unwrap();
    assert_eq!(normalized.head, "x");
    assert_eq!(normalized.items.len(), len);
    assert_eq!(normalized.items.path(), path);
    assert_eq!(normalized.raw, raw);
}

#[test]
fn test_single_and_list_items_agree() {
    let single = shape::normalize::<Legs, OneLeg>(r#"{"label":"x","legs":{"key":"A:::S","qty":7}}"#).unwrap();
    let list = shape::normalize::<Legs, OneLeg>(r#"{"label":"x","legs":[{"key":"A:::S","qty":7}]}"#).unwrap();
    assert_eq!(single.items.as_slice(), list.items.as_slice());
}

#[test]
fn test_server_order_preserved() {
    let raw = r#"{"label":"x","legs":[{"key":"C:::S"},{"key":"A:::S"},{"key":"B:::S"}]}"#;
    let keys: Vec<String> = shape::normalize::<Legs, OneLeg>(raw)
        .unwrap()
        .items
        .into_iter()
        .map(|l| l.key)
        .collect();
    assert_eq!(keys, ["C:::S", "A:::S", "B:::S"]);
}

#[rstest]
#[case(r#"{"label":"x","legs":[{"key":"A"#)]
#[case(r#"{"label":"x","legs":"A:::S"}"#)]
#[case("not json")]
fn test_unrecognized(#[case] raw: &str) {
    let err = shape::normalize::<Legs, OneLeg>(raw).unwrap_err();
    let ShapeError::Unrecognized { strict, fallback } = err;
    assert!(!strict.is_empty());
    assert!(!fallback.is_empty());
}

#[test]
fn test_parse_shape_exposes_document() {
    match shape::parse_shape::<Legs, OneLeg>(r#"{"label":"y","legs":{"key":"Z:::S"}}"#).unwrap() {
        ParsedShape::Fallback(doc) => assert_eq!(doc.legs.key, "Z:::S"),
        ParsedShape::Strict(_) => panic!("bare object must take the fallback path"),
    }
}

#[test]
fn test_positions_single_object() {
    let raw = r#"{"EZMessage":{"action":"account.positions","data":{"timeStamp":"1","unified":
        {"securityKey":"SPY:20120120:1300000:C","qty":"-3","multiplier":"100"}}}}"#;
    let positions = AccountPositions::from_json(raw).unwrap();
    assert_eq!(positions.parse_path(), ParsePath::Fallback);
    assert_eq!(positions.len(), 1);

    let position = positions.find("spy:20120120:1300000:c").unwrap();
    assert_eq!(position.quantity, -3);
    assert_eq!(position.multiplier, 100.0);
    assert_eq!(position.key().underlying(), "SPY");
}
