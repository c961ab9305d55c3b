//! JSON bridge: round trips, the end-to-end document, limits and deep trees

use pretty_assertions::assert_eq;
use rvariant::json::release;
use rvariant::{JsonError, Variant, VariantKind, VariantLimits, json};
use serde_json::Value;

#[test]
fn round_trip_set() {
    let cases = [
        Variant::empty(),
        Variant::from(true),
        Variant::from(-42),
        Variant::from("abc"),
        Variant::from(vec![Variant::from(true), Variant::from(1)]),
        [("a", Variant::from(1)), ("b", Variant::from("x"))]
            .into_iter()
            .collect(),
    ];
    for value in cases {
        assert_eq!(Variant::from_json(&value.to_json()), value);
    }
}

#[test]
fn end_to_end_document() {
    let doc = json!({"name": "Ann", "age": 30, "tags": ["x", "y"]});
    let person = Variant::from_json(&doc);

    let fields = person.as_mapping().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields["name"], Variant::from("Ann"));
    assert_eq!(fields["age"], Variant::from(30i64));
    assert_eq!(
        fields["tags"],
        Variant::from(vec![Variant::from("x"), Variant::from("y")])
    );
    assert_eq!(fields["age"].as_i32().unwrap(), 30);

    let back = person.to_json();
    assert_eq!(back, doc);
    assert_eq!(back.as_object().map(serde_json::Map::len), Some(3));
}

#[test]
fn unsigned_only_when_above_signed_range() {
    let big = Variant::from_json(&json!(u64::MAX));
    assert_eq!(big.kind(), VariantKind::Unsigned);
    assert_eq!(big.as_u64().unwrap(), u64::MAX);

    let edge = Variant::from_json(&json!(i64::MAX as u64));
    assert_eq!(edge.kind(), VariantKind::Signed);

    let float = Variant::from_json(&json!(1e20));
    assert_eq!(float.kind(), VariantKind::Floating);
}

#[test]
fn conversions_through_from() {
    let doc = json!([1, "two", null]);
    let value = Variant::from(doc.clone());
    assert_eq!(Value::from(&value), doc);
    assert_eq!(Value::from(value), doc);
}

#[test]
fn limits_reject_oversized_documents() {
    let limits = VariantLimits::strict();
    let wide = Value::Array((0..10_001).map(Value::from).collect());
    let err = Variant::from_json_with_limits(&wide, &limits).unwrap_err();
    assert_eq!(err.limit, "max_sequence_length");
    assert_eq!(err.actual, 10_001);

    let ok = json!({"a": {"b": [1, 2, 3]}});
    assert_eq!(
        Variant::from_json_with_limits(&ok, &limits).unwrap(),
        Variant::from_json(&ok)
    );

    let deep = (0..33).fold(json!(0), |inner, _| json!([inner]));
    let err = Variant::from_json_with_limits(&deep, &limits).unwrap_err();
    assert_eq!(err.limit, "max_nesting_depth");
    assert_eq!(err.actual, 33);
}

#[test]
fn parse_with_limits() {
    let limits = VariantLimits {
        max_mapping_entries: 1,
        ..VariantLimits::default()
    };
    let err = Variant::parse_json_with_limits(r#"{"a": 1, "b": 2}"#, &limits).unwrap_err();
    assert!(matches!(err, JsonError::Limit(ref e) if e.limit == "max_mapping_entries"));

    let value = Variant::parse_json_with_limits(r#"{"a": [1, 2]}"#, &limits).unwrap();
    assert_eq!(value.as_mapping().unwrap()["a"].as_sequence().unwrap().len(), 2);
}

#[test]
fn deep_tree_round_trip() {
    const DEPTH: usize = 100_000;

    let mut doc = json!("leaf");
    for _ in 0..DEPTH {
        doc = Value::Array(vec![doc]);
    }

    let value = Variant::from_json(&doc);
    release(doc);

    let limits = VariantLimits {
        max_nesting_depth: DEPTH - 1,
        ..VariantLimits::unlimited()
    };
    assert_eq!(value.check_limits(&limits).unwrap_err().actual, DEPTH);

    let back = value.to_json();
    let again = Variant::from_json(&back);
    release(back);

    assert_eq!(again, value);
    assert_eq!(value.to_json_string().len(), 2 * DEPTH + 6);
}

#[test]
fn deep_mapping_round_trip() {
    let mut value = Variant::from(1);
    for level in 0..50_000 {
        value = [(format!("level{level}"), value)].into_iter().collect();
    }

    let doc = value.to_json();
    let back = Variant::from_json(&doc);
    release(doc);

    assert_eq!(back, value);
}
