//! Accessor matrix: identity, empty behaviour, class and range checks

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvariant::{ErrorKind, Mapping, Variant, VariantError, VariantKind};

#[rstest]
#[case(300, Ok(300))]
#[case(-32_768, Ok(i16::MIN))]
#[case(32_767, Ok(i16::MAX))]
#[case(100_000, Err(VariantError::range_overflow("i16", "100000")))]
#[case(-32_769, Err(VariantError::range_overflow("i16", "-32769")))]
fn i16_range(#[case] stored: i64, #[case] expected: Result<i16, VariantError>) {
    assert_eq!(Variant::from(stored).as_i16(), expected);
}

#[rstest]
#[case(Variant::from(1u64 << 40), ErrorKind::RangeOverflow)]
#[case(Variant::from(-1), ErrorKind::TypeMismatch)]
#[case(Variant::from(1.0), ErrorKind::TypeMismatch)]
#[case(Variant::from(true), ErrorKind::TypeMismatch)]
#[case(Variant::from("1"), ErrorKind::TypeMismatch)]
#[case(Variant::empty(), ErrorKind::EmptyValue)]
fn u32_failures(#[case] stored: Variant, #[case] expected: ErrorKind) {
    assert_eq!(stored.as_u32().unwrap_err().kind(), expected);
}

#[rstest]
#[case::boolean(Variant::from(false), VariantKind::Boolean)]
#[case::signed(Variant::from(-1i8), VariantKind::Signed)]
#[case::unsigned(Variant::from(1u16), VariantKind::Unsigned)]
#[case::floating(Variant::from(1.0f32), VariantKind::Floating)]
#[case::text(Variant::from(String::from("t")), VariantKind::Text)]
#[case::sequence(Variant::sequence(Vec::new()), VariantKind::Sequence)]
#[case::mapping(Variant::mapping(Mapping::new()), VariantKind::Mapping)]
fn constructed_kind(#[case] value: Variant, #[case] kind: VariantKind) {
    assert_eq!(value.kind(), kind);
}

/// Error kinds from every strict accessor, in declaration order
fn strict_failures(value: &Variant) -> [Option<ErrorKind>; 16] {
    [
        value.as_bool().err(),
        value.as_i8().err(),
        value.as_i16().err(),
        value.as_i32().err(),
        value.as_i64().err(),
        value.as_isize().err(),
        value.as_u8().err(),
        value.as_u16().err(),
        value.as_u32().err(),
        value.as_u64().err(),
        value.as_usize().err(),
        value.as_f32().err(),
        value.as_f64().err(),
        value.as_str().err(),
        value.as_sequence().err(),
        value.as_mapping().err(),
    ]
    .map(|err| err.map(|e| e.kind()))
}

#[test]
fn empty_fails_every_strict_accessor() {
    assert_eq!(
        strict_failures(&Variant::default()),
        [Some(ErrorKind::EmptyValue); 16]
    );
}

#[test]
fn empty_returns_every_default_unchanged() {
    let empty = Variant::default();
    assert!(!empty.bool_or(false).unwrap());
    assert_eq!(empty.i8_or(-8).unwrap(), -8);
    assert_eq!(empty.i16_or(-16).unwrap(), -16);
    assert_eq!(empty.i32_or(-32).unwrap(), -32);
    assert_eq!(empty.i64_or(-64).unwrap(), -64);
    assert_eq!(empty.isize_or(-1).unwrap(), -1);
    assert_eq!(empty.u8_or(8).unwrap(), 8);
    assert_eq!(empty.u16_or(16).unwrap(), 16);
    assert_eq!(empty.u32_or(32).unwrap(), 32);
    assert_eq!(empty.u64_or(64).unwrap(), 64);
    assert_eq!(empty.usize_or(1).unwrap(), 1);
    assert_eq!(empty.f32_or(3.5).unwrap(), 3.5);
    assert_eq!(empty.f64_or(-0.5).unwrap(), -0.5);
    assert_eq!(empty.text_or("d").unwrap(), "d");

    let items = vec![Variant::from("x")];
    assert_eq!(empty.sequence_or(items.clone()).unwrap(), items);

    let mut entries = Mapping::new();
    entries.insert("k".into(), Variant::from(1));
    assert_eq!(empty.mapping_or(entries.clone()).unwrap(), entries);
}

#[test]
fn move_leaves_source_empty() {
    let mut source: Variant = [("k", Variant::from(vec![Variant::from(1)]))]
        .into_iter()
        .collect();
    let snapshot = source.clone();

    let target = source.take();

    assert_eq!(target, snapshot);
    assert!(source.is_empty());
    assert_eq!(strict_failures(&source), [Some(ErrorKind::EmptyValue); 16]);
}

#[test]
fn deep_copy_is_independent() {
    let original: Variant = [("inner", Variant::from(vec![Variant::from(1), Variant::from(2)]))]
        .into_iter()
        .collect();
    let mut copy = original.clone();

    copy.as_mapping_mut()
        .unwrap()
        .get_mut("inner")
        .unwrap()
        .as_sequence_mut()
        .unwrap()[0] = Variant::from("changed");

    assert_eq!(original.as_mapping().unwrap()["inner"].as_sequence().unwrap()[0], Variant::from(1));
    assert_ne!(original, copy);
}
