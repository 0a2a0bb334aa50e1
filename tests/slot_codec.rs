//! # Slot Codec Integration Tests
//!
//! Round-trip and null-sentinel behavior of the 8-byte slot codec through
//! the public API.
//!
//! ## Test Coverage
//!
//! 1. Integer reading: every value except `i64::MIN` round-trips
//! 2. Float reading: every finite value except `f64::MIN` round-trips
//! 3. Inline text: lengths 1..=6 round-trip, 0 and >6 map to null
//! 4. Out-of-line text through `TextArena`

use proptest::prelude::*;
use warthog_table::config::INLINE_TEXT_CAPACITY;
use warthog_table::{ColumnType, ColumnValue, Slot, TextArena};

proptest! {
    #[test]
    fn int_round_trip(value in any::<i64>().prop_filter("sentinel", |v| *v != i64::MIN)) {
        let slot = Slot::from_int(Some(value));
        prop_assert_eq!(slot.decode_inline(ColumnType::Int), Some(ColumnValue::Int(value)));
    }

    #[test]
    fn float_round_trip(
        value in any::<f64>().prop_filter("finite non-sentinel", |v| v.is_finite() && *v != f64::MIN)
    ) {
        let slot = Slot::from_float(Some(value));
        prop_assert_eq!(slot.decode_inline(ColumnType::Float), Some(ColumnValue::Float(value)));
    }

    #[test]
    fn short_text_round_trip(text in "[a-zA-Z0-9 ]{1,6}") {
        let slot = Slot::try_from_str(&text);
        prop_assert!(slot.is_inline_text());
        prop_assert_eq!(
            slot.decode_inline(ColumnType::Text),
            Some(ColumnValue::Text(text.as_bytes()))
        );
    }

    #[test]
    fn long_text_is_null(text in "[a-z]{7,64}") {
        prop_assert!(Slot::try_from_str(&text).is_text_null());
    }

    #[test]
    fn arena_text_round_trip(text in ".{0,200}") {
        let arena = TextArena::new();
        let slot = arena.encode_str(&text).unwrap();
        let decoded = unsafe { slot.decode(ColumnType::Text) };
        if text.is_empty() {
            prop_assert_eq!(decoded, ColumnValue::Null);
        } else {
            prop_assert_eq!(decoded.as_str(), Some(text.as_str()));
        }
    }
}

#[test]
fn test_missing_numbers_decode_null() {
    assert_eq!(
        Slot::from_int(None).decode_inline(ColumnType::Int),
        Some(ColumnValue::Null)
    );
    assert_eq!(
        Slot::from_float(None).decode_inline(ColumnType::Float),
        Some(ColumnValue::Null)
    );
}

#[test]
fn test_sentinels_are_not_representable() {
    assert!(Slot::from_int(Some(i64::MIN)).is_int_null());
    assert!(Slot::from_float(Some(f64::MIN)).is_float_null());
}

#[test]
fn test_empty_text_is_null() {
    let slot = Slot::try_from_str("");
    assert_eq!(slot, Slot::null_value());
    assert_eq!(slot.decode_inline(ColumnType::Text), Some(ColumnValue::Null));
}

#[test]
fn test_hello_and_too_long() {
    let hello = Slot::try_from_str("hello");
    assert_eq!(
        hello.decode_inline(ColumnType::Text).and_then(|v| v.as_str()),
        Some("hello")
    );

    let long = Slot::try_from_str("toolongtext");
    assert!(long.is_text_null());

    let arena = TextArena::new();
    let stored = arena.encode_str("toolongtext").unwrap();
    assert_eq!(unsafe { stored.text() }, b"toolongtext");
}

#[test]
fn test_inline_text_keeps_trailing_zero() {
    use zerocopy::IntoBytes;

    for len in 1..=INLINE_TEXT_CAPACITY {
        let text = "x".repeat(len);
        let slot = Slot::try_from_str(&text);
        assert!(slot.as_bytes().contains(&0), "len {} lost its zero byte", len);
    }
}

#[test]
fn test_raw_tag_validation() {
    for tag in 0u8..=2 {
        assert!(ColumnType::try_from(tag).is_ok());
    }
    for tag in 3u8..=255 {
        assert!(ColumnType::try_from(tag).is_err());
    }
}
