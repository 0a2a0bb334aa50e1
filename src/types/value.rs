//! # Decoded Column Values
//!
//! `ColumnValue<'a>` is what a slot turns into once a type tag has been
//! applied to it. Text is a borrowed byte view: over the slot itself for
//! inline text, over externally owned memory for out-of-line text.
//!
//! ## Value Variants
//!
//! | Variant | Rust Type | Produced by |
//! |---------|-----------|-------------|
//! | Null | - | sentinel, null pointer, or empty text |
//! | Int | i64 | integer reading |
//! | Float | f64 | float reading |
//! | Text | &[u8] | inline or out-of-line text reading |
//!
//! Text bytes are not validated. `as_str` performs the UTF-8 check for
//! callers that need it.

use super::{ColumnType, Slot};

/// Tagged logical value decoded from one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnValue<'a> {
    Null,
    Int(i64),
    Float(f64),
    Text(&'a [u8]),
}

impl<'a> ColumnValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ColumnValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ColumnValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            ColumnValue::Text(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the text as `&str` when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// The column type this value would be stored under, `None` for null.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            ColumnValue::Null => None,
            ColumnValue::Int(_) => Some(ColumnType::Int),
            ColumnValue::Float(_) => Some(ColumnType::Float),
            ColumnValue::Text(_) => Some(ColumnType::Text),
        }
    }

    /// Packs this value back into a slot under `ty`.
    ///
    /// Returns `None` when the value cannot be represented inline: text
    /// longer than the inline capacity, or a value whose variant does not
    /// match `ty`. Null packs to the reading-specific null of `ty`.
    pub fn try_encode(&self, ty: ColumnType) -> Option<Slot> {
        match (self, ty) {
            (ColumnValue::Null, ty) => Some(Slot::null_of(ty)),
            (ColumnValue::Int(v), ColumnType::Int) => Some(Slot::from_int(Some(*v))),
            (ColumnValue::Float(v), ColumnType::Float) => Some(Slot::from_float(Some(*v))),
            (ColumnValue::Text(bytes), ColumnType::Text) => {
                let slot = Slot::try_from_bytes(bytes);
                (!slot.is_text_null() || bytes.is_empty()).then_some(slot)
            }
            _ => None,
        }
    }
}

impl From<i64> for ColumnValue<'_> {
    fn from(value: i64) -> Self {
        ColumnValue::Int(value)
    }
}

impl From<f64> for ColumnValue<'_> {
    fn from(value: f64) -> Self {
        ColumnValue::Float(value)
    }
}

impl<'a> From<&'a str> for ColumnValue<'a> {
    fn from(value: &'a str) -> Self {
        ColumnValue::Text(value.as_bytes())
    }
}

impl std::fmt::Display for ColumnValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnValue::Null => f.write_str("NULL"),
            ColumnValue::Int(v) => write!(f, "{}", v),
            ColumnValue::Float(v) => write!(f, "{}", v),
            ColumnValue::Text(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(ColumnValue::Int(7).as_int(), Some(7));
        assert_eq!(ColumnValue::Int(7).as_float(), None);
        assert_eq!(ColumnValue::Float(1.5).as_float(), Some(1.5));
        assert_eq!(ColumnValue::from("abc").as_str(), Some("abc"));
        assert!(ColumnValue::Null.is_null());
    }

    #[test]
    fn test_as_str_rejects_invalid_utf8() {
        let value = ColumnValue::Text(&[0xff, 0xfe]);
        assert_eq!(value.as_bytes(), Some(&[0xff, 0xfe][..]));
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn test_try_encode_matches_type() {
        assert_eq!(
            ColumnValue::Int(5).try_encode(ColumnType::Int),
            Some(Slot::from_int(Some(5)))
        );
        assert_eq!(ColumnValue::Int(5).try_encode(ColumnType::Float), None);
        assert_eq!(
            ColumnValue::Null.try_encode(ColumnType::Float),
            Some(Slot::from_float(None))
        );
    }

    #[test]
    fn test_try_encode_long_text_refused() {
        assert!(ColumnValue::from("short").try_encode(ColumnType::Text).is_some());
        assert_eq!(ColumnValue::from("much too long").try_encode(ColumnType::Text), None);
        assert_eq!(
            ColumnValue::from("").try_encode(ColumnType::Text),
            Some(Slot::null_value())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ColumnValue::Null.to_string(), "NULL");
        assert_eq!(ColumnValue::Int(-3).to_string(), "-3");
        assert_eq!(ColumnValue::from("hi").to_string(), "hi");
    }
}
