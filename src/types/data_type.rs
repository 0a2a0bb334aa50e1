//! # Column Type Tag
//!
//! A column stores no per-element type. The reading of every slot is chosen
//! by a `ColumnType` that the owner of the column tracks once and supplies
//! identically on every decode.
//!
//! ## Discriminant Values
//!
//! | Tag | Value | Slot reading |
//! |-----|-------|--------------|
//! | `Text` | 0 | inline bytes or out-of-line pointer |
//! | `Int` | 1 | `i64`, `i64::MIN` is null |
//! | `Float` | 2 | `f64`, `f64::MIN` is null |
//!
//! Tags arriving as raw bytes (for example from an external descriptor) go
//! through `ColumnType::try_from(u8)`, which rejects anything outside the
//! three defined kinds instead of guessing a reading.

use crate::column::ColumnError;
use eyre::{bail, Report, Result};

/// Type tag selecting one of the three slot readings.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text = 0,
    Int = 1,
    Float = 2,
}

impl ColumnType {
    pub const ALL: [ColumnType; 3] = [ColumnType::Text, ColumnType::Int, ColumnType::Float];

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
        }
    }

    pub fn discriminant(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for ColumnType {
    type Error = Report;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ColumnType::Text),
            1 => Ok(ColumnType::Int),
            2 => Ok(ColumnType::Float),
            other => bail!(ColumnError::UnknownType(other)),
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compile-time selection of a slot reading.
///
/// Lets callers write `column.value_as::<IntReading>(pos)` when the tag is
/// fixed at the call site.
pub trait Reading {
    const TYPE: ColumnType;
}

#[derive(Debug, Clone, Copy)]
pub struct TextReading;

#[derive(Debug, Clone, Copy)]
pub struct IntReading;

#[derive(Debug, Clone, Copy)]
pub struct FloatReading;

impl Reading for TextReading {
    const TYPE: ColumnType = ColumnType::Text;
}

impl Reading for IntReading {
    const TYPE: ColumnType = ColumnType::Int;
}

impl Reading for FloatReading {
    const TYPE: ColumnType = ColumnType::Float;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_round_trip() {
        for ty in ColumnType::ALL {
            assert_eq!(ColumnType::try_from(ty.discriminant()).unwrap(), ty);
        }
    }

    #[test]
    fn test_unknown_discriminant_rejected() {
        let err = ColumnType::try_from(3).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ColumnError>(),
            Some(ColumnError::UnknownType(3))
        ));
    }

    #[test]
    fn test_reading_markers() {
        assert_eq!(TextReading::TYPE, ColumnType::Text);
        assert_eq!(IntReading::TYPE, ColumnType::Int);
        assert_eq!(FloatReading::TYPE, ColumnType::Float);
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(ColumnType::Float.to_string(), "float");
    }
}
