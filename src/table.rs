//! # Column Descriptors
//!
//! A `ColumnDescriptor<'a>` binds one `Column<'a>` to the metadata a table
//! keeps for it: a category, a name and the type tag. The tag is stored once
//! here and supplied to the codec on every access, which is what the column
//! itself cannot do.
//!
//! ## Text Safety
//!
//! Writes go through typed setters, so every slot of a descriptor is valid
//! for its tag. Out-of-line text is accepted only from a `TextArena`
//! borrowed for `'a`, which outlives the descriptor; decoding text through a
//! descriptor is therefore safe. Raw mutable access to the column bypasses
//! that and is `unsafe`.

use std::any::TypeId;

use eyre::{bail, Result};

use crate::column::{Column, ColumnError};
use crate::config::INLINE_TEXT_CAPACITY;
use crate::memory::{SlotAllocator, TextArena};
use crate::types::{ColumnType, ColumnValue, Slot};

pub struct ColumnDescriptor<'a> {
    category: TypeId,
    name: &'a str,
    column_type: ColumnType,
    data: Column<'a>,
}

impl<'a> ColumnDescriptor<'a> {
    /// Creates an empty heap-backed column of `column_type` in category `C`.
    pub fn new<C: 'static>(name: &'a str, column_type: ColumnType) -> Self {
        Self {
            category: TypeId::of::<C>(),
            name,
            column_type,
            data: Column::new(),
        }
    }

    pub fn with_allocator<C: 'static>(
        name: &'a str,
        column_type: ColumnType,
        allocator: &'a dyn SlotAllocator,
    ) -> Self {
        Self {
            category: TypeId::of::<C>(),
            name,
            column_type,
            data: Column::with_allocator(allocator),
        }
    }

    /// Creates a descriptor from a raw type tag, rejecting unknown tags.
    pub fn from_raw_type<C: 'static>(name: &'a str, tag: u8) -> Result<Self> {
        Ok(Self::new::<C>(name, ColumnType::try_from(tag)?))
    }

    pub fn category(&self) -> TypeId {
        self.category
    }

    pub fn is_category<C: 'static>(&self) -> bool {
        self.category == TypeId::of::<C>()
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn name_len(&self) -> usize {
        self.name.len()
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &Column<'a> {
        &self.data
    }

    /// Raw mutable access to the column.
    ///
    /// # Safety
    ///
    /// Every slot written must be valid for `column_type()`. For text that
    /// means null, inline, or a pointer into memory that outlives `'a`.
    pub unsafe fn data_mut(&mut self) -> &mut Column<'a> {
        &mut self.data
    }

    pub fn reserve(&mut self, count: usize) -> Result<()> {
        self.data.reserve(count)
    }

    /// Resizes the column, filling new rows with this column's null.
    pub fn resize(&mut self, count: usize) -> Result<()> {
        self.data.resize_null(count, self.column_type)
    }

    fn expect_type(&self, actual: ColumnType) -> Result<()> {
        if self.column_type != actual {
            bail!(ColumnError::TypeMismatch {
                expected: self.column_type,
                actual,
            });
        }
        Ok(())
    }

    pub fn set_null(&mut self, pos: usize) -> Result<()> {
        self.data.set(pos, Slot::null_of(self.column_type))
    }

    pub fn set_int(&mut self, pos: usize, value: Option<i64>) -> Result<()> {
        self.expect_type(ColumnType::Int)?;
        self.data.set(pos, Slot::from_int(value))
    }

    pub fn set_float(&mut self, pos: usize, value: Option<f64>) -> Result<()> {
        self.expect_type(ColumnType::Float)?;
        self.data.set(pos, Slot::from_float(value))
    }

    /// Stores text that fits inline. Empty text stores null.
    pub fn set_inline_text(&mut self, pos: usize, text: &[u8]) -> Result<()> {
        self.expect_type(ColumnType::Text)?;
        if text.len() > INLINE_TEXT_CAPACITY {
            bail!(ColumnError::TextTooLong { len: text.len() });
        }
        self.data.set(pos, Slot::try_from_bytes(text))
    }

    /// Stores text of any length, placing long text in `arena`.
    pub fn set_text(&mut self, pos: usize, text: &[u8], arena: &'a TextArena) -> Result<()> {
        self.expect_type(ColumnType::Text)?;
        // Check the position before spending arena space on it.
        self.data.at(pos)?;
        let slot = arena.encode(text)?;
        self.data.set(pos, slot)
    }

    /// Decoded value at `pos` under this column's type.
    pub fn value(&self, pos: usize) -> Result<ColumnValue<'_>> {
        // SAFETY: text slots are only written by the setters above, whose
        // out-of-line memory lives in a TextArena borrowed for 'a.
        unsafe { self.data.value(pos, self.column_type) }
    }

    pub fn int(&self, pos: usize) -> Result<Option<i64>> {
        self.expect_type(ColumnType::Int)?;
        self.data.int(pos)
    }

    pub fn float(&self, pos: usize) -> Result<Option<f64>> {
        self.expect_type(ColumnType::Float)?;
        self.data.float(pos)
    }

    pub fn text(&self, pos: usize) -> Result<Option<&[u8]>> {
        self.expect_type(ColumnType::Text)?;
        Ok(self.value(pos)?.as_bytes())
    }
}

impl std::fmt::Debug for ColumnDescriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("name", &self.name)
            .field("type", &self.column_type)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Users;
    struct Orders;

    #[test]
    fn test_descriptor_metadata() {
        let desc = ColumnDescriptor::new::<Users>("age", ColumnType::Int);
        assert_eq!(desc.name(), "age");
        assert_eq!(desc.name_len(), 3);
        assert_eq!(desc.column_type(), ColumnType::Int);
        assert!(desc.is_category::<Users>());
        assert!(!desc.is_category::<Orders>());
        assert!(desc.is_empty());
    }

    #[test]
    fn test_from_raw_type() {
        let desc = ColumnDescriptor::from_raw_type::<Users>("score", 2).unwrap();
        assert_eq!(desc.column_type(), ColumnType::Float);

        let err = ColumnDescriptor::from_raw_type::<Users>("bad", 7).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ColumnError>(),
            Some(&ColumnError::UnknownType(7))
        );
    }

    #[test]
    fn test_resize_fills_type_null() {
        let mut ints = ColumnDescriptor::new::<Users>("id", ColumnType::Int);
        ints.resize(4).unwrap();
        assert_eq!(ints.value(3).unwrap(), ColumnValue::Null);

        let mut floats = ColumnDescriptor::new::<Users>("w", ColumnType::Float);
        floats.resize(2).unwrap();
        assert_eq!(floats.float(1).unwrap(), None);
    }

    #[test]
    fn test_typed_setters_reject_mismatch() {
        let mut desc = ColumnDescriptor::new::<Users>("id", ColumnType::Int);
        desc.resize(1).unwrap();
        desc.set_int(0, Some(12)).unwrap();
        assert_eq!(desc.int(0).unwrap(), Some(12));

        let err = desc.set_float(0, Some(1.0)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ColumnError>(),
            Some(ColumnError::TypeMismatch {
                expected: ColumnType::Int,
                actual: ColumnType::Float
            })
        ));
        assert!(desc.text(0).is_err());
    }

    #[test]
    fn test_text_inline_and_arena() {
        let arena = TextArena::new();
        let mut desc = ColumnDescriptor::new::<Users>("name", ColumnType::Text);
        desc.resize(3).unwrap();

        desc.set_inline_text(0, b"bob").unwrap();
        desc.set_text(1, b"bartholomew", &arena).unwrap();

        assert_eq!(desc.text(0).unwrap(), Some(&b"bob"[..]));
        assert_eq!(desc.text(1).unwrap(), Some(&b"bartholomew"[..]));
        assert_eq!(desc.value(2).unwrap(), ColumnValue::Null);

        let err = desc.set_inline_text(2, b"bartholomew").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ColumnError>(),
            Some(&ColumnError::TextTooLong { len: 11 })
        );
    }

    #[test]
    fn test_set_text_out_of_range() {
        let arena = TextArena::new();
        let mut desc = ColumnDescriptor::new::<Users>("name", ColumnType::Text);
        assert!(desc.set_text(0, b"nowhere to go", &arena).is_err());
    }

    #[test]
    fn test_set_null() {
        let mut desc = ColumnDescriptor::new::<Orders>("total", ColumnType::Float);
        desc.resize(1).unwrap();
        desc.set_float(0, Some(9.5)).unwrap();
        desc.set_null(0).unwrap();
        assert_eq!(desc.value(0).unwrap(), ColumnValue::Null);
    }
}
