//! # Column Access
//!
//! Accessors over the live `len` slots of a column, and the composition of
//! checked access with the slot codec.
//!
//! | Accessor | Out of range |
//! |----------|--------------|
//! | `at`, `at_mut`, `set`, `value`, `int`, `float`, `text` | `ColumnError::OutOfRange` |
//! | `get`, `get_mut` | `None` |
//! | `[]`, `front`, `back` | panic (programming error) |
//! | `get_unchecked` | undefined behavior |
//!
//! `data()` and `as_bytes()` expose the raw live region for bulk consumers.
//! Those consumers must apply the column's type tag before interpreting
//! text slots, exactly like `value` does.

use std::ops::{Index, IndexMut};

use eyre::{bail, Result};
use zerocopy::IntoBytes;

use super::{Column, ColumnError};
use crate::types::{ColumnType, ColumnValue, Reading, Slot};

impl<'a> Column<'a> {
    pub fn as_slice(&self) -> &[Slot] {
        // SAFETY: the first `len` slots are initialized; data is dangling but
        // aligned when len == 0.
        unsafe { std::slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [Slot] {
        // SAFETY: see as_slice; &mut self gives exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    /// Raw bytes of the live slots, `len * 8` long, in native byte order.
    pub fn as_bytes(&self) -> &[u8] {
        self.as_slice().as_bytes()
    }

    /// Start of the live slot region.
    pub fn data(&self) -> *const Slot {
        self.data.as_ptr()
    }

    pub fn data_mut(&mut self) -> *mut Slot {
        self.data.as_ptr()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.as_slice().iter()
    }

    pub fn get(&self, pos: usize) -> Option<&Slot> {
        self.as_slice().get(pos)
    }

    pub fn get_mut(&mut self, pos: usize) -> Option<&mut Slot> {
        self.as_mut_slice().get_mut(pos)
    }

    /// # Safety
    ///
    /// `pos` must be less than `len()`.
    pub unsafe fn get_unchecked(&self, pos: usize) -> &Slot {
        debug_assert!(pos < self.len, "unchecked access out of range");
        // SAFETY: forwarded to the caller.
        unsafe { &*self.data.as_ptr().add(pos) }
    }

    /// Checked read of the slot at `pos`.
    pub fn at(&self, pos: usize) -> Result<Slot> {
        match self.get(pos) {
            Some(slot) => Ok(*slot),
            None => bail!(ColumnError::OutOfRange { pos, len: self.len }),
        }
    }

    pub fn at_mut(&mut self, pos: usize) -> Result<&mut Slot> {
        let len = self.len;
        match self.get_mut(pos) {
            Some(slot) => Ok(slot),
            None => bail!(ColumnError::OutOfRange { pos, len }),
        }
    }

    /// Checked write of `slot` at `pos`.
    pub fn set(&mut self, pos: usize, slot: Slot) -> Result<()> {
        *self.at_mut(pos)? = slot;
        Ok(())
    }

    pub fn front(&self) -> &Slot {
        assert!(!self.is_empty(), "front() on an empty column");
        &self.as_slice()[0]
    }

    pub fn front_mut(&mut self) -> &mut Slot {
        assert!(!self.is_empty(), "front_mut() on an empty column");
        &mut self.as_mut_slice()[0]
    }

    pub fn back(&self) -> &Slot {
        assert!(!self.is_empty(), "back() on an empty column");
        &self.as_slice()[self.len - 1]
    }

    pub fn back_mut(&mut self) -> &mut Slot {
        assert!(!self.is_empty(), "back_mut() on an empty column");
        let last = self.len - 1;
        &mut self.as_mut_slice()[last]
    }

    /// Checked access decoded under `ty`.
    ///
    /// # Safety
    ///
    /// When `ty` is `ColumnType::Text`, every out-of-line slot in the column
    /// must point at memory that is still live (see [`Slot::text`]).
    pub unsafe fn value(&self, pos: usize, ty: ColumnType) -> Result<ColumnValue<'_>> {
        let slot = self.get(pos);
        match slot {
            // SAFETY: forwarded to the caller.
            Some(slot) => Ok(unsafe { slot.decode(ty) }),
            None => bail!(ColumnError::OutOfRange { pos, len: self.len }),
        }
    }

    /// [`Column::value`] with the reading fixed at compile time.
    ///
    /// # Safety
    ///
    /// Same as [`Column::value`] with `R::TYPE`.
    pub unsafe fn value_as<R: Reading>(&self, pos: usize) -> Result<ColumnValue<'_>> {
        // SAFETY: forwarded to the caller.
        unsafe { self.value(pos, R::TYPE) }
    }

    /// Integer reading at `pos`, `None` for the null sentinel.
    pub fn int(&self, pos: usize) -> Result<Option<i64>> {
        Ok(self.at(pos)?.int())
    }

    /// Float reading at `pos`, `None` for the null sentinel.
    pub fn float(&self, pos: usize) -> Result<Option<f64>> {
        Ok(self.at(pos)?.float())
    }

    /// Text reading at `pos`, `None` for null.
    ///
    /// # Safety
    ///
    /// Same as [`Column::value`] with `ColumnType::Text`.
    pub unsafe fn text(&self, pos: usize) -> Result<Option<&[u8]>> {
        // SAFETY: forwarded to the caller.
        match unsafe { self.value(pos, ColumnType::Text)? } {
            ColumnValue::Text(bytes) => Ok(Some(bytes)),
            _ => Ok(None),
        }
    }
}

impl Index<usize> for Column<'_> {
    type Output = Slot;

    fn index(&self, pos: usize) -> &Slot {
        &self.as_slice()[pos]
    }
}

impl IndexMut<usize> for Column<'_> {
    fn index_mut(&mut self, pos: usize) -> &mut Slot {
        &mut self.as_mut_slice()[pos]
    }
}

impl<'c> IntoIterator for &'c Column<'_> {
    type Item = &'c Slot;
    type IntoIter = std::slice::Iter<'c, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for Column<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("bound_allocator", &self.allocator().is_some())
            .finish()
    }
}
