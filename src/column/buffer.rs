//! # Growable Slot Buffer
//!
//! `Column<'a>` owns one contiguous array of slots obtained from a bound
//! `SlotAllocator` (or the heap). It tracks a logical length and a reserved
//! capacity with `len <= capacity` at all times.
//!
//! ## Lifecycle
//!
//! ```text
//! new()/with_allocator()      reserve/resize            drop
//!   len 0, capacity 0   ---->  len S <= capacity C  ---->  array freed once
//!   (no allocation)            C only ever grows
//! ```
//!
//! ## Automatic Growth
//!
//! When `resize` needs more than the current capacity, the new capacity is
//! derived from the bit width of the required length:
//!
//! ```text
//! shift = max(bit_width(required) - 2, MIN_GROWTH_SHIFT)
//! new   = max(capacity + (1 << shift), required)
//! ```
//!
//! The step is between a quarter and a half of the required length, and
//! never less than `MIN_GROWTH_SLOTS`, so appending one slot at a time costs
//! O(log N) reallocations.
//!
//! ## Reallocation
//!
//! A new array is allocated first, the live `len` slots are copied, then the
//! old array is released. If allocation fails the column is left untouched.
//! Slots between `len` and the capacity are uninitialized; `resize` writes
//! every slot it exposes.

use std::alloc::Layout;
use std::ptr::NonNull;

use eyre::{bail, Result};

use super::ColumnError;
use crate::config::{MIN_GROWTH_SHIFT, SLOT_ALIGN, SLOT_SIZE};
use crate::memory::{HeapAllocator, SlotAllocator};
use crate::types::{ColumnType, Slot};

/// Single typed-by-the-caller column of 8-byte slots.
pub struct Column<'a> {
    allocator: Option<&'a dyn SlotAllocator>,
    pub(super) data: NonNull<Slot>,
    pub(super) len: usize,
    reserved: usize,
}

impl<'a> Column<'a> {
    /// Empty column on the global heap. Allocates nothing.
    pub const fn new() -> Self {
        Self {
            allocator: None,
            data: NonNull::dangling(),
            len: 0,
            reserved: 0,
        }
    }

    /// Empty column whose slot array will come from `allocator`.
    pub const fn with_allocator(allocator: &'a dyn SlotAllocator) -> Self {
        Self {
            allocator: Some(allocator),
            data: NonNull::dangling(),
            len: 0,
            reserved: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.reserved
    }

    /// True once a slot array has been allocated.
    pub fn is_allocated(&self) -> bool {
        self.reserved > 0
    }

    pub fn allocator(&self) -> Option<&'a dyn SlotAllocator> {
        self.allocator
    }

    /// Ensures capacity for at least `count` slots. Never shrinks.
    pub fn reserve(&mut self, count: usize) -> Result<()> {
        self.reallocate(count)
    }

    /// Sets the length to `count`, filling new slots with the null pointer.
    pub fn resize(&mut self, count: usize) -> Result<()> {
        self.resize_fill(count, Slot::null_value())
    }

    /// Sets the length to `count`, filling new slots with the null of `ty`.
    pub fn resize_null(&mut self, count: usize, ty: ColumnType) -> Result<()> {
        self.resize_fill(count, Slot::null_of(ty))
    }

    /// Sets the length to `count`.
    ///
    /// Growing writes `fill` into every newly exposed slot and leaves the
    /// existing ones untouched. Shrinking only lowers the length; capacity
    /// and the stored slots beyond the new length are kept.
    pub fn resize_fill(&mut self, count: usize, fill: Slot) -> Result<()> {
        if count > self.len {
            self.auto_reserve(count)?;
            for pos in self.len..count {
                // SAFETY: auto_reserve guarantees capacity >= count.
                unsafe { self.data.as_ptr().add(pos).write(fill) };
            }
        }
        self.len = count;
        Ok(())
    }

    /// Capacity chosen by automatic growth for `required` slots.
    pub fn grown_capacity(reserved: usize, required: usize) -> usize {
        if required <= reserved {
            return reserved;
        }
        let width = usize::BITS - required.leading_zeros();
        let shift = width.saturating_sub(2).max(MIN_GROWTH_SHIFT);
        reserved.saturating_add(1usize << shift).max(required)
    }

    fn auto_reserve(&mut self, required: usize) -> Result<()> {
        if required > self.reserved {
            self.reallocate(Self::grown_capacity(self.reserved, required))?;
        }
        Ok(())
    }

    fn reallocate(&mut self, count: usize) -> Result<()> {
        if count <= self.reserved {
            return Ok(());
        }

        let new_data = self.alloc(count)?;
        if self.reserved > 0 {
            // SAFETY: both arrays hold at least `len` slots and are distinct
            // allocations; the old one came from alloc(self.reserved).
            unsafe {
                std::ptr::copy_nonoverlapping(self.data.as_ptr(), new_data.as_ptr(), self.len);
                self.dealloc(self.data, self.reserved);
            }
        }

        tracing::trace!(
            old_capacity = self.reserved,
            new_capacity = count,
            len = self.len,
            "column slot array reallocated"
        );

        self.data = new_data;
        self.reserved = count;
        Ok(())
    }

    fn layout_for(count: usize) -> Result<Layout> {
        match Layout::array::<Slot>(count) {
            Ok(layout) => Ok(layout),
            Err(_) => bail!(ColumnError::CapacityOverflow { requested: count }),
        }
    }

    fn alloc(&self, count: usize) -> Result<NonNull<Slot>> {
        debug_assert!(count > 0);
        let layout = Self::layout_for(count)?;
        let ptr = match self.allocator {
            Some(allocator) => allocator.allocate(layout),
            None => HeapAllocator.allocate(layout),
        };
        let ptr = match ptr {
            Ok(ptr) => ptr,
            Err(err) => {
                tracing::debug!(slots = count, bytes = layout.size(), "slot array allocation failed");
                return Err(err);
            }
        };
        debug_assert_eq!(
            ptr.as_ptr() as usize % SLOT_ALIGN,
            0,
            "allocator returned a block below slot alignment"
        );
        Ok(ptr.cast())
    }

    /// # Safety
    ///
    /// `ptr` must be the array returned by `alloc(count)` on this column.
    unsafe fn dealloc(&self, ptr: NonNull<Slot>, count: usize) {
        debug_assert!(count > 0);
        // SAFETY: alloc(count) succeeded with this exact layout.
        let layout = unsafe { Layout::from_size_align_unchecked(count * SLOT_SIZE, SLOT_ALIGN) };
        // SAFETY: forwarded to the caller.
        unsafe {
            match self.allocator {
                Some(allocator) => allocator.deallocate(ptr.cast(), layout),
                None => HeapAllocator.deallocate(ptr.cast(), layout),
            }
        }
    }
}

impl Default for Column<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Column<'_> {
    fn drop(&mut self) {
        if self.reserved > 0 {
            // SAFETY: data is the live array of `reserved` slots.
            unsafe { self.dealloc(self.data, self.reserved) };
            self.reserved = 0;
            self.len = 0;
        }
    }
}
