//! # Slot Allocators
//!
//! A column obtains its slot array from a `SlotAllocator` bound at
//! construction, or from the global heap when none is bound.
//!
//! ## Contract
//!
//! - `allocate` is only called with a nonzero size and an alignment of at
//!   least `SLOT_ALIGN`. The returned block must honor that alignment: the
//!   inline-text encoding relies on the low bits of pointers being clear.
//! - `deallocate` receives exactly the pointer and layout of an earlier
//!   `allocate` on the same allocator, once.
//! - A refused request is reported as an error. A column never stores a
//!   null or dangling pointer from a failed allocation.
//!
//! ## Implementations
//!
//! | Allocator | Backing | `deallocate` |
//! |-----------|---------|--------------|
//! | `HeapAllocator` | `std::alloc` | frees |
//! | `ArenaAllocator` | `bumpalo::Bump` | no-op, freed on reset/drop |
//! | `SharedArenaAllocator` | `Mutex<Bump>` | no-op, `Sync` |
//! | `BudgetedAllocator<A>` | any `A` | releases budget, forwards |

use std::alloc::Layout;
use std::ptr::NonNull;

use bumpalo::Bump;
use eyre::{bail, Result};
use parking_lot::Mutex;

use super::MemoryBudget;
use crate::column::ColumnError;

/// Allocation interface used by columns for their slot arrays.
pub trait SlotAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>>;

    /// Returns a block to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this allocator with the
    /// same `layout`, and must not have been deallocated already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<T: SlotAllocator + ?Sized> SlotAllocator for &T {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded to the caller.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

fn allocation_failed(layout: Layout) -> ColumnError {
    ColumnError::AllocationFailed {
        bytes: layout.size(),
        align: layout.align(),
    }
}

/// The global heap. Used by columns that have no allocator bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl SlotAllocator for HeapAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        debug_assert!(layout.size() > 0, "zero-sized slot allocation");
        // SAFETY: the column never requests a zero-sized layout.
        let ptr = unsafe { std::alloc::alloc(layout) };
        match NonNull::new(ptr) {
            Some(ptr) => Ok(ptr),
            None => bail!(allocation_failed(layout)),
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the caller guarantees ptr/layout came from allocate above.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

/// Bump arena allocator.
///
/// Individual deallocations are ignored; the whole arena is reclaimed on
/// `reset` or drop. Columns borrow the arena, so it cannot be reset while
/// any of them is alive.
#[derive(Debug, Default)]
pub struct ArenaAllocator {
    bump: Bump,
}

impl ArenaAllocator {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Creates an arena that refuses to grow beyond `limit` bytes of chunks.
    pub fn with_limit(limit: usize) -> Self {
        let bump = Bump::new();
        bump.set_allocation_limit(Some(limit));
        Self { bump }
    }

    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl SlotAllocator for ArenaAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        match self.bump.try_alloc_layout(layout) {
            Ok(ptr) => Ok(ptr),
            Err(_) => bail!(allocation_failed(layout)),
        }
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}

/// Bump arena behind a mutex, usable from several threads.
///
/// Columns stay single-threaded; this only lets columns owned by different
/// threads draw from one arena.
#[derive(Debug, Default)]
pub struct SharedArenaAllocator {
    bump: Mutex<Bump>,
}

impl SharedArenaAllocator {
    pub fn new() -> Self {
        Self {
            bump: Mutex::new(Bump::new()),
        }
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Mutex::new(Bump::with_capacity(bytes)),
        }
    }

    pub fn allocated_bytes(&self) -> usize {
        self.bump.lock().allocated_bytes()
    }

    pub fn reset(&mut self) {
        self.bump.get_mut().reset();
    }
}

impl SlotAllocator for SharedArenaAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        // Bump chunks never move, so the block outlives the guard.
        let result = self.bump.lock().try_alloc_layout(layout);
        match result {
            Ok(ptr) => Ok(ptr),
            Err(_) => bail!(allocation_failed(layout)),
        }
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}

/// Charges every block against a `MemoryBudget` before delegating.
#[derive(Debug)]
pub struct BudgetedAllocator<'b, A> {
    inner: A,
    budget: &'b MemoryBudget,
}

impl<'b, A: SlotAllocator> BudgetedAllocator<'b, A> {
    pub fn new(inner: A, budget: &'b MemoryBudget) -> Self {
        Self { inner, budget }
    }

    pub fn budget(&self) -> &'b MemoryBudget {
        self.budget
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: SlotAllocator> SlotAllocator for BudgetedAllocator<'_, A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        if let Err(err) = self.budget.allocate(layout.size()) {
            tracing::debug!(bytes = layout.size(), "slot allocation refused by budget");
            return Err(err);
        }

        match self.inner.allocate(layout) {
            Ok(ptr) => Ok(ptr),
            Err(err) => {
                self.budget.release(layout.size());
                Err(err)
            }
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded to the caller.
        unsafe { self.inner.deallocate(ptr, layout) };
        self.budget.release(layout.size());
    }
}
