//! # Memory Management
//!
//! This module supplies the memory a column runs on: the allocator seam for
//! slot arrays, optional hard-limit accounting, and the owner of out-of-line
//! text bytes.
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------+        +---------------------------+
//! | Column<'a>              |        | TextArena                 |
//! |  slot array  ---------------+    |  [len][bytes] [len][bytes]|
//! +-------------------------+   |    +-------------^-------------+
//!                               |                  |
//!           allocate/deallocate |                  | slot pointers
//!                               v                  | (never owned)
//! +-------------------------------------------+    |
//! | SlotAllocator                             |    |
//! |  HeapAllocator | ArenaAllocator           |  Slot (8 bytes)
//! |  SharedArenaAllocator | BudgetedAllocator |
//! +---------------------+---------------------+
//!                       |
//!                       v
//!               MemoryBudget (optional hard limit)
//! ```
//!
//! ## Ownership
//!
//! - A column frees its slot array exactly once, through the allocator it
//!   was created with (or the heap when unbound).
//! - Allocators are borrowed for `'a`; they must outlive every column that
//!   uses them, which the borrow checker enforces.
//! - Out-of-line text is owned by a `TextArena`, never by a column.
//!
//! ## Configuration
//!
//! ```rust,ignore
//! // Hard limit shared by several columns
//! let budget = MemoryBudget::with_limit(1024 * 1024);
//! let alloc = BudgetedAllocator::new(HeapAllocator, &budget);
//! let mut column = Column::with_allocator(&alloc);
//!
//! // Arena-backed column
//! let arena = ArenaAllocator::new();
//! let mut column = Column::with_allocator(&arena);
//! ```

mod allocator;
mod budget;
mod text_arena;

pub use allocator::{
    ArenaAllocator, BudgetedAllocator, HeapAllocator, SharedArenaAllocator, SlotAllocator,
};
pub use budget::{BudgetStats, MemoryBudget, MemoryError};
pub use text_arena::TextArena;
