//! # warthog-table - Slot Columns for Columnar Tables
//!
//! warthog-table is the storage primitive underneath a columnar table: a
//! single, homogeneously typed, append-friendly column of fixed 8-byte
//! slots. This implementation prioritizes:
//!
//! - **Uniform cells**: integers, floats and text all fit one 8-byte slot
//! - **No per-element tags**: the type is tracked once per column
//! - **Pluggable memory**: heap, bump arenas, or budget-limited allocators
//!
//! ## Quick Start
//!
//! ```ignore
//! use warthog_table::{Column, ColumnType, ColumnValue, Slot};
//!
//! let mut column = Column::new();
//! column.reserve(10)?;
//! column.resize(5)?;
//! column.set(2, Slot::from_int(Some(42)))?;
//! assert_eq!(column.int(2)?, Some(42));
//!
//! let hello = Slot::try_from_str("hello");
//! assert_eq!(hello.decode_inline(ColumnType::Text), Some(ColumnValue::Text(b"hello")));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   ColumnDescriptor (name, type tag)  │
//! ├─────────────────────────────────────┤
//! │   Column Façade (at, [], front/back) │
//! ├─────────────────────────────────────┤
//! │ Growable Buffer (reserve / resize)   │
//! ├───────────────────┬─────────────────┤
//! │   Slot Codec      │  SlotAllocator  │
//! │ (null / inline)   │ (heap / arena)  │
//! └───────────────────┴─────────────────┘
//! ```
//!
//! ## Slot Layout
//!
//! ```text
//! Int   : i64, i64::MIN is null
//! Float : f64, f64::MIN is null
//! Text  : [len 1..=6][up to 6 bytes][0]      inline
//!         8-aligned pointer, usize len before out-of-line
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: `Slot` codec, `ColumnType`, `ColumnValue`
//! - [`column`]: `Column` buffer and accessors
//! - [`memory`]: allocators, memory budget, text arena
//! - [`table`]: `ColumnDescriptor`
//! - [`config`]: layout and growth constants

pub mod column;
pub mod config;
pub mod memory;
pub mod table;
pub mod types;

pub use column::{Column, ColumnError};
pub use memory::{
    ArenaAllocator, BudgetedAllocator, HeapAllocator, MemoryBudget, MemoryError, SlotAllocator,
    TextArena,
};
pub use table::ColumnDescriptor;
pub use types::{ColumnType, ColumnValue, Slot};
