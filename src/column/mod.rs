//! # Column Storage
//!
//! `Column<'a>` is a contiguous, growable array of 8-byte slots with no
//! per-element type. The owner supplies the `ColumnType` on every decode.
//!
//! ## Module Structure
//!
//! - `buffer`: capacity management, automatic growth, allocator delegation
//! - `access`: checked/unchecked indexing, raw export, codec-aware reads
//! - `error`: `ColumnError`
//!
//! ## Usage
//!
//! ```ignore
//! use warthog_table::column::Column;
//! use warthog_table::types::{ColumnType, Slot};
//!
//! let mut column = Column::new();
//! column.reserve(10)?;
//! column.resize(5)?;
//! column.set(2, Slot::from_int(Some(42)))?;
//! assert_eq!(column.int(2)?, Some(42));
//! ```
//!
//! ## Concurrency
//!
//! A column is neither `Send` nor `Sync`. Callers that need shared access
//! wrap it in their own synchronization.

mod access;
mod buffer;
mod error;

pub use buffer::Column;
pub use error::ColumnError;
