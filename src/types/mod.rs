//! # Slot Type System
//!
//! This module provides the value codec: the 8-byte `Slot`, the `ColumnType`
//! tag that selects its reading, and the `ColumnValue<'a>` a slot decodes to.
//!
//! ## Module Structure
//!
//! - `data_type`: `ColumnType` tag and the `Reading` markers
//! - `slot`: `Slot` with null sentinels and inline/out-of-line text
//! - `value`: Decoded `ColumnValue<'a>`
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `ColumnType` | Reading selector supplied by the column owner |
//! | `Slot` | Packed 8-byte cell |
//! | `ColumnValue<'a>` | Null / Int / Float / Text view |
//!
//! ## Usage
//!
//! ```ignore
//! use warthog_table::types::{ColumnType, ColumnValue, Slot};
//!
//! let slot = Slot::from_int(Some(42));
//! assert_eq!(slot.decode_inline(ColumnType::Int), Some(ColumnValue::Int(42)));
//!
//! let text = Slot::try_from_str("hello");
//! assert_eq!(text.inline_text(), Some(&b"hello"[..]));
//! ```

mod data_type;
mod slot;
mod value;

pub use data_type::{ColumnType, FloatReading, IntReading, Reading, TextReading};
pub use slot::Slot;
pub use value::ColumnValue;
