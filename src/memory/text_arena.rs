//! # Out-of-line Text Arena
//!
//! Text longer than the inline capacity lives outside the column. A
//! `TextArena` owns those bytes; slots only point at them. Every string is
//! laid out as:
//!
//! ```text
//! base (TEXT_ALIGN)          data (TEXT_ALIGN)
//! |<--- TEXT_HEADER_SIZE --->|<------- len bytes ------->|
//! [ pad ][ len: usize native ][ b0 b1 b2 ...             ]
//! ```
//!
//! The slot stores `data`. Because `data` is aligned the inline-length bits
//! of the stored pointer are zero, and the length word sits directly in
//! front of it.
//!
//! Strings are never freed individually; the arena releases everything on
//! `reset` (which needs `&mut`, so no descriptor can still borrow it) or drop.

use std::alloc::Layout;
use std::ptr::NonNull;

use bumpalo::Bump;
use eyre::{bail, Result};

use crate::column::ColumnError;
use crate::config::{INLINE_TEXT_CAPACITY, TEXT_ALIGN, TEXT_HEADER_SIZE, TEXT_LEN_PREFIX};
use crate::types::Slot;

#[derive(Debug, Default)]
pub struct TextArena {
    bump: Bump,
}

impl TextArena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Copies `text` into the arena behind its length word.
    ///
    /// Returns a pointer to the first text byte, aligned to [`TEXT_ALIGN`],
    /// valid until the arena is reset or dropped.
    pub fn alloc_text(&self, text: &[u8]) -> Result<NonNull<u8>> {
        let size = match TEXT_HEADER_SIZE.checked_add(text.len()) {
            Some(size) => size,
            None => bail!(ColumnError::TextTooLong { len: text.len() }),
        };
        let layout = match Layout::from_size_align(size, TEXT_ALIGN) {
            Ok(layout) => layout,
            Err(_) => bail!(ColumnError::TextTooLong { len: text.len() }),
        };
        let base = match self.bump.try_alloc_layout(layout) {
            Ok(base) => base,
            Err(_) => bail!(ColumnError::AllocationFailed {
                bytes: layout.size(),
                align: layout.align(),
            }),
        };

        // SAFETY: base points at `size` writable bytes, so data and the
        // TEXT_LEN_PREFIX bytes before it are in bounds; text cannot overlap
        // a block that was just allocated.
        let data = unsafe {
            let data = base.as_ptr().add(TEXT_HEADER_SIZE);
            data.sub(TEXT_LEN_PREFIX)
                .cast::<usize>()
                .write_unaligned(text.len());
            std::ptr::copy_nonoverlapping(text.as_ptr(), data, text.len());
            NonNull::new_unchecked(data)
        };

        tracing::trace!(len = text.len(), "laid out out-of-line text");
        Ok(data)
    }

    /// Encodes `text` as a text slot.
    ///
    /// Empty text encodes to null, text up to [`INLINE_TEXT_CAPACITY`] bytes
    /// is inlined, anything longer is copied into the arena.
    ///
    /// The returned slot carries no lifetime: decoding it is only valid while
    /// this arena is alive and has not been reset.
    pub fn encode(&self, text: &[u8]) -> Result<Slot> {
        if text.is_empty() {
            return Ok(Slot::null_value());
        }
        if text.len() <= INLINE_TEXT_CAPACITY {
            return Ok(Slot::try_from_bytes(text));
        }

        let data = self.alloc_text(text)?;
        // SAFETY: alloc_text returns an aligned pointer preceded by its length.
        Ok(unsafe { Slot::from_text_ptr(data.as_ptr()) })
    }

    pub fn encode_str(&self, text: &str) -> Result<Slot> {
        self.encode(text.as_bytes())
    }

    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    pub fn reset(&mut self) {
        self.bump.reset();
    }
}
