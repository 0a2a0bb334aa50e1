//! # Slot Codec
//!
//! A `Slot` is the fixed 8-byte storage unit of a column. It has three
//! readings and carries no tag of its own; the reading is chosen by the
//! `ColumnType` the column owner supplies.
//!
//! ## Readings
//!
//! ```text
//! Int:   [ i64 native-endian ]               i64::MIN => null
//! Float: [ f64 native-endian ]               f64::MIN => null
//! Text:  inline      [len:1..=6][bytes..][0]  (little-endian layout)
//!        out-of-line [ *const u8, 8-aligned ] null pointer => null
//! ```
//!
//! ## Inline vs Out-of-line
//!
//! The inline length occupies the low `INLINE_LEN_BITS` bits of the slot's
//! least significant byte. Out-of-line pointers are required to be
//! [`TEXT_ALIGN`]-aligned, so those bits are always zero for them and always
//! nonzero for inline text. Decoding only looks at those bits to pick a path.
//!
//! Out-of-line text is laid out by its owner (see `memory::TextArena`) as a
//! native `usize` byte length immediately followed by the bytes; the slot
//! points at the first byte. The column never owns or frees that memory.
//!
//! ## Null Sentinels
//!
//! `i64::MIN` and `f64::MIN` are not representable as data: `from_int` and
//! `from_float` accept them but they decode as null.

use super::{ColumnType, ColumnValue};
use crate::config::{
    FLOAT_NULL, INLINE_LEN_BYTE, INLINE_LEN_MASK, INLINE_TEXT_CAPACITY, INLINE_TEXT_OFFSET,
    INT_NULL, SLOT_SIZE, TEXT_ALIGN, TEXT_LEN_PREFIX,
};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// One 8-byte column cell.
#[repr(C, align(8))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct Slot {
    bytes: [u8; SLOT_SIZE],
}

const _: () = assert!(std::mem::size_of::<Slot>() == SLOT_SIZE);
const _: () = assert!(std::mem::align_of::<Slot>() == crate::config::SLOT_ALIGN);

impl Slot {
    /// All-zero slot: the null pointer under the text reading.
    pub const NULL: Slot = Slot {
        bytes: [0; SLOT_SIZE],
    };

    pub const fn null_value() -> Slot {
        Self::NULL
    }

    /// The null of a specific reading.
    ///
    /// `null_value()` is only null under the text reading (it reads as `0`
    /// and `0.0` otherwise); fills for numeric columns should use this.
    pub const fn null_of(ty: ColumnType) -> Slot {
        match ty {
            ColumnType::Text => Self::NULL,
            ColumnType::Int => Self::from_int(None),
            ColumnType::Float => Self::from_float(None),
        }
    }

    pub const fn from_bits(bits: u64) -> Slot {
        Slot {
            bytes: bits.to_ne_bytes(),
        }
    }

    pub const fn to_bits(&self) -> u64 {
        u64::from_ne_bytes(self.bytes)
    }

    pub const fn from_int(value: Option<i64>) -> Slot {
        let raw = match value {
            Some(v) => v,
            None => INT_NULL,
        };
        Slot {
            bytes: raw.to_ne_bytes(),
        }
    }

    pub const fn from_float(value: Option<f64>) -> Slot {
        let raw = match value {
            Some(v) => v,
            None => FLOAT_NULL,
        };
        Slot {
            bytes: raw.to_ne_bytes(),
        }
    }

    /// Encodes `text` inline if it fits, otherwise returns the null slot.
    ///
    /// Text of length 0 or longer than [`INLINE_TEXT_CAPACITY`] maps to null;
    /// longer text must be stored out-of-line by the caller.
    pub fn try_from_bytes(text: &[u8]) -> Slot {
        let len = text.len();
        if len == 0 || len > INLINE_TEXT_CAPACITY {
            return Self::NULL;
        }

        let mut bytes = [0u8; SLOT_SIZE];
        bytes[INLINE_LEN_BYTE] = len as u8;
        bytes[INLINE_TEXT_OFFSET..INLINE_TEXT_OFFSET + len].copy_from_slice(text);
        debug_assert_eq!(bytes[INLINE_TEXT_OFFSET + len], 0);
        Slot { bytes }
    }

    pub fn try_from_str(text: &str) -> Slot {
        Self::try_from_bytes(text.as_bytes())
    }

    /// Builds an out-of-line text slot from a raw pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point at bytes that start on a [`TEXT_ALIGN`]
    /// boundary and are preceded by a native `usize` holding their length.
    /// The slot does not keep that memory alive; see [`Slot::text`].
    pub unsafe fn from_text_ptr(ptr: *const u8) -> Slot {
        debug_assert_eq!(
            ptr.addr() & (TEXT_ALIGN - 1),
            0,
            "out-of-line text must be {}-byte aligned",
            TEXT_ALIGN
        );
        Slot::from_bits(ptr.expose_provenance() as u64)
    }

    pub fn as_int_bits(&self) -> i64 {
        i64::from_ne_bytes(self.bytes)
    }

    pub fn as_float_bits(&self) -> f64 {
        f64::from_ne_bytes(self.bytes)
    }

    pub fn is_int_null(&self) -> bool {
        self.as_int_bits() == INT_NULL
    }

    pub fn is_float_null(&self) -> bool {
        self.as_float_bits() == FLOAT_NULL
    }

    /// True for the null pointer. Inline text is never all zero.
    pub fn is_text_null(&self) -> bool {
        self.to_bits() == 0
    }

    pub fn is_null(&self, ty: ColumnType) -> bool {
        match ty {
            ColumnType::Text => self.is_text_null(),
            ColumnType::Int => self.is_int_null(),
            ColumnType::Float => self.is_float_null(),
        }
    }

    pub fn int(&self) -> Option<i64> {
        (!self.is_int_null()).then(|| self.as_int_bits())
    }

    pub fn float(&self) -> Option<f64> {
        (!self.is_float_null()).then(|| self.as_float_bits())
    }

    /// Length of inline text, `None` when the slot holds a pointer.
    pub fn inline_len(&self) -> Option<usize> {
        let tag = self.bytes[INLINE_LEN_BYTE] & INLINE_LEN_MASK;
        if tag == 0 {
            return None;
        }
        Some(tag as usize)
    }

    pub fn is_inline_text(&self) -> bool {
        self.inline_len().is_some()
    }

    /// The inline text bytes, `None` when the slot holds a pointer.
    pub fn inline_text(&self) -> Option<&[u8]> {
        let len = self.inline_len()?;
        Some(&self.bytes[INLINE_TEXT_OFFSET..INLINE_TEXT_OFFSET + len])
    }

    /// The out-of-line pointer, `None` for inline text.
    pub fn text_ptr(&self) -> Option<*const u8> {
        if self.is_inline_text() {
            return None;
        }
        Some(std::ptr::with_exposed_provenance(self.to_bits() as usize))
    }

    /// Text reading of the slot. Null reads as an empty view.
    ///
    /// # Safety
    ///
    /// If the slot is not inline text it must be null or have been built by
    /// [`Slot::from_text_ptr`], and the memory behind that pointer must still
    /// be live and unmodified.
    pub unsafe fn text(&self) -> &[u8] {
        if let Some(inline) = self.inline_text() {
            debug_assert!(
                inline.len() <= INLINE_TEXT_CAPACITY
                    && self.bytes[INLINE_LEN_BYTE] & !INLINE_LEN_MASK == 0,
                "malformed inline text length"
            );
            return inline;
        }
        if self.is_text_null() {
            return &[];
        }

        let ptr: *const u8 = std::ptr::with_exposed_provenance(self.to_bits() as usize);
        // SAFETY: the caller guarantees ptr came from from_text_ptr and is live,
        // so a usize length sits directly in front of `len` readable bytes.
        unsafe {
            let len = ptr.sub(TEXT_LEN_PREFIX).cast::<usize>().read_unaligned();
            std::slice::from_raw_parts(ptr, len)
        }
    }

    /// Decodes the slot under `ty`.
    ///
    /// # Safety
    ///
    /// Integer and float readings are always safe. For `ColumnType::Text` the
    /// requirements of [`Slot::text`] apply.
    pub unsafe fn decode(&self, ty: ColumnType) -> ColumnValue<'_> {
        match ty {
            ColumnType::Text if self.is_text_null() => ColumnValue::Null,
            // SAFETY: forwarded to the caller.
            ColumnType::Text => ColumnValue::Text(unsafe { self.text() }),
            ColumnType::Int => self.int().map_or(ColumnValue::Null, ColumnValue::Int),
            ColumnType::Float => self.float().map_or(ColumnValue::Null, ColumnValue::Float),
        }
    }

    /// Decodes an integer or float reading, or inline text.
    ///
    /// Returns `None` only for an out-of-line text pointer, which needs the
    /// unsafe [`Slot::decode`].
    pub fn decode_inline(&self, ty: ColumnType) -> Option<ColumnValue<'_>> {
        match ty {
            ColumnType::Text if self.is_text_null() => Some(ColumnValue::Null),
            ColumnType::Text => self.inline_text().map(ColumnValue::Text),
            // SAFETY: numeric readings never dereference.
            _ => Some(unsafe { self.decode(ty) }),
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::NULL
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({:#018x})", self.to_bits())
    }
}
