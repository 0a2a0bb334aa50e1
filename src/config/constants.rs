//! # Slot Layout and Growth Constants
//!
//! This module centralizes the constants that define the 8-byte slot layout,
//! the null sentinels, and the automatic growth policy. Several of them are
//! load-bearing for each other and are tied together by compile-time
//! assertions.
//!
//! ## Dependency Graph
//!
//! ```text
//! SLOT_ALIGN (8 bytes)
//!       │
//!       ├─> INLINE_LEN_BITS (3, must be <= log2(SLOT_ALIGN))
//!       │     An 8-byte aligned pointer has its low 3 bits clear. The inline
//!       │     length lives in exactly those bits, so a nonzero value there
//!       │     can only mean "inline text".
//!       │
//!       ├─> TEXT_ALIGN (equal, out-of-line bytes start on a slot boundary)
//!       │
//!       └─> INLINE_TEXT_CAPACITY (6, must be < 1 << INLINE_LEN_BITS)
//!             One length byte + six text bytes + one trailing zero byte
//!             fill the slot exactly.
//!
//! MIN_GROWTH_SHIFT (3)
//!       │
//!       └─> smallest automatic growth step is 1 << 3 = 8 slots
//! ```
//!
//! ## Byte Positions
//!
//! The inline length byte is the least significant byte of the slot's
//! integer reading, which is where the tag bits of a pointer live:
//!
//! ```text
//! little-endian: [len][t0][t1][t2][t3][t4][t5][0]
//! big-endian:    [t0][t1][t2][t3][t4][t5][0][len]
//! ```

// ============================================================================
// SLOT LAYOUT
// ============================================================================

/// Size of one slot in bytes.
pub const SLOT_SIZE: usize = 8;

/// Alignment of one slot in bytes. Allocators must honor at least this.
pub const SLOT_ALIGN: usize = 8;

// ============================================================================
// INLINE TEXT ENCODING
// ============================================================================

/// Longest text stored directly inside a slot.
pub const INLINE_TEXT_CAPACITY: usize = 6;

/// Number of low bits used for the inline length.
pub const INLINE_LEN_BITS: u32 = 3;

/// Mask selecting the inline length bits from the length byte.
pub const INLINE_LEN_MASK: u8 = (1 << INLINE_LEN_BITS) - 1;

/// Index of the inline length byte within the slot bytes.
#[cfg(target_endian = "little")]
pub const INLINE_LEN_BYTE: usize = 0;
#[cfg(target_endian = "big")]
pub const INLINE_LEN_BYTE: usize = SLOT_SIZE - 1;

/// Index of the first inline text byte within the slot bytes.
#[cfg(target_endian = "little")]
pub const INLINE_TEXT_OFFSET: usize = 1;
#[cfg(target_endian = "big")]
pub const INLINE_TEXT_OFFSET: usize = 0;

const _: () = assert!(
    INLINE_TEXT_CAPACITY < (1 << INLINE_LEN_BITS),
    "inline length must fit in INLINE_LEN_BITS"
);

const _: () = assert!(
    (1 << INLINE_LEN_BITS) <= SLOT_ALIGN,
    "inline length bits must be clear in every SLOT_ALIGN-aligned pointer"
);

const _: () = assert!(
    INLINE_TEXT_CAPACITY + 2 <= SLOT_SIZE,
    "inline text needs a length byte and a trailing zero byte"
);

// ============================================================================
// NULL SENTINELS
// ============================================================================

/// Integer reading reserved to mean null.
pub const INT_NULL: i64 = i64::MIN;

/// Float reading reserved to mean null (most negative finite value).
pub const FLOAT_NULL: f64 = f64::MIN;

// ============================================================================
// OUT-OF-LINE TEXT
// ============================================================================

/// Size of the length word stored immediately before out-of-line text bytes.
pub const TEXT_LEN_PREFIX: usize = std::mem::size_of::<usize>();

/// Alignment of the first byte of out-of-line text.
pub const TEXT_ALIGN: usize = SLOT_ALIGN;

/// Bytes reserved in front of out-of-line text so that the text itself
/// still starts on a `TEXT_ALIGN` boundary.
pub const TEXT_HEADER_SIZE: usize = TEXT_ALIGN;

const _: () = assert!(
    TEXT_LEN_PREFIX <= TEXT_HEADER_SIZE,
    "length word must fit in the out-of-line header"
);

// ============================================================================
// GROWTH POLICY
// ============================================================================

/// Smallest shift applied by automatic growth (step of 8 slots).
pub const MIN_GROWTH_SHIFT: u32 = 3;

/// Smallest number of slots added by one automatic growth.
pub const MIN_GROWTH_SLOTS: usize = 1 << MIN_GROWTH_SHIFT;

// ============================================================================
// MEMORY BUDGET CONFIGURATION
// ============================================================================

/// Default memory budget as percentage of system RAM.
pub const DEFAULT_BUDGET_PERCENT: usize = 25;

/// Minimum memory budget floor in bytes (64KB).
pub const MIN_BUDGET_FLOOR: usize = 64 * 1024;

const _: () = assert!(
    MIN_BUDGET_FLOOR % SLOT_SIZE == 0,
    "budget floor must be a whole number of slots"
);
