//! Errors reported by columns and descriptors.
//!
//! Public operations return `eyre::Result` and raise these with `bail!`, so
//! callers that need to branch on the failure use
//! `report.downcast_ref::<ColumnError>()`.

use crate::types::ColumnType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    /// Checked access at `pos` on a column holding `len` slots.
    OutOfRange { pos: usize, len: usize },
    /// The bound allocator (or the heap) refused the request.
    AllocationFailed { bytes: usize, align: usize },
    /// `requested` slots do not fit in a single allocation.
    CapacityOverflow { requested: usize },
    /// A raw type tag outside the defined kinds.
    UnknownType(u8),
    /// A typed write or read against a column of another type.
    TypeMismatch {
        expected: ColumnType,
        actual: ColumnType,
    },
    /// Text that needs out-of-line storage was given no place to live.
    TextTooLong { len: usize },
}

impl std::fmt::Display for ColumnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnError::OutOfRange { pos, len } => {
                write!(f, "position {} out of range for column of length {}", pos, len)
            }
            ColumnError::AllocationFailed { bytes, align } => {
                write!(f, "allocation of {} bytes (align {}) failed", bytes, align)
            }
            ColumnError::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {} slots requested", requested)
            }
            ColumnError::UnknownType(tag) => write!(f, "unknown column type tag {}", tag),
            ColumnError::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: column is {} but {} was used", expected, actual)
            }
            ColumnError::TextTooLong { len } => {
                write!(f, "text of {} bytes does not fit inline", len)
            }
        }
    }
}

impl std::error::Error for ColumnError {}
