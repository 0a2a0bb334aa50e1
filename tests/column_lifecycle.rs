//! # Column Lifecycle Integration Tests
//!
//! Capacity management, resize semantics and checked access of `Column`
//! through the public API.
//!
//! ## Test Coverage
//!
//! 1. `reserve` idempotence and monotonic capacity
//! 2. `resize` fill and shrink semantics
//! 3. `at` bounds, including the empty column
//! 4. Growth amortization (reallocation count)
//! 5. End-to-end integer and text scenarios

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use eyre::Result;
use warthog_table::{
    Column, ColumnError, ColumnType, ColumnValue, HeapAllocator, Slot, SlotAllocator, TextArena,
};

#[derive(Default)]
struct CountingAllocator {
    allocations: Cell<usize>,
    live: Cell<isize>,
}

impl SlotAllocator for CountingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        self.allocations.set(self.allocations.get() + 1);
        self.live.set(self.live.get() + 1);
        HeapAllocator.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - 1);
        unsafe { HeapAllocator.deallocate(ptr, layout) }
    }
}

#[test]
fn test_capacity_never_decreases() {
    let mut column = Column::new();
    let mut last = column.capacity();

    let steps: [(&str, usize); 8] = [
        ("reserve", 10),
        ("resize", 3),
        ("reserve", 2),
        ("resize", 40),
        ("resize", 0),
        ("reserve", 41),
        ("resize", 17),
        ("reserve", 0),
    ];
    for (op, n) in steps {
        match op {
            "reserve" => column.reserve(n).unwrap(),
            _ => column.resize(n).unwrap(),
        }
        assert!(column.capacity() >= last, "{} {} shrank capacity", op, n);
        assert!(column.len() <= column.capacity());
        last = column.capacity();
    }
}

#[test]
fn test_reserve_idempotent() {
    let mut column = Column::new();
    column.reserve(32).unwrap();
    let capacity = column.capacity();
    for n in [0, 1, 31, 32] {
        column.reserve(n).unwrap();
        assert_eq!(column.capacity(), capacity);
    }
}

#[test]
fn test_resize_preserves_prefix_and_fills_tail() {
    let mut column = Column::new();
    column.resize(3).unwrap();
    for pos in 0..3 {
        column[pos] = Slot::from_int(Some(pos as i64 * 10));
    }

    let fill = Slot::from_int(Some(-1));
    column.resize_fill(50, fill).unwrap();

    for pos in 0..3 {
        assert_eq!(column.int(pos).unwrap(), Some(pos as i64 * 10));
    }
    assert!(column.iter().skip(3).all(|slot| *slot == fill));
}

#[test]
fn test_resize_down_keeps_stored_contents() {
    let mut column = Column::new();
    column.resize_fill(10, Slot::from_int(Some(5))).unwrap();
    column.resize(4).unwrap();
    assert_eq!(column.len(), 4);
    assert!(column.at(4).is_err());

    let raw = unsafe { *column.data().add(9) };
    assert_eq!(raw, Slot::from_int(Some(5)));
}

#[test]
fn test_at_reports_out_of_range() {
    let empty = Column::new();
    let err = empty.at(0).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ColumnError>(),
        Some(&ColumnError::OutOfRange { pos: 0, len: 0 })
    );

    let mut column = Column::new();
    column.resize(5).unwrap();
    for pos in 0..5 {
        assert!(column.at(pos).is_ok());
    }
    for pos in [5, 6, 1000, usize::MAX] {
        assert!(column.at(pos).is_err());
    }
}

#[test]
fn test_growth_reallocations_are_logarithmic() {
    let counter = CountingAllocator::default();
    let n = 100_000usize;
    {
        let mut column = Column::with_allocator(&counter);
        for k in 0..n {
            column.resize(k + 1).unwrap();
        }
        assert_eq!(column.len(), n);
    }

    let reallocations = counter.allocations.get();
    let log2_n = usize::BITS - n.leading_zeros();
    assert!(
        reallocations <= 4 * log2_n as usize,
        "{} reallocations for {} single-slot growths",
        reallocations,
        n
    );
    assert_eq!(counter.live.get(), 0);
}

#[test]
fn test_integer_scenario() {
    let mut column = Column::new();
    column.reserve(10).unwrap();
    column.resize(5).unwrap();

    column[2] = Slot::from_int(Some(42));
    assert_eq!(
        unsafe { column.value(2, ColumnType::Int).unwrap() },
        ColumnValue::Int(42)
    );

    column[2] = Slot::from_int(None);
    assert_eq!(
        unsafe { column.value(2, ColumnType::Int).unwrap() },
        ColumnValue::Null
    );
    assert_eq!(column.capacity(), 10);
}

#[test]
fn test_text_scenario() {
    let arena = TextArena::new();
    let mut column = Column::new();
    column.resize(3).unwrap();

    column[0] = Slot::try_from_str("hello");
    column[1] = Slot::try_from_str("toolongtext");
    column[2] = arena.encode_str("toolongtext").unwrap();

    unsafe {
        assert_eq!(column.text(0).unwrap(), Some(&b"hello"[..]));
        assert_eq!(column.text(1).unwrap(), None);
        assert_eq!(column.text(2).unwrap(), Some(&b"toolongtext"[..]));
    }
}

#[test]
fn test_mixed_reading_supplied_by_caller() {
    let mut column = Column::new();
    column.resize(2).unwrap();
    column[0] = Slot::from_float(Some(3.5));
    column[1] = Slot::from_float(None);

    assert_eq!(column.float(0).unwrap(), Some(3.5));
    assert_eq!(column.float(1).unwrap(), None);
    assert_eq!(column.as_bytes().len(), 16);
}
