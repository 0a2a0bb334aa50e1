//! Fuzz testing for column growth and the slot codec.
//!
//! This fuzz target drives a column through arbitrary sequences of
//! reserve/resize/write/read operations and checks the buffer invariants
//! after every step. Text is only ever written through `TextArena` or the
//! inline encoder, so every decode it performs is valid.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use warthog_table::{ArenaAllocator, Column, ColumnType, ColumnValue, Slot, TextArena};

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Reserve(u16),
    Resize(u16),
    WriteInt(u16, Option<i64>),
    WriteFloat(u16, Option<f64>),
    WriteText(u16, Vec<u8>),
    Read(u16),
}

#[derive(Debug, Arbitrary)]
struct ColumnInput {
    use_arena: bool,
    ops: Vec<FuzzOp>,
}

fn run(column: &mut Column<'_>, ops: Vec<FuzzOp>, texts: &TextArena) {
    // Shadow copy of the expected reading per position.
    let mut tags: Vec<ColumnType> = Vec::new();
    let mut capacity = column.capacity();

    for op in ops.into_iter().take(256) {
        match op {
            FuzzOp::Reserve(n) => {
                column.reserve(n as usize).unwrap();
            }
            FuzzOp::Resize(n) => {
                let n = n as usize;
                column.resize(n).unwrap();
                tags.resize(n, ColumnType::Text);
            }
            FuzzOp::WriteInt(pos, v) => {
                let ok = column.set(pos as usize, Slot::from_int(v)).is_ok();
                assert_eq!(ok, (pos as usize) < column.len());
                if ok {
                    tags[pos as usize] = ColumnType::Int;
                }
            }
            FuzzOp::WriteFloat(pos, v) => {
                let ok = column.set(pos as usize, Slot::from_float(v)).is_ok();
                if ok {
                    tags[pos as usize] = ColumnType::Float;
                }
            }
            FuzzOp::WriteText(pos, bytes) => {
                let slot = texts.encode(&bytes).unwrap();
                if column.set(pos as usize, slot).is_ok() {
                    tags[pos as usize] = ColumnType::Text;
                    let decoded = unsafe { column.value(pos as usize, ColumnType::Text).unwrap() };
                    match decoded {
                        ColumnValue::Null => assert!(bytes.is_empty()),
                        ColumnValue::Text(t) => assert_eq!(t, &bytes[..]),
                        other => panic!("text decoded as {:?}", other),
                    }
                }
            }
            FuzzOp::Read(pos) => {
                let pos = pos as usize;
                match tags.get(pos) {
                    Some(ty) => {
                        let _ = unsafe { column.value(pos, *ty).unwrap() };
                    }
                    None => assert!(column.at(pos).is_err()),
                }
            }
        }

        assert!(column.len() <= column.capacity());
        assert!(column.capacity() >= capacity);
        assert_eq!(column.len(), tags.len());
        capacity = column.capacity();
    }
}

fuzz_target!(|input: ColumnInput| {
    let texts = TextArena::new();
    if input.use_arena {
        let arena = ArenaAllocator::new();
        let mut column = Column::with_allocator(&arena);
        run(&mut column, input.ops, &texts);
    } else {
        let mut column = Column::new();
        run(&mut column, input.ops, &texts);
    }
});
