#![no_main]

//! Memory access fuzzer.
//!
//! Applies arbitrary load/store sequences to a small region and checks
//! that bounds faults never panic and that accepted stores read back.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skiff::Dram;

/// A fuzzer-generated memory operation.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum MemOp {
    LoadU8 { addr: u32 },
    LoadU16 { addr: u32 },
    LoadU32 { addr: u32 },
    LoadU64 { addr: u32 },
    LoadU128 { addr: u32 },
    StoreU8 { addr: u32, value: u8 },
    StoreU16 { addr: u32, value: u16 },
    StoreU32 { addr: u32, value: u32 },
    StoreU64 { addr: u32, value: u64 },
    StoreU128 { addr: u32, value: u128 },
    Fetch { addr: u32 },
}

/// Structured input: region shape plus an operation sequence.
#[derive(Arbitrary, Debug)]
struct MemInput {
    size: u16,
    base: u32,
    ops: Vec<MemOp>,
}

fuzz_target!(|input: MemInput| {
    let mut mem = Dram::with_base(u32::from(input.size), input.base);

    for op in input.ops.iter().take(64).copied() {
        match op {
            MemOp::LoadU8 { addr } => {
                let _ = mem.load_u8(addr);
            }
            MemOp::LoadU16 { addr } => {
                let _ = mem.load_u16(addr);
            }
            MemOp::LoadU32 { addr } => {
                let _ = mem.load_u32(addr);
            }
            MemOp::LoadU64 { addr } => {
                let _ = mem.load_u64(addr);
            }
            MemOp::LoadU128 { addr } => {
                let _ = mem.load_u128(addr);
            }
            MemOp::StoreU8 { addr, value } => {
                if mem.store_u8(addr, value).is_ok() {
                    assert_eq!(mem.load_u8(addr).unwrap(), value);
                }
            }
            MemOp::StoreU16 { addr, value } => {
                if mem.store_u16(addr, value).is_ok() {
                    assert_eq!(mem.load_u16(addr).unwrap(), value);
                }
            }
            MemOp::StoreU32 { addr, value } => {
                if mem.store_u32(addr, value).is_ok() {
                    assert_eq!(mem.load_u32(addr).unwrap(), value);
                }
            }
            MemOp::StoreU64 { addr, value } => {
                if mem.store_u64(addr, value).is_ok() {
                    assert_eq!(mem.load_u64(addr).unwrap(), value);
                }
            }
            MemOp::StoreU128 { addr, value } => {
                if mem.store_u128(addr, value).is_ok() {
                    assert_eq!(mem.load_u128(addr).unwrap(), value);
                }
            }
            MemOp::Fetch { addr } => {
                let _ = mem.fetch_word(addr);
            }
        }
    }
});
