#![no_main]

//! Decode pipeline fuzzer.
//!
//! Feeds arbitrary words through both the scalar and batch decode paths
//! and checks that they never panic, never disagree, and keep the output
//! columns in lockstep.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skiff::{decode_one, DecodedBatch, FieldBatch};

/// Structured input: a word batch plus a base PC to stress the
/// alignment check.
#[derive(Arbitrary, Debug)]
struct DecodeInput {
    base: u32,
    words: [u32; 8],
}

fuzz_target!(|input: DecodeInput| {
    let fields = match FieldBatch::extract(input.base, &input.words) {
        Ok(fields) => fields,
        Err(_) => {
            // Only a misaligned base may fail
            assert!(input.base % 4 != 0);
            return;
        }
    };

    let mut batch = DecodedBatch::new();
    batch.push_batch(&fields);

    assert_eq!(batch.locs().len(), batch.ops().len());
    assert_eq!(batch.ops().len(), batch.regs().len());
    assert_eq!(batch.regs().len(), batch.imms().len());

    // The batch path accepts exactly what the scalar path accepts
    let mut k = 0;
    for (i, &word) in input.words.iter().enumerate() {
        if let Ok(inst) = decode_one(word) {
            let (loc, op, regs, imm) = batch.get(k).unwrap();
            assert_eq!(loc, input.base.wrapping_add((i as u32) * 4));
            assert_eq!((op, regs, imm), (inst.op, inst.regs, inst.imm));
            // Disassembly must render for anything accepted
            let _ = inst.to_string();
            k += 1;
        }
    }
    assert_eq!(batch.len(), k);
});
