//! Property-based tests for the memory and decode pipeline.
//!
//! Immediate properties are checked against independently *encoded*
//! words: the test scatters a known immediate into the instruction
//! format and requires extraction to recover it exactly.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_sign_loss)] // Test code casts are intentional
#![allow(clippy::cast_possible_truncation)] // Test code casts are intentional

use proptest::prelude::*;

use skiff::{decode_one, DecodedBatch, Dram, FieldBatch, LaneFields, PackedRegs};

const BASE: u32 = Dram::DEFAULT_BASE;

// ==================== Instruction encoders ====================

fn encode_i(imm: i32, rs1: u8, funct3: u8, rd: u8, opcode: u8) -> u32 {
    ((imm as u32) << 20)
        | (u32::from(rs1) << 15)
        | (u32::from(funct3) << 12)
        | (u32::from(rd) << 7)
        | u32::from(opcode)
}

fn encode_s(imm: i32, rs2: u8, rs1: u8, funct3: u8) -> u32 {
    let imm = imm as u32;
    (((imm >> 5) & 0x7F) << 25)
        | (u32::from(rs2) << 20)
        | (u32::from(rs1) << 15)
        | (u32::from(funct3) << 12)
        | ((imm & 0x1F) << 7)
        | 0x23
}

fn encode_b(imm: i32, rs2: u8, rs1: u8, funct3: u8) -> u32 {
    let imm = imm as u32;
    (((imm >> 12) & 0x1) << 31)
        | (((imm >> 5) & 0x3F) << 25)
        | (u32::from(rs2) << 20)
        | (u32::from(rs1) << 15)
        | (u32::from(funct3) << 12)
        | (((imm >> 1) & 0xF) << 8)
        | (((imm >> 11) & 0x1) << 7)
        | 0x63
}

fn encode_j(imm: i32, rd: u8) -> u32 {
    let imm = imm as u32;
    (((imm >> 20) & 0x1) << 31)
        | (((imm >> 1) & 0x3FF) << 21)
        | (((imm >> 11) & 0x1) << 20)
        | (((imm >> 12) & 0xFF) << 12)
        | (u32::from(rd) << 7)
        | 0x6F
}

// ==================== Memory ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Every width round-trips at every in-range address.
    #[test]
    fn prop_memory_round_trip(offset in 0u32..=4080, v in any::<u128>()) {
        let mut mem = Dram::new(4096);
        let addr = BASE + offset;

        mem.store_u8(addr, v as u8).unwrap();
        prop_assert_eq!(mem.load_u8(addr).unwrap(), v as u8);

        mem.store_u16(addr, v as u16).unwrap();
        prop_assert_eq!(mem.load_u16(addr).unwrap(), v as u16);

        mem.store_u32(addr, v as u32).unwrap();
        prop_assert_eq!(mem.load_u32(addr).unwrap(), v as u32);

        mem.store_u64(addr, v as u64).unwrap();
        prop_assert_eq!(mem.load_u64(addr).unwrap(), v as u64);

        mem.store_u128(addr, v).unwrap();
        prop_assert_eq!(mem.load_u128(addr).unwrap(), v);
    }

    /// A failed store leaves every byte of the region as it was.
    #[test]
    fn prop_failed_store_leaves_buffer_unchanged(
        seed in any::<[u8; 16]>(),
        past_end in 0u32..64,
        below_base in 1u32..64,
        v in any::<u128>()
    ) {
        let mut mem = Dram::new(128);
        mem.store_bytes(BASE, &seed).unwrap();
        let before: Vec<u8> = mem.load_bytes(BASE, 128).unwrap().to_vec();

        // Straddling or beyond the end
        prop_assert!(mem.store_u128(BASE + 113 + past_end, v).is_err());
        prop_assert!(mem.store_u32(BASE + 125 + past_end, v as u32).is_err());
        // Below the base
        prop_assert!(mem.store_u8(BASE - below_base, v as u8).is_err());

        prop_assert_eq!(mem.load_bytes(BASE, 128).unwrap(), &before[..]);
    }
}

// ==================== Extraction ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4000))]

    /// Extraction is total over arbitrary words, and batch extraction
    /// agrees with scalar extraction lane for lane.
    #[test]
    fn prop_extraction_total_and_consistent(words in any::<[u32; 8]>()) {
        let batch = FieldBatch::extract(BASE, &words).unwrap();

        for (i, &word) in words.iter().enumerate() {
            let lane = batch.lane(i);
            prop_assert_eq!(lane, LaneFields::from_word(word));
            prop_assert!(lane.opcode < 128);
            prop_assert!(lane.rd < 32 && lane.rs1 < 32 && lane.rs2 < 32);
            prop_assert!(lane.funct3 < 8 && lane.funct7 < 128);
        }
    }

    /// I-type immediates round-trip through encoding, sign included.
    #[test]
    fn prop_imm_i_round_trip(imm in -2048i32..=2047, rs1 in 0u8..32, rd in 0u8..32) {
        let word = encode_i(imm, rs1, 0b000, rd, 0x13);
        prop_assert_eq!(LaneFields::from_word(word).imm_i, imm);
    }

    /// S-type immediates round-trip through encoding.
    #[test]
    fn prop_imm_s_round_trip(imm in -2048i32..=2047, rs1 in 0u8..32, rs2 in 0u8..32) {
        let word = encode_s(imm, rs2, rs1, 0b010);
        prop_assert_eq!(LaneFields::from_word(word).imm_s, imm);
    }

    /// B-type immediates round-trip through encoding (even, 13-bit).
    #[test]
    fn prop_imm_b_round_trip(half in -2048i32..2048, rs1 in 0u8..32, rs2 in 0u8..32) {
        let imm = half * 2;
        let word = encode_b(imm, rs2, rs1, 0b000);
        prop_assert_eq!(LaneFields::from_word(word).imm_b, imm);
    }

    /// J-type immediates round-trip through encoding (even, 21-bit).
    #[test]
    fn prop_imm_j_round_trip(half in -524_288i32..524_288, rd in 0u8..32) {
        let imm = half * 2;
        let word = encode_j(imm, rd);
        prop_assert_eq!(LaneFields::from_word(word).imm_j, imm);
    }

    /// U-type immediates keep the low twelve bits clear and the high
    /// twenty bits of the word.
    #[test]
    fn prop_imm_u_shape(word in any::<u32>()) {
        let imm_u = LaneFields::from_word(word).imm_u;
        prop_assert_eq!(imm_u & 0xFFF, 0);
        prop_assert_eq!((imm_u as u32) >> 12, word >> 12);
    }
}

// ==================== Validation ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4000))]

    /// The batch validator never fails, keeps its columns in lockstep,
    /// assigns strictly increasing lane-derived locations, and accepts
    /// exactly the words the scalar decoder accepts.
    #[test]
    fn prop_validator_agrees_with_scalar(words in any::<[u32; 8]>()) {
        let fields = FieldBatch::extract(BASE, &words).unwrap();
        let mut batch = DecodedBatch::new();
        batch.push_batch(&fields);

        prop_assert_eq!(batch.locs().len(), batch.ops().len());
        prop_assert_eq!(batch.ops().len(), batch.regs().len());
        prop_assert_eq!(batch.regs().len(), batch.imms().len());

        let mut k = 0;
        for (i, &word) in words.iter().enumerate() {
            if let Ok(inst) = decode_one(word) {
                let (loc, op, regs, imm) = batch.get(k).unwrap();
                prop_assert_eq!(loc, BASE + (i as u32) * 4);
                prop_assert_eq!(op, inst.op);
                prop_assert_eq!(regs, inst.regs);
                prop_assert_eq!(imm, inst.imm);
                k += 1;
            }
        }
        prop_assert_eq!(batch.len(), k);

        for pair in batch.locs().windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Register packing round-trips for every selector triple.
    #[test]
    fn prop_pack_unpack_law(rd in 0u8..32, rs1 in 0u8..32, rs2 in 0u8..32) {
        let packed = PackedRegs::new(rd, rs1, rs2);
        prop_assert_eq!((packed.rd(), packed.rs1(), packed.rs2()), (rd, rs1, rs2));
    }

    /// Writing instruction forms are dropped exactly when rd is x0;
    /// stores and branches survive regardless of their rd-slot bits.
    #[test]
    fn prop_x0_write_filtering(rd in 0u8..32, rs1 in 0u8..32, rs2 in 0u8..32, imm in -2048i32..=2047) {
        // add rd, rs1, rs2
        let r_type = (u32::from(rs2) << 20)
            | (u32::from(rs1) << 15)
            | (u32::from(rd) << 7)
            | 0x33;
        prop_assert_eq!(decode_one(r_type).is_ok(), rd != 0);

        // addi rd, rs1, imm
        let i_type = encode_i(imm, rs1, 0b000, rd, 0x13);
        prop_assert_eq!(decode_one(i_type).is_ok(), rd != 0);

        // lw rd, imm(rs1)
        let load = encode_i(imm, rs1, 0b010, rd, 0x03);
        prop_assert_eq!(decode_one(load).is_ok(), rd != 0);

        // lui rd / jal rd
        let lui = (0x12345 << 12) | (u32::from(rd) << 7) | 0x37;
        prop_assert_eq!(decode_one(lui).is_ok(), rd != 0);
        let jal = encode_j(imm * 2, rd);
        prop_assert_eq!(decode_one(jal).is_ok(), rd != 0);

        // jalr rd, imm(rs1)
        let jalr = encode_i(imm, rs1, 0b000, rd, 0x67);
        prop_assert_eq!(decode_one(jalr).is_ok(), rd != 0);

        // sw rs2, imm(rs1) and beq rs1, rs2: the rd slot is immediate
        // bits, so these survive whatever lands there
        let store = encode_s(imm, rs2, rs1, 0b010);
        prop_assert!(decode_one(store).is_ok());
        let branch = encode_b(imm * 2, rs2, rs1, 0b000);
        prop_assert!(decode_one(branch).is_ok());
    }
}
