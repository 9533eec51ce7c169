//! Lane classification and packed output columns.
//!
//! This is the second decode stage: walk the opcode decision tree for
//! each extracted lane, drop encodings that are malformed (or that would
//! write to `x0`, which this emulator elides at decode time), and append
//! survivors to growable columns. Dropping is never an error; the batch
//! always completes.

use std::fmt;

use log::debug;

use crate::decode::extract::{FieldBatch, LaneFields};
use crate::isa::{Op, PackedRegs};

/// RV32I major opcodes (canonical 7-bit values).
const OP: u8 = 0b011_0011;
const OP_IMM: u8 = 0b001_0011;
const LOAD: u8 = 0b000_0011;
const STORE: u8 = 0b010_0011;
const BRANCH: u8 = 0b110_0011;
const JALR: u8 = 0b110_0111;
const JAL: u8 = 0b110_1111;
const LUI: u8 = 0b011_0111;
const AUIPC: u8 = 0b001_0111;
const SYSTEM: u8 = 0b111_0011;

/// Which sub-field disqualified a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    /// No RV32I instruction family has this opcode.
    UnknownOpcode,
    /// The opcode family has no operation for this funct3.
    UnknownFunct3,
    /// The funct3 group has no operation for this funct7.
    UnknownFunct7,
    /// Shift-immediate with an invalid shamt-high field.
    UnknownShamtHigh,
    /// SYSTEM encoding whose immediate selects no operation.
    UnknownImmediate,
    /// The instruction would write its result to x0.
    WritesToZero,
}

impl fmt::Display for Reject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Reject::UnknownOpcode => "unknown opcode",
            Reject::UnknownFunct3 => "unknown funct3",
            Reject::UnknownFunct7 => "unknown funct7",
            Reject::UnknownShamtHigh => "unknown shamt-high field",
            Reject::UnknownImmediate => "unknown system immediate",
            Reject::WritesToZero => "writes to x0",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for Reject {}

/// Diagnostic record for one dropped lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneDiag {
    /// The raw instruction word.
    pub word: u32,
    /// Lane index within the batch.
    pub lane: usize,
    /// The opcode field of the word.
    pub opcode: u8,
    /// Which sub-field triggered the rejection.
    pub cause: Reject,
}

impl fmt::Display for LaneDiag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lane {}: {:#010x} (opcode {:#09b}) dropped: {}",
            self.lane, self.word, self.opcode, self.cause
        )
    }
}

/// One accepted row: operation, packed registers, selected immediate.
type Row = (Op, PackedRegs, i32);

/// Reject the row if it writes its result to x0.
#[inline]
fn writes(rd: u8, row: Row) -> Result<Row, Reject> {
    if rd == 0 {
        Err(Reject::WritesToZero)
    } else {
        Ok(row)
    }
}

/// Classify one lane through the opcode decision tree.
///
/// On acceptance, selects the single relevant immediate for the
/// instruction type and packs the register triple with unused slots
/// zeroed. Shared by the batch and scalar decode paths so the two cannot
/// disagree.
pub(crate) fn classify(f: &LaneFields) -> Result<Row, Reject> {
    match f.opcode {
        OP => classify_op(f),
        OP_IMM => classify_op_imm(f),
        LOAD => classify_load(f),
        STORE => classify_store(f),
        BRANCH => classify_branch(f),
        JALR => classify_jalr(f),
        // JAL carries no funct3; instruction bits [14:12] are imm[14:12]
        JAL => writes(f.rd, (Op::Jal, PackedRegs::new(f.rd, 0, 0), f.imm_j)),
        LUI => writes(f.rd, (Op::Lui, PackedRegs::new(f.rd, 0, 0), f.imm_u)),
        AUIPC => writes(f.rd, (Op::Auipc, PackedRegs::new(f.rd, 0, 0), f.imm_u)),
        SYSTEM => classify_system(f),
        _ => Err(Reject::UnknownOpcode),
    }
}

/// R-type register-register operations, keyed on funct3 × funct7.
fn classify_op(f: &LaneFields) -> Result<Row, Reject> {
    let op = match (f.funct3, f.funct7) {
        (0b000, 0b000_0000) => Op::Add,
        (0b000, 0b010_0000) => Op::Sub,
        (0b001, 0b000_0000) => Op::Sll,
        (0b010, 0b000_0000) => Op::Slt,
        (0b011, 0b000_0000) => Op::Sltu,
        (0b100, 0b000_0000) => Op::Xor,
        (0b101, 0b000_0000) => Op::Srl,
        (0b101, 0b010_0000) => Op::Sra,
        (0b110, 0b000_0000) => Op::Or,
        (0b111, 0b000_0000) => Op::And,
        _ => return Err(Reject::UnknownFunct7),
    };
    writes(f.rd, (op, PackedRegs::new(f.rd, f.rs1, f.rs2), 0))
}

/// I-type immediate arithmetic. Shift-immediates additionally validate
/// the shamt-high field (the upper seven bits of imm_i).
fn classify_op_imm(f: &LaneFields) -> Result<Row, Reject> {
    let shamt_high = (f.imm_i >> 5) & 0x7F;
    let op = match f.funct3 {
        0b000 => Op::Addi,
        0b001 => match shamt_high {
            0x00 => Op::Slli,
            _ => return Err(Reject::UnknownShamtHigh),
        },
        0b010 => Op::Slti,
        0b011 => Op::Sltiu,
        0b100 => Op::Xori,
        0b101 => match shamt_high {
            0x00 => Op::Srli,
            0x20 => Op::Srai,
            _ => return Err(Reject::UnknownShamtHigh),
        },
        0b110 => Op::Ori,
        0b111 => Op::Andi,
        _ => return Err(Reject::UnknownFunct3),
    };
    writes(f.rd, (op, PackedRegs::new(f.rd, f.rs1, 0), f.imm_i))
}

/// Load operations (I-type format).
fn classify_load(f: &LaneFields) -> Result<Row, Reject> {
    let op = match f.funct3 {
        0b000 => Op::Lb,
        0b001 => Op::Lh,
        0b010 => Op::Lw,
        0b100 => Op::Lbu,
        0b101 => Op::Lhu,
        _ => return Err(Reject::UnknownFunct3),
    };
    writes(f.rd, (op, PackedRegs::new(f.rd, f.rs1, 0), f.imm_i))
}

/// S-type store operations. Stores write no register, so the x0 rule
/// does not apply and the rd slot packs as zero.
fn classify_store(f: &LaneFields) -> Result<Row, Reject> {
    let op = match f.funct3 {
        0b000 => Op::Sb,
        0b001 => Op::Sh,
        0b010 => Op::Sw,
        _ => return Err(Reject::UnknownFunct3),
    };
    Ok((op, PackedRegs::new(0, f.rs1, f.rs2), f.imm_s))
}

/// B-type branch operations. Branches write no register.
fn classify_branch(f: &LaneFields) -> Result<Row, Reject> {
    let op = match f.funct3 {
        0b000 => Op::Beq,
        0b001 => Op::Bne,
        0b100 => Op::Blt,
        0b101 => Op::Bge,
        0b110 => Op::Bltu,
        0b111 => Op::Bgeu,
        _ => return Err(Reject::UnknownFunct3),
    };
    Ok((op, PackedRegs::new(0, f.rs1, f.rs2), f.imm_b))
}

/// JALR: I-type format, funct3 must be zero.
fn classify_jalr(f: &LaneFields) -> Result<Row, Reject> {
    if f.funct3 != 0 {
        return Err(Reject::UnknownFunct3);
    }
    writes(f.rd, (Op::Jalr, PackedRegs::new(f.rd, f.rs1, 0), f.imm_i))
}

/// SYSTEM: funct3 must be zero, the immediate selects ecall or ebreak.
/// Neither writes a register.
fn classify_system(f: &LaneFields) -> Result<Row, Reject> {
    if f.funct3 != 0 {
        return Err(Reject::UnknownFunct3);
    }
    let op = match f.imm_i {
        0 => Op::Ecall,
        1 => Op::Ebreak,
        _ => return Err(Reject::UnknownImmediate),
    };
    Ok((op, PackedRegs::new(0, 0, 0), f.imm_i))
}

/// Validated, execution-ready instructions in column layout.
///
/// Four parallel growable columns, always equal in length. Column layout
/// (rather than a vector of records) lets execution scan each column
/// independently: operation dispatch reads only `ops()`, addressing reads
/// only `locs()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBatch {
    loc: Vec<u32>,
    op: Vec<Op>,
    regs: Vec<PackedRegs>,
    imm: Vec<i32>,
}

impl DecodedBatch {
    /// Create an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loc.len()
    }

    /// Whether no instruction has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loc.is_empty()
    }

    /// Drop all accepted instructions, keeping the column allocations.
    pub fn clear(&mut self) {
        self.loc.clear();
        self.op.clear();
        self.regs.clear();
        self.imm.clear();
    }

    /// Absolute PC of each accepted instruction, strictly increasing
    /// within any one pushed batch.
    #[must_use]
    pub fn locs(&self) -> &[u32] {
        &self.loc
    }

    /// Operation tag of each accepted instruction.
    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.op
    }

    /// Packed register triple of each accepted instruction.
    #[must_use]
    pub fn regs(&self) -> &[PackedRegs] {
        &self.regs
    }

    /// Selected immediate of each accepted instruction (zero for R-type).
    #[must_use]
    pub fn imms(&self) -> &[i32] {
        &self.imm
    }

    /// One row across all four columns, or `None` past the end.
    #[must_use]
    pub fn get(&self, k: usize) -> Option<(u32, Op, PackedRegs, i32)> {
        Some((
            *self.loc.get(k)?,
            self.op[k],
            self.regs[k],
            self.imm[k],
        ))
    }

    /// Classify every lane of an extracted batch and append the accepted
    /// ones, in lane order.
    ///
    /// Lane `i` lands at `loc = base + 4·i`. Rejected lanes emit a
    /// [`LaneDiag`] through `log::debug!` and contribute nothing; this
    /// method never fails.
    pub fn push_batch<const N: usize>(&mut self, fields: &FieldBatch<N>) {
        for i in 0..N {
            let lane = fields.lane(i);
            match classify(&lane) {
                Ok((op, regs, imm)) => {
                    self.loc.push(fields.base().wrapping_add((i as u32) * 4));
                    self.op.push(op);
                    self.regs.push(regs);
                    self.imm.push(imm);
                }
                Err(cause) => {
                    let diag = LaneDiag {
                        word: lane.word,
                        lane: i,
                        opcode: lane.opcode,
                        cause,
                    };
                    debug!("{diag}");
                }
            }
        }
    }
}
