//! Operation tags and packed register triples.
//!
//! [`Op`] is the wire-level contract between the decoder and the
//! execution stage: a closed set of the RV32I base operations. Keeping
//! it fieldless lets the validator store operations in a flat column
//! while registers and immediates live in their own columns.

use std::fmt;

/// A decoded RV32I operation.
///
/// The set is closed: execution-stage dispatch should match exhaustively
/// (no catch-all arm) so that growing the ISA cannot silently skip cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // R-type: register-register operations
    Add,
    Sub,
    Xor,
    Or,
    And,
    Sll,
    Srl,
    Sra,
    Slt,
    Sltu,

    // I-type: immediate operations
    Addi,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    Slti,
    Sltiu,

    // Loads (I-type format)
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,

    // S-type: stores
    Sb,
    Sh,
    Sw,

    // B-type: branches
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,

    // Jumps
    Jal,
    Jalr,

    // U-type: upper immediates
    Lui,
    Auipc,

    // System
    Ecall,
    Ebreak,
}

impl Op {
    /// The assembly mnemonic for this operation.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Xor => "xor",
            Op::Or => "or",
            Op::And => "and",
            Op::Sll => "sll",
            Op::Srl => "srl",
            Op::Sra => "sra",
            Op::Slt => "slt",
            Op::Sltu => "sltu",
            Op::Addi => "addi",
            Op::Xori => "xori",
            Op::Ori => "ori",
            Op::Andi => "andi",
            Op::Slli => "slli",
            Op::Srli => "srli",
            Op::Srai => "srai",
            Op::Slti => "slti",
            Op::Sltiu => "sltiu",
            Op::Lb => "lb",
            Op::Lh => "lh",
            Op::Lw => "lw",
            Op::Lbu => "lbu",
            Op::Lhu => "lhu",
            Op::Sb => "sb",
            Op::Sh => "sh",
            Op::Sw => "sw",
            Op::Beq => "beq",
            Op::Bne => "bne",
            Op::Blt => "blt",
            Op::Bge => "bge",
            Op::Bltu => "bltu",
            Op::Bgeu => "bgeu",
            Op::Jal => "jal",
            Op::Jalr => "jalr",
            Op::Lui => "lui",
            Op::Auipc => "auipc",
            Op::Ecall => "ecall",
            Op::Ebreak => "ebreak",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Register selectors packed into 16 bits: `[unused:1][rd:5][rs1:5][rs2:5]`.
///
/// Register slots an instruction type does not use hold zero (a store
/// packs `rd = 0`, a jump packs `rs2 = 0`, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedRegs(u16);

impl PackedRegs {
    /// Pack a register triple. Each selector is masked to 5 bits.
    #[must_use]
    pub fn new(rd: u8, rs1: u8, rs2: u8) -> Self {
        PackedRegs(
            (u16::from(rd & 0x1F) << 10) | (u16::from(rs1 & 0x1F) << 5) | u16::from(rs2 & 0x1F),
        )
    }

    /// Reconstruct from the raw 16-bit representation.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        PackedRegs(raw)
    }

    /// The destination register selector.
    #[inline]
    #[must_use]
    pub fn rd(self) -> u8 {
        ((self.0 >> 10) & 0x1F) as u8
    }

    /// The first source register selector.
    #[inline]
    #[must_use]
    pub fn rs1(self) -> u8 {
        ((self.0 >> 5) & 0x1F) as u8
    }

    /// The second source register selector.
    #[inline]
    #[must_use]
    pub fn rs2(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// The raw 16-bit representation.
    #[inline]
    #[must_use]
    pub fn raw(self) -> u16 {
        self.0
    }
}
