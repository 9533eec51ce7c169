//! Single-instruction decoding for disassembly and debugging.

use std::fmt;

use crate::decode::extract::LaneFields;
use crate::decode::validate::{classify, Reject};
use crate::isa::{Op, PackedRegs};

/// One fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInst {
    /// The decoded operation.
    pub op: Op,
    /// Packed register triple; unused slots are zero.
    pub regs: PackedRegs,
    /// The instruction type's immediate; zero for R-type.
    pub imm: i32,
}

/// Decode a single 32-bit instruction word.
///
/// The batch path ([`DecodedBatch::push_batch`]) silently drops bad lanes
/// so a batch never fails; this companion surfaces the rejection reason
/// instead, which is what a disassembler or debugger wants.
///
/// [`DecodedBatch::push_batch`]: crate::decode::DecodedBatch::push_batch
///
/// # Errors
///
/// Returns the [`Reject`] naming the sub-field that disqualified the word.
pub fn decode_one(word: u32) -> Result<DecodedInst, Reject> {
    let fields = LaneFields::from_word(word);
    let (op, regs, imm) = classify(&fields)?;
    Ok(DecodedInst { op, regs, imm })
}

impl fmt::Display for DecodedInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.op.mnemonic();
        let (rd, rs1, rs2) = (self.regs.rd(), self.regs.rs1(), self.regs.rs2());
        match self.op {
            Op::Add
            | Op::Sub
            | Op::Xor
            | Op::Or
            | Op::And
            | Op::Sll
            | Op::Srl
            | Op::Sra
            | Op::Slt
            | Op::Sltu => write!(f, "{mnemonic} x{rd}, x{rs1}, x{rs2}"),

            Op::Addi | Op::Xori | Op::Ori | Op::Andi | Op::Slti | Op::Sltiu => {
                write!(f, "{mnemonic} x{rd}, x{rs1}, {}", self.imm)
            }

            // Shift-immediates print only the shamt, not the high bits
            Op::Slli | Op::Srli | Op::Srai => {
                write!(f, "{mnemonic} x{rd}, x{rs1}, {}", self.imm & 0x1F)
            }

            Op::Lb | Op::Lh | Op::Lw | Op::Lbu | Op::Lhu => {
                write!(f, "{mnemonic} x{rd}, {}(x{rs1})", self.imm)
            }

            Op::Sb | Op::Sh | Op::Sw => {
                write!(f, "{mnemonic} x{rs2}, {}(x{rs1})", self.imm)
            }

            Op::Beq | Op::Bne | Op::Blt | Op::Bge | Op::Bltu | Op::Bgeu => {
                write!(f, "{mnemonic} x{rs1}, x{rs2}, {}", self.imm)
            }

            Op::Jal => write!(f, "{mnemonic} x{rd}, {}", self.imm),
            Op::Jalr => write!(f, "{mnemonic} x{rd}, {}(x{rs1})", self.imm),

            // U-type prints the 20-bit page number, as assemblers write it
            Op::Lui | Op::Auipc => {
                write!(f, "{mnemonic} x{rd}, {:#x}", (self.imm as u32) >> 12)
            }

            Op::Ecall | Op::Ebreak => f.write_str(mnemonic),
        }
    }
}
