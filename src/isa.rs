//! RV32I instruction set definitions.

mod op;

pub use op::{Op, PackedRegs};
