// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Skiff: the decode core of an RV32I emulator.
//!
//! This crate provides the front half of an emulated RISC-V hart:
//! bounds-checked main memory and a two-stage, batch-oriented instruction
//! decoder. Register state, execution, and the program loader live in the
//! host emulator, not here.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Dram: little-endian, bounds-checked    │
//! └────────────────┬────────────────────────┘
//!                  │ fetch_batch::<N>
//! ┌────────────────▼────────────────────────┐
//! │  FieldBatch<N>: branch-free extraction  │
//! │  of all fields + all five immediates    │
//! └────────────────┬────────────────────────┘
//!                  │ push_batch
//! ┌────────────────▼────────────────────────┐
//! │  DecodedBatch: classified, filtered,    │
//! │  column-packed instructions             │
//! └────────────────┬────────────────────────┘
//!                  │ locs / ops / regs / imms
//!                  ▼ execution (external)
//! ```
//!
//! Decoding is deliberately split in two. The extraction stage computes
//! every architectural field and every immediate encoding for every word,
//! with no branching on opcode, so a batch of `N` lanes compiles down to
//! straight-line vectorizable loops. The validation stage then walks the
//! opcode decision tree per lane, drops malformed encodings (and writes to
//! `x0`, which this emulator elides at decode time), and appends survivors
//! to growable output columns shared with the execution stage.

pub mod decode;
pub mod error;
pub mod isa;
pub mod mem;

pub use decode::{decode_one, DecodedBatch, DecodedInst, FieldBatch, LaneDiag, LaneFields, Reject};
pub use error::{AccessType, CoreResult, Fault};
pub use isa::{Op, PackedRegs};
pub use mem::Dram;
