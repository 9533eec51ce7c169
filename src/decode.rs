//! Two-stage batched instruction decoding.
//!
//! Stage one ([`FieldBatch::extract`]) pulls every architectural field and
//! every immediate encoding out of a fixed-size batch of raw words,
//! unconditionally and branch-free. Stage two
//! ([`DecodedBatch::push_batch`]) classifies each lane, drops illegal
//! encodings, and packs survivors into growable output columns.
//!
//! [`decode_one`] is the scalar companion for disassembly and debugging:
//! it decodes a single word and surfaces the rejection reason the batch
//! path only logs.

mod extract;
mod scalar;
mod validate;

pub use extract::{FieldBatch, LaneFields};
pub use scalar::{decode_one, DecodedInst};
pub use validate::{DecodedBatch, LaneDiag, Reject};
