//! Error types for the decode core.

use std::fmt;

/// Memory access type for fault reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    /// Read access (load operations).
    Read,
    /// Write access (store operations).
    Write,
    /// Execute access (instruction fetch).
    Execute,
}

/// Recoverable faults raised at the core's boundary.
///
/// Per-lane decode anomalies are deliberately not faults: the batch
/// validator drops the offending lane with a diagnostic and keeps going.
/// A fault aborts only the access or batch that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Memory access outside the configured region.
    OutOfBounds {
        /// The address that failed the bounds check.
        addr: u32,
        /// The type of access attempted.
        access: AccessType,
    },
    /// Batch base PC is not a multiple of four.
    MisalignedBase(u32),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::OutOfBounds { addr, access } => {
                write!(f, "memory {access:?} access out of bounds at {addr:#010x}")
            }
            Fault::MisalignedBase(base) => {
                write!(f, "misaligned batch base: {base:#010x}")
            }
        }
    }
}

impl std::error::Error for Fault {}

/// Result type for fallible core operations.
pub type CoreResult<T> = Result<T, Fault>;
