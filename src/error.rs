//! Error types for shape validation and kernel configuration.

use std::fmt;

use thiserror::Error;

/// Which matrix of `C = A × B` an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
    C,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operand::A => "A",
            Operand::B => "B",
            Operand::C => "C",
        };
        f.write_str(name)
    }
}

/// Violation of the buffer contract shared by every multiplication routine.
///
/// The multiplication functions never return this; they panic with its
/// message. [`check_buffers`](crate::check_buffers) exposes it for callers
/// that want to validate shapes up front.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// A buffer is shorter than its declared dimensions require.
    #[error("insufficient buffer size for {operand}: need {required} elements, got {actual}")]
    InsufficientBuffer {
        operand: Operand,
        required: usize,
        actual: usize,
    },

    /// The element count of a matrix does not fit in `usize`.
    #[error("dimension overflow computing the size of {operand}")]
    DimensionOverflow { operand: Operand },

    /// The blocked algorithm was given a tile size of zero.
    #[error("block size must be positive")]
    ZeroBlockSize,
}

/// Errors from parsing kernel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown kernel {0:?} (expected auto, scalar, avx2, avx512 or neon)")]
    UnknownKernel(String),
}
