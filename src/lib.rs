//! Dense f64 matrix multiplication, C = A × B.
//!
//! Three implementations share one calling convention: row-major,
//! contiguous `f64` slices with the shape passed alongside as `m, k, n`
//! (A is m×k, B is k×n, C is m×n). All of them overwrite C, never
//! accumulate into it, and agree with each other to rounding error.
//!
//! - [`multiply`] - fastest kernel for this CPU (AVX-512 > AVX2 > NEON > scalar)
//! - [`multiply_reference`] - textbook triple loop, the correctness baseline
//! - [`multiply_blocked`] - cache-blocked tiling with a caller-chosen tile size
//!
//! ## Usage
//!
//! ```
//! use dgemm::multiply;
//!
//! let a = vec![1.0f64; 64 * 32];
//! let b = vec![1.0f64; 32 * 48];
//! let mut c = vec![0.0f64; 64 * 48];
//!
//! multiply(&a, &b, &mut c, 64, 32, 48);
//! assert!(c.iter().all(|&x| x == 32.0));
//! ```
//!
//! Malformed shapes are programming errors: every function panics if a
//! buffer is shorter than its dimensions require, before writing anything.
//! Use [`check_buffers`] to validate shapes without panicking.
//!
//! ## Kernel selection
//!
//! The kernel behind [`multiply`] is picked once per process. Set
//! `MATMUL_KERNEL` to `scalar`, `avx2`, `avx512` or `neon` to force one;
//! unavailable choices fall back to automatic selection. The `avx512`
//! kernel is compiled only with the `avx512` cargo feature.

pub mod blocked;
pub mod config;
pub mod error;
pub mod kernels;
pub mod matrix;

pub use blocked::tiled::{DEFAULT_BLOCK_SIZE, multiply_blocked};
pub use config::KernelChoice;
pub use error::{ConfigError, ContractError, Operand};
pub use kernels::{KernelManager, ScalarKernel, VectorKernel, kernel_manager};
pub use matrix::contract::{Dims, check_buffers};
pub use matrix::reference::multiply_reference;

use matrix::contract::assert_buffers;

/// Matrix multiply: C = A * B
///
/// Validates the buffers, then hands off to the vector kernel chosen for
/// this CPU. Results match [`multiply_reference`] to rounding error.
///
/// # Panics
///
/// Panics if `a`, `b` or `c` hold fewer than `m*k`, `k*n` or `m*n` elements.
#[track_caller]
pub fn multiply(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    let dims = Dims::new(m, k, n);
    assert_buffers(a, b, c, dims);
    kernel_manager().select().multiply(a, b, c, dims);
}

/// Name of the kernel [`multiply`] uses, selecting it if needed.
pub fn selected_kernel_name() -> &'static str {
    kernel_manager().select().name()
}

/// Names of the kernels that can run on this CPU, best first.
pub fn available_kernels() -> Vec<&'static str> {
    kernel_manager().available()
}
