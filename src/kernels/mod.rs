//! Vector-accelerated kernels behind [`multiply`](crate::multiply).
//!
//! Each kernel computes the same overwriting C = A × B as
//! [`multiply_reference`](crate::multiply_reference), but groups the work
//! into SIMD register tiles. Accumulation uses FMA, so results match the
//! reference to rounding error rather than bit-for-bit.
//!
//! Available kernels:
//! - `ScalarKernel`: portable i-k-j loop, always available
//! - `Avx2Kernel`: 4×8 / 4×4 tiles, AVX2 + FMA (x86_64)
//! - `Avx512Kernel`: 4×8 tiles, AVX-512F (x86_64, `avx512` feature)
//! - `NeonKernel`: 4×4 tiles, NEON (aarch64)
//!
//! [`KernelManager`] picks the best one at runtime.

#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(all(target_arch = "x86_64", feature = "avx512"))]
pub mod avx512;
pub mod manager;
#[cfg(target_arch = "aarch64")]
pub mod neon;
pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub use avx2::Avx2Kernel;
#[cfg(all(target_arch = "x86_64", feature = "avx512"))]
pub use avx512::Avx512Kernel;
pub use manager::{KernelManager, kernel_manager};
#[cfg(target_arch = "aarch64")]
pub use neon::NeonKernel;
pub use scalar::ScalarKernel;

use crate::matrix::contract::Dims;

/// A C = A × B implementation selectable at runtime.
///
/// Implementations must overwrite the first `m*n` elements of `c` and touch
/// nothing else. They check the buffer contract themselves, so calling one
/// directly with short buffers panics instead of reading out of bounds. A
/// kernel invoked on a CPU that lacks its instructions falls back to scalar
/// code rather than faulting.
pub trait VectorKernel: Send + Sync {
    fn name(&self) -> &'static str;
    fn is_available(&self) -> bool;
    fn multiply(&self, a: &[f64], b: &[f64], c: &mut [f64], dims: Dims);
}
