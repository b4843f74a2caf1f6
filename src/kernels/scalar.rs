//! Portable kernel, used when no SIMD kernel is available.

use super::VectorKernel;
use crate::matrix::contract::{Dims, assert_buffers};

/// Scalar i-k-j kernel.
///
/// Both B and C are walked with stride 1 in the inner loop, which is enough
/// for the compiler to vectorize it with whatever the target baseline
/// offers (SSE2 on x86_64, NEON on aarch64).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel;

impl VectorKernel for ScalarKernel {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn multiply(&self, a: &[f64], b: &[f64], c: &mut [f64], dims: Dims) {
        assert_buffers(a, b, c, dims);
        multiply_ikj(a, b, c, dims.m, dims.k, dims.n);
    }
}

/// Overwriting i-k-j multiply. Buffers must already be validated.
pub(crate) fn multiply_ikj(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        c_row.fill(0.0);
        let a_row = &a[i * k..(i + 1) * k];
        for (p, &a_ip) in a_row.iter().enumerate() {
            let b_row = &b[p * n..(p + 1) * n];
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}
