//! 4×8 AVX-512 kernel. Built only with the `avx512` feature.

use std::arch::x86_64::*;

use super::VectorKernel;
use super::scalar::multiply_ikj;
use crate::matrix::contract::{Dims, assert_buffers};
use crate::matrix::reference::dot_column;

/// AVX-512F kernel: one ZMM register holds 8 f64s, i.e. a full 8-column
/// row segment of a tile, so a 4×8 tile needs just 4 accumulators.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avx512Kernel;

impl VectorKernel for Avx512Kernel {
    fn name(&self) -> &'static str {
        "avx512"
    }

    fn is_available(&self) -> bool {
        is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("fma")
    }

    fn multiply(&self, a: &[f64], b: &[f64], c: &mut [f64], dims: Dims) {
        assert_buffers(a, b, c, dims);

        if !self.is_available() {
            multiply_ikj(a, b, c, dims.m, dims.k, dims.n);
            return;
        }

        // SAFETY: AVX-512F and FMA were detected above and the buffers are validated.
        unsafe { multiply_avx512(a, b, c, dims.m, dims.k, dims.n) }
    }
}

/// Overwriting C = A * B with 4×8 AVX-512 tiles and scalar edges.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX-512F and FMA
/// - `a`, `b`, `c` hold at least `m*k`, `k*n`, `m*n` elements
#[target_feature(enable = "avx512f,fma")]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn multiply_avx512(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    let m_main = (m / 4) * 4;
    let n_main = (n / 8) * 8;

    for i in (0..m_main).step_by(4) {
        let (r0, r1, r2, r3) = (i * k, (i + 1) * k, (i + 2) * k, (i + 3) * k);

        for j in (0..n_main).step_by(8) {
            let mut c0 = _mm512_setzero_pd();
            let mut c1 = _mm512_setzero_pd();
            let mut c2 = _mm512_setzero_pd();
            let mut c3 = _mm512_setzero_pd();

            for p in 0..k {
                let b_vec = _mm512_loadu_pd(b.as_ptr().add(p * n + j));

                c0 = _mm512_fmadd_pd(_mm512_set1_pd(a[r0 + p]), b_vec, c0);
                c1 = _mm512_fmadd_pd(_mm512_set1_pd(a[r1 + p]), b_vec, c1);
                c2 = _mm512_fmadd_pd(_mm512_set1_pd(a[r2 + p]), b_vec, c2);
                c3 = _mm512_fmadd_pd(_mm512_set1_pd(a[r3 + p]), b_vec, c3);
            }

            let c_ptr = c.as_mut_ptr();
            _mm512_storeu_pd(c_ptr.add(i * n + j), c0);
            _mm512_storeu_pd(c_ptr.add((i + 1) * n + j), c1);
            _mm512_storeu_pd(c_ptr.add((i + 2) * n + j), c2);
            _mm512_storeu_pd(c_ptr.add((i + 3) * n + j), c3);
        }

        for row in i..i + 4 {
            let a_row = &a[row * k..(row + 1) * k];
            for col in n_main..n {
                c[row * n + col] = dot_column(a_row, b, col, n);
            }
        }
    }

    for row in m_main..m {
        let a_row = &a[row * k..(row + 1) * k];
        for col in 0..n {
            c[row * n + col] = dot_column(a_row, b, col, n);
        }
    }
}
