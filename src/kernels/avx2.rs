//! AVX2 + FMA kernel: 4-row register tiles of C, 8 or 4 columns wide.

use std::arch::x86_64::*;

use super::VectorKernel;
use super::scalar::multiply_ikj;
use crate::matrix::contract::{Dims, assert_buffers};
use crate::matrix::reference::dot_column;

/// AVX2 kernel for x86_64 CPUs with AVX2 and FMA.
///
/// No packing: rows of B are already contiguous in row-major layout, so a
/// tile loads each B row segment directly and broadcasts one A value per
/// output row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avx2Kernel;

impl VectorKernel for Avx2Kernel {
    fn name(&self) -> &'static str {
        "avx2"
    }

    fn is_available(&self) -> bool {
        is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
    }

    fn multiply(&self, a: &[f64], b: &[f64], c: &mut [f64], dims: Dims) {
        // The tiles use raw loads and stores, so this check is what keeps them in bounds.
        assert_buffers(a, b, c, dims);

        if !self.is_available() {
            multiply_ikj(a, b, c, dims.m, dims.k, dims.n);
            return;
        }

        // SAFETY: AVX2 and FMA were detected above and the buffers are validated.
        unsafe { multiply_avx2(a, b, c, dims.m, dims.k, dims.n) }
    }
}

/// Overwriting C = A * B with AVX2 register tiles.
///
/// Full 4×8 tiles first, then at most one 4×4 tile per row band, then
/// leftover columns and rows with a scalar dot product.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX2 and FMA
/// - `a`, `b`, `c` hold at least `m*k`, `k*n`, `m*n` elements
#[target_feature(enable = "avx2,fma")]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn multiply_avx2(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    let m_main = (m / 4) * 4;

    for i in (0..m_main).step_by(4) {
        let mut j = 0;
        while j + 8 <= n {
            tile_4x8(a, b, c, i, j, k, n);
            j += 8;
        }
        if j + 4 <= n {
            tile_4x4(a, b, c, i, j, k, n);
            j += 4;
        }
        for row in i..i + 4 {
            let a_row = &a[row * k..(row + 1) * k];
            for col in j..n {
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

// C[i..i+4, j..j+8] = A[i..i+4, :] * B[:, j..j+8]
#[target_feature(enable = "avx2,fma")]
#[allow(unsafe_op_in_unsafe_fn)]
#[allow(clippy::too_many_arguments)]
unsafe fn tile_4x8(a: &[f64], b: &[f64], c: &mut [f64], i: usize, j: usize, k: usize, n: usize) {
    let (r0, r1, r2, r3) = (i * k, (i + 1) * k, (i + 2) * k, (i + 3) * k);
    let b_ptr = b.as_ptr();

    let mut c00 = _mm256_setzero_pd();
    let mut c01 = _mm256_setzero_pd();
    let mut c10 = _mm256_setzero_pd();
    let mut c11 = _mm256_setzero_pd();
    let mut c20 = _mm256_setzero_pd();
    let mut c21 = _mm256_setzero_pd();
    let mut c30 = _mm256_setzero_pd();
    let mut c31 = _mm256_setzero_pd();

    for p in 0..k {
        let b_lo = _mm256_loadu_pd(b_ptr.add(p * n + j));
        let b_hi = _mm256_loadu_pd(b_ptr.add(p * n + j + 4));

        let a0 = _mm256_broadcast_sd(&a[r0 + p]);
        let a1 = _mm256_broadcast_sd(&a[r1 + p]);
        let a2 = _mm256_broadcast_sd(&a[r2 + p]);
        let a3 = _mm256_broadcast_sd(&a[r3 + p]);

        c00 = _mm256_fmadd_pd(a0, b_lo, c00);
        c01 = _mm256_fmadd_pd(a0, b_hi, c01);
        c10 = _mm256_fmadd_pd(a1, b_lo, c10);
        c11 = _mm256_fmadd_pd(a1, b_hi, c11);
        c20 = _mm256_fmadd_pd(a2, b_lo, c20);
        c21 = _mm256_fmadd_pd(a2, b_hi, c21);
        c30 = _mm256_fmadd_pd(a3, b_lo, c30);
        c31 = _mm256_fmadd_pd(a3, b_hi, c31);
    }

    let c_ptr = c.as_mut_ptr();
    _mm256_storeu_pd(c_ptr.add(i * n + j), c00);
    _mm256_storeu_pd(c_ptr.add(i * n + j + 4), c01);
    _mm256_storeu_pd(c_ptr.add((i + 1) * n + j), c10);
    _mm256_storeu_pd(c_ptr.add((i + 1) * n + j + 4), c11);
    _mm256_storeu_pd(c_ptr.add((i + 2) * n + j), c20);
    _mm256_storeu_pd(c_ptr.add((i + 2) * n + j + 4), c21);
    _mm256_storeu_pd(c_ptr.add((i + 3) * n + j), c30);
    _mm256_storeu_pd(c_ptr.add((i + 3) * n + j + 4), c31);
}

// C[i..i+4, j..j+4] = A[i..i+4, :] * B[:, j..j+4]
#[target_feature(enable = "avx2,fma")]
#[allow(unsafe_op_in_unsafe_fn)]
#[allow(clippy::too_many_arguments)]
unsafe fn tile_4x4(a: &[f64], b: &[f64], c: &mut [f64], i: usize, j: usize, k: usize, n: usize) {
    let (r0, r1, r2, r3) = (i * k, (i + 1) * k, (i + 2) * k, (i + 3) * k);
    let b_ptr = b.as_ptr();

    let mut c0 = _mm256_setzero_pd();
    let mut c1 = _mm256_setzero_pd();
    let mut c2 = _mm256_setzero_pd();
    let mut c3 = _mm256_setzero_pd();

    for p in 0..k {
        let b_vec = _mm256_loadu_pd(b_ptr.add(p * n + j));

        c0 = _mm256_fmadd_pd(_mm256_broadcast_sd(&a[r0 + p]), b_vec, c0);
        c1 = _mm256_fmadd_pd(_mm256_broadcast_sd(&a[r1 + p]), b_vec, c1);
        c2 = _mm256_fmadd_pd(_mm256_broadcast_sd(&a[r2 + p]), b_vec, c2);
        c3 = _mm256_fmadd_pd(_mm256_broadcast_sd(&a[r3 + p]), b_vec, c3);
    }

    let c_ptr = c.as_mut_ptr();
    _mm256_storeu_pd(c_ptr.add(i * n + j), c0);
    _mm256_storeu_pd(c_ptr.add((i + 1) * n + j), c1);
    _mm256_storeu_pd(c_ptr.add((i + 2) * n + j), c2);
    _mm256_storeu_pd(c_ptr.add((i + 3) * n + j), c3);
}
