//! NEON kernel for aarch64: 4×4 tiles of C in pairs of `float64x2_t`.

use std::arch::aarch64::*;

use super::VectorKernel;
use super::scalar::multiply_ikj;
use crate::matrix::contract::{Dims, assert_buffers};
use crate::matrix::reference::dot_column;

/// NEON kernel. A 128-bit register holds 2 f64s, so each tile row is split
/// into a low and high half.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeonKernel;

impl VectorKernel for NeonKernel {
    fn name(&self) -> &'static str {
        "neon"
    }

    fn is_available(&self) -> bool {
        std::arch::is_aarch64_feature_detected!("neon")
    }

    fn multiply(&self, a: &[f64], b: &[f64], c: &mut [f64], dims: Dims) {
        assert_buffers(a, b, c, dims);

        if !self.is_available() {
            multiply_ikj(a, b, c, dims.m, dims.k, dims.n);
            return;
        }

        // SAFETY: NEON was detected above and the buffers are validated.
        unsafe { multiply_neon(a, b, c, dims.m, dims.k, dims.n) }
    }
}

/// Overwriting C = A * B with 4×4 NEON tiles and scalar edges.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports NEON
/// - `a`, `b`, `c` hold at least `m*k`, `k*n`, `m*n` elements
#[target_feature(enable = "neon")]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn multiply_neon(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    let m_main = (m / 4) * 4;
    let n_main = (n / 4) * 4;

    for i in (0..m_main).step_by(4) {
        let rows = [i * k, (i + 1) * k, (i + 2) * k, (i + 3) * k];

        for j in (0..n_main).step_by(4) {
            let mut lo = [vdupq_n_f64(0.0); 4];
            let mut hi = [vdupq_n_f64(0.0); 4];

            for p in 0..k {
                let b_lo = vld1q_f64(b.as_ptr().add(p * n + j));
                let b_hi = vld1q_f64(b.as_ptr().add(p * n + j + 2));

                for r in 0..4 {
                    let a_rp = vdupq_n_f64(a[rows[r] + p]);
                    lo[r] = vfmaq_f64(lo[r], a_rp, b_lo);
                    hi[r] = vfmaq_f64(hi[r], a_rp, b_hi);
                }
            }

            let c_ptr = c.as_mut_ptr();
            for r in 0..4 {
                vst1q_f64(c_ptr.add((i + r) * n + j), lo[r]);
                vst1q_f64(c_ptr.add((i + r) * n + j + 2), hi[r]);
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiply_reference;

    #[test]
    fn test_neon_tiles_and_edges() {
        if !NeonKernel.is_available() {
            println!("Skipping - NEON not available");
            return;
        }

        for (m, k, n) in [(4, 5, 4), (8, 3, 8), (5, 6, 13), (3, 2, 3)] {
            let a: Vec<f64> = (0..m * k).map(|i| (i % 10) as f64).collect();
            let b: Vec<f64> = (0..k * n).map(|i| (i % 7) as f64).collect();

            let mut expected = vec![0.0; m * n];
            multiply_reference(&a, &b, &mut expected, m, k, n);

            let mut c = vec![f64::NAN; m * n];
            NeonKernel.multiply(&a, &b, &mut c, Dims::new(m, k, n));

            assert_eq!(expected, c, "{m}x{k}x{n}");
        }
    }
}
