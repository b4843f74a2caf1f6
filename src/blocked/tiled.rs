//! Cache-blocked GEMM with a configurable square tile.

use crate::error::ContractError;
use crate::matrix::contract::{Dims, assert_buffers};

/// Tile side used when callers have no better number.
///
/// Three 32×32 f64 tiles are 24KB, which sits comfortably in a 32KB L1.
pub const DEFAULT_BLOCK_SIZE: usize = 32;

/// Cache-blocked matrix multiplication: C = A * B
///
/// Splits the iteration space into `block_size`-sided tiles along M, N and
/// K (in that loop order) and works one tile at a time so the touched parts
/// of A, B and C stay in cache. Tiles on the right and bottom edges are
/// clipped to the real matrix extent.
///
/// Inside a tile each `A[i, kk]` is broadcast and fused-multiply-added
/// across a contiguous row segment of B into the matching row segment of C.
/// That is an i-k-j order, so results agree with
/// [`multiply_reference`](crate::multiply_reference) to rounding error but
/// are not bit-identical.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, overwritten
/// * `block_size` - Tile side, any positive value is correct
///
/// # Panics
///
/// Panics if `block_size` is zero or any buffer is too short.
///
/// # Example
///
/// ```
/// use dgemm::multiply_blocked;
///
/// let a = vec![1.0, 2.0, 3.0, 4.0];
/// let b = vec![5.0, 6.0, 7.0, 8.0];
/// let mut c = vec![0.0; 4];
///
/// multiply_blocked(&a, &b, &mut c, 2, 2, 2, 1);
/// assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
/// ```
#[allow(clippy::too_many_arguments)]
#[track_caller]
pub fn multiply_blocked(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    m: usize,
    k: usize,
    n: usize,
    block_size: usize,
) {
    if block_size == 0 {
        panic!("matmul: {}", ContractError::ZeroBlockSize);
    }
    assert_buffers(a, b, c, Dims::new(m, k, n));

    c[..m * n].fill(0.0);

    for i0 in (0..m).step_by(block_size) {
        let i_max = (i0 + block_size).min(m);
        for j0 in (0..n).step_by(block_size) {
            let j_max = (j0 + block_size).min(n);
            for k0 in (0..k).step_by(block_size) {
                let k_max = (k0 + block_size).min(k);

                for i in i0..i_max {
                    let c_row = &mut c[i * n + j0..i * n + j_max];
                    for kk in k0..k_max {
                        let a_ik = a[i * k + kk];
                        let b_row = &b[kk * n + j0..kk * n + j_max];
                        for (c_ij, &b_kj) in c_row.iter_mut().zip(b_row) {
                            *c_ij = a_ik.mul_add(b_kj, *c_ij);
                        }
                    }
                }
            }
        }
    }
}
