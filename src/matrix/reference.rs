use super::contract::{Dims, assert_buffers};

/// Reference matrix multiplication using i-j-k loop order: C = A * B
///
/// This is the textbook triple loop and the ground truth every other
/// implementation is tested against. Each output element is summed in
/// ascending `kk` with a separate multiply and add, so its rounding is
/// fully deterministic. Don't reorder it or switch it to `mul_add`.
///
/// It's slow: the innermost loop walks B with stride `n`.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, overwritten
/// * `m` - Rows of A and C
/// * `k` - Columns of A, rows of B
/// * `n` - Columns of B and C
///
/// # Panics
///
/// Panics if any buffer is shorter than its dimensions require.
///
/// # Example
///
/// ```
/// use dgemm::multiply_reference;
///
/// let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2×3
/// let b = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]; // 3×2
/// let mut c = vec![f64::NAN; 4];
///
/// multiply_reference(&a, &b, &mut c, 2, 3, 2);
/// assert_eq!(c, vec![58.0, 64.0, 139.0, 154.0]);
/// ```
#[track_caller]
pub fn multiply_reference(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    let dims = Dims::new(m, k, n);
    assert_buffers(a, b, c, dims);

    c[..m * n].fill(0.0);

    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            c[i * n + j] = dot_column(a_row, b, j, n);
        }
    }
}

/// Inner product of one row of A with column `j` of B, in reference order.
///
/// Kernels use this for the rows and columns left over after their register
/// tiles, so edge elements round exactly like the reference.
#[inline]
pub(crate) fn dot_column(a_row: &[f64], b: &[f64], j: usize, n: usize) -> f64 {
    let mut sum = 0.0;
    for (p, &a_ip) in a_row.iter().enumerate() {
        sum += a_ip * b[p * n + j];
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_computed_2x2() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [0.0; 4];
        multiply_reference(&a, &b, &mut c, 2, 2, 2);
        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn overwrites_instead_of_accumulating() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [1e300, f64::NAN, -7.0, f64::INFINITY];
        multiply_reference(&a, &b, &mut c, 2, 2, 2);
        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn zero_inner_dimension_gives_zeros() {
        let mut c = [3.0; 6];
        multiply_reference(&[], &[], &mut c, 2, 0, 3);
        assert_eq!(c, [0.0; 6]);
    }

    #[test]
    fn leaves_trailing_capacity_alone() {
        let a = [2.0];
        let b = [3.0];
        let mut c = [9.0, 9.0, 9.0];
        multiply_reference(&a, &b, &mut c, 1, 1, 1);
        assert_eq!(c, [6.0, 9.0, 9.0]);
    }

    #[test]
    #[should_panic(expected = "insufficient buffer size for B")]
    fn short_b_panics() {
        let mut c = [0.0; 4];
        multiply_reference(&[0.0; 4], &[0.0; 3], &mut c, 2, 2, 2);
    }
}
