//! The buffer contract every multiplication routine checks before touching C.

use crate::error::{ContractError, Operand};

/// Shape of a product `C = A × B`.
///
/// A is `m × k`, B is `k × n`, C is `m × n`. Buffers carry no shape of their
/// own, so this triple is the only source of truth about their layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub m: usize,
    pub k: usize,
    pub n: usize,
}

impl Dims {
    pub const fn new(m: usize, k: usize, n: usize) -> Self {
        Self { m, k, n }
    }

    /// Minimum length of A (`m * k`).
    pub fn a_len(&self) -> Result<usize, ContractError> {
        product(self.m, self.k, Operand::A)
    }

    /// Minimum length of B (`k * n`).
    pub fn b_len(&self) -> Result<usize, ContractError> {
        product(self.k, self.n, Operand::B)
    }

    /// Minimum length of C (`m * n`).
    pub fn c_len(&self) -> Result<usize, ContractError> {
        product(self.m, self.n, Operand::C)
    }
}

fn product(rows: usize, cols: usize, operand: Operand) -> Result<usize, ContractError> {
    rows.checked_mul(cols)
        .ok_or(ContractError::DimensionOverflow { operand })
}

fn check_len(actual: usize, required: usize, operand: Operand) -> Result<(), ContractError> {
    if actual < required {
        return Err(ContractError::InsufficientBuffer {
            operand,
            required,
            actual,
        });
    }
    Ok(())
}

/// Check that `a`, `b` and `c` are large enough for `dims`.
///
/// Operands are checked in order A, B, C and the first violation is
/// returned. Buffers longer than required are accepted.
///
/// # Example
///
/// ```
/// use dgemm::{check_buffers, ContractError, Dims, Operand};
///
/// let a = vec![0.0; 6];
/// let b = vec![0.0; 6];
/// let c = vec![0.0; 3];
///
/// let err = check_buffers(&a, &b, &c, Dims::new(2, 3, 2)).unwrap_err();
/// assert_eq!(
///     err,
///     ContractError::InsufficientBuffer { operand: Operand::C, required: 4, actual: 3 }
/// );
/// ```
pub fn check_buffers(a: &[f64], b: &[f64], c: &[f64], dims: Dims) -> Result<(), ContractError> {
    check_len(a.len(), dims.a_len()?, Operand::A)?;
    check_len(b.len(), dims.b_len()?, Operand::B)?;
    check_len(c.len(), dims.c_len()?, Operand::C)?;
    Ok(())
}

/// Panicking form of [`check_buffers`].
///
/// # Panics
///
/// Panics with `matmul: <reason>` if the contract is violated.
#[inline]
#[track_caller]
pub fn assert_buffers(a: &[f64], b: &[f64], c: &[f64], dims: Dims) {
    if let Err(err) = check_buffers(a, b, c, dims) {
        panic!("matmul: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_sizes_pass() {
        let a = vec![0.0; 6];
        let b = vec![0.0; 12];
        let c = vec![0.0; 8];
        assert_eq!(check_buffers(&a, &b, &c, Dims::new(2, 3, 4)), Ok(()));
    }

    #[test]
    fn extra_capacity_passes() {
        let a = vec![0.0; 100];
        let b = vec![0.0; 100];
        let c = vec![0.0; 100];
        assert_eq!(check_buffers(&a, &b, &c, Dims::new(2, 3, 4)), Ok(()));
    }

    #[test]
    fn reports_first_short_operand() {
        let a = vec![0.0; 5];
        let b = vec![0.0; 1];
        let c = vec![0.0; 8];
        let err = check_buffers(&a, &b, &c, Dims::new(2, 3, 4)).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientBuffer {
                operand: Operand::A,
                required: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn short_b_is_reported() {
        let a = vec![0.0; 6];
        let b = vec![0.0; 11];
        let c = vec![0.0; 8];
        let err = check_buffers(&a, &b, &c, Dims::new(2, 3, 4)).unwrap_err();
        assert!(matches!(
            err,
            ContractError::InsufficientBuffer {
                operand: Operand::B,
                ..
            }
        ));
    }

    #[test]
    fn zero_dims_need_no_storage() {
        assert_eq!(check_buffers(&[], &[], &[], Dims::new(0, 0, 0)), Ok(()));
        assert_eq!(check_buffers(&[], &[], &[], Dims::new(3, 0, 0)), Ok(()));
    }

    #[test]
    fn overflow_is_an_error_not_a_wrap() {
        let err = check_buffers(&[], &[], &[], Dims::new(usize::MAX, 2, 1)).unwrap_err();
        assert_eq!(
            err,
            ContractError::DimensionOverflow {
                operand: Operand::A
            }
        );
    }

    #[test]
    #[should_panic(expected = "matmul: insufficient buffer size for C")]
    fn assert_panics_with_message() {
        assert_buffers(&[0.0; 4], &[0.0; 4], &[0.0; 3], Dims::new(2, 2, 2));
    }
}
