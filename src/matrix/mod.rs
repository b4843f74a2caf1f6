//! The buffer contract and the reference implementation.
//!
//! The reference is the correctness baseline every faster implementation
//! is compared against.

pub mod contract;
pub mod reference;
