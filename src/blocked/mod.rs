//! Cache-blocked GEMM.
//!
//! Works through the product one tile at a time so the slices of A, B and C
//! being touched stay resident in L1/L2 instead of streaming whole rows.

pub mod tiled;
