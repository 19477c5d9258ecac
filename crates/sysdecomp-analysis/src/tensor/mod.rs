//! Tensor algebra over binary index decompositions.
//!
//! Every index in this module is little-endian: bit `k` of a row or column
//! index is the state of the `k`-th variable of the relevant ordered subset.

pub mod marginal;
pub mod position;
pub mod product;
pub mod restrict;

pub use marginal::{expand, marginalize, recursive_marginalization, MarginalAxis};
pub use position::{binary_position, Projection};
pub use product::{product_tensor, product_tensor_with_cut};
pub use restrict::restrict_system;
