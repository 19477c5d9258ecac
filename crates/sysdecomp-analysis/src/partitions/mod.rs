//! Exhaustive partition enumeration.

pub mod enumerator;

pub use enumerator::{generate_partitions, proper_subsets};
