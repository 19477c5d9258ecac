//! Shared collection types and index-subset aliases.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet, IndexSubset};
