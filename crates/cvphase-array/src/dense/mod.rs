//! Dense array implementation and operations
//!
//! The `DenseArray<T>` type is defined in [`types`]; operations are grouped
//! into sub-modules by functionality.

pub mod types;

mod combining;
mod elementwise;
mod indexing;
mod shape_ops;

pub use types::DenseArray;
