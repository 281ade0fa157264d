//! Block-tensor algebra
//!
//! All operations return new tensors. The only mutating entry points are
//! [`PhaseTensor::scale_in_place`], [`PhaseTensor::add_in_place`] and the
//! `assign_*` methods in [`crate::indexing`], which take `&mut self`.
//!
//! [`PhaseTensor::scale_in_place`]: crate::PhaseTensor::scale_in_place
//! [`PhaseTensor::add_in_place`]: crate::PhaseTensor::add_in_place

mod product;
mod replicate;
mod scalar;
mod sum;

pub use product::Product;
