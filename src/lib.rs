pub mod algebra;
pub mod error;
pub mod field;
mod field_element;
pub mod lagrange;
pub mod matrix;
pub mod params;
pub mod polynomial;
pub mod reduction;
pub mod shamir;

pub use algebra::{add_shares, mult_shares, scale_shares};
pub use error::{Mismatch, ParameterError, Result, SharingError};
pub use field::PrimeField;
pub use field_element::FieldElement;
pub use params::SharingParams;
pub use reduction::{degree_reduction, degree_reduction_with, MaskPolicy, TruncationOperator};
pub use shamir::{reconstruct, reconstruct_redistributed, redistribute, share, Share};
