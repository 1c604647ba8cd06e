use rand::Rng;

use crate::error::{ParameterError, Result};
use crate::field::PrimeField;
use crate::reduction::product_share_count;
use crate::shamir::{self, Share};

/// A validated `(pp, n, t)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharingParams {
    pub prime: u64,
    pub share_count: usize,
    pub threshold: usize,
}

impl SharingParams {
    pub fn new(prime: u64, share_count: usize, threshold: usize) -> Result<Self> {
        let params = SharingParams {
            prime,
            share_count,
            threshold,
        };
        params.validate()?;
        Ok(params)
    }

    /// Applies the `share` preconditions that do not depend on a secret.
    /// Useful after deserializing.
    pub fn validate(&self) -> Result<()> {
        shamir::check_parameters(self.field()?, 0, self.share_count, self.threshold)
    }

    pub fn field(&self) -> Result<PrimeField> {
        PrimeField::new(self.prime)
    }

    /// Whether `share_count` leaves room to degree-reduce a product.
    pub fn supports_multiplication(&self) -> bool {
        product_share_count(self.threshold).is_some_and(|required| self.share_count >= required)
    }

    pub fn require_multiplication(&self) -> Result<()> {
        if self.supports_multiplication() {
            return Ok(());
        }
        Err(ParameterError::InsufficientSharesForReduction {
            threshold: self.threshold,
            share_count: self.share_count,
            required: product_share_count(self.threshold).unwrap_or(usize::MAX),
        }
        .into())
    }

    pub fn share<R: Rng + ?Sized>(&self, secret: u64, rng: &mut R) -> Result<Vec<Share>> {
        shamir::share(self.field()?, secret, self.share_count, self.threshold, rng)
    }
}
