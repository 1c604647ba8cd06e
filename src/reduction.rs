//! BGW degree reduction.
//!
//! After [`mult_shares`](crate::algebra::mult_shares) the product sits on a
//! polynomial of degree `2(t-1)`. Degree reduction maps the `n` point values
//! through the truncation operator `A = B · P · B⁻¹`, where `B` is the
//! Vandermonde matrix of the x-coordinates and `P` keeps the first `t`
//! coefficients. The result is a threshold-`t` sharing of the same secret.
//!
//! Before truncation the sharing is masked with a random polynomial `Q` with
//! `Q(0) = 0`. Each coefficient of `Q` is the sum of `n` independent uniform
//! elements, one per party in a distributed run. The mask changes the output
//! sharing but never the secret it encodes.

use rand::Rng;
use tracing::{debug, trace};

use crate::error::{Mismatch, ParameterError, Result, SharingError};
use crate::field::PrimeField;
use crate::matrix::ModMatrix;
use crate::polynomial::Poly;
use crate::shamir::Share;

/// Whether degree reduction adds the random mask `Q` before truncating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaskPolicy {
    #[default]
    Randomized,
    /// Truncate the product sharing directly. The secret is still correct,
    /// but the high-order cross terms of the product are not re-randomized.
    Disabled,
}

/// The fixed linear map `A = B · P · B⁻¹ (mod pp)` for one `(pp, xs, t)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationOperator {
    field: PrimeField,
    xs: Vec<u64>,
    threshold: usize,
    matrix: ModMatrix,
}

impl TruncationOperator {
    pub fn new(field: PrimeField, xs: &[u64], t: usize) -> Result<Self> {
        let n = xs.len();
        if n == 0 {
            return Err(SharingError::EmptyShareSet);
        }
        if t == 0 {
            return Err(ParameterError::ZeroThreshold.into());
        }
        if t > n {
            return Err(ParameterError::ThresholdExceedsShareCount {
                threshold: t,
                share_count: n,
            }
            .into());
        }

        let b = ModMatrix::vandermonde(field, xs, n);
        let p = ModMatrix::projector(field, n, t);
        let b_inv = b.inverse().ok_or(SharingError::SingularVandermonde {
            n,
            prime: field.prime(),
        })?;
        let matrix = b.mul(&p).mul(&b_inv);
        debug!(prime = field.prime(), n, t, "built truncation operator");

        Ok(TruncationOperator {
            field,
            xs: xs.to_vec(),
            threshold: t,
            matrix,
        })
    }

    pub fn xs(&self) -> &[u64] {
        &self.xs
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn matrix(&self) -> &ModMatrix {
        &self.matrix
    }

    /// Truncate a sharing whose x-coordinates match this operator's, in order.
    pub fn apply(&self, shares: &[Share]) -> Result<Vec<Share>> {
        if shares.len() != self.xs.len() {
            return Err(Mismatch::Length {
                left: self.xs.len(),
                right: shares.len(),
            }
            .into());
        }
        for (index, (&x, s)) in self.xs.iter().zip(shares).enumerate() {
            if x != s.x {
                return Err(Mismatch::Coordinate {
                    index,
                    left: x,
                    right: s.x,
                }
                .into());
            }
        }
        let ys: Vec<u64> = shares.iter().map(|s| self.field.reduce(s.y)).collect();
        Ok(self
            .xs
            .iter()
            .zip(self.matrix.mul_vec(&ys))
            .map(|(&x, y)| Share::new(x, y))
            .collect())
    }
}

/// Random polynomial of degree `2(t-1)` with `Q(0) = 0`.
///
/// Coefficient `k` for `k = 1..=2(t-1)` is the sum of `n` uniform elements,
/// modelling one contribution per party. Requires `1 <= t` and `2t - 1 <= n`.
pub fn random_mask<R: Rng + ?Sized>(
    field: PrimeField,
    n: usize,
    t: usize,
    rng: &mut R,
) -> Result<Poly> {
    check_reduction_size(n, t)?;
    let max_deg = 2 * (t - 1);
    let mut coeffs = vec![0u64; max_deg + 1];
    for c in coeffs.iter_mut().skip(1) {
        *c = (0..n).fold(0, |acc, _| field.add(acc, field.random(rng)));
    }
    Ok(Poly::from_coeffs(field, &coeffs))
}

/// Shares needed to hold the product of two threshold-`t` sharings, `2t - 1`.
/// `None` when that does not fit in a `usize`.
pub fn product_share_count(t: usize) -> Option<usize> {
    t.max(1).checked_mul(2).map(|d| d - 1)
}

fn check_reduction_size(n: usize, t: usize) -> Result<()> {
    if n == 0 {
        return Err(SharingError::EmptyShareSet);
    }
    if t == 0 {
        return Err(ParameterError::ZeroThreshold.into());
    }
    if t > n {
        return Err(ParameterError::ThresholdExceedsShareCount {
            threshold: t,
            share_count: n,
        }
        .into());
    }
    match product_share_count(t) {
        Some(required) if n >= required => Ok(()),
        required => Err(ParameterError::InsufficientSharesForReduction {
            threshold: t,
            share_count: n,
            required: required.unwrap_or(usize::MAX),
        }
        .into()),
    }
}

/// Reduce a degree-doubled sharing back to threshold `t`, with masking.
pub fn degree_reduction<R: Rng + ?Sized>(
    field: PrimeField,
    z_shares: &[Share],
    t: usize,
    rng: &mut R,
) -> Result<Vec<Share>> {
    degree_reduction_with(field, z_shares, t, MaskPolicy::Randomized, rng)
}

/// [`degree_reduction`] with an explicit [`MaskPolicy`].
///
/// Needs `n >= 2t - 1` shares so the degree-`2(t-1)` product (and mask) is
/// determined by the point values.
pub fn degree_reduction_with<R: Rng + ?Sized>(
    field: PrimeField,
    z_shares: &[Share],
    t: usize,
    policy: MaskPolicy,
    rng: &mut R,
) -> Result<Vec<Share>> {
    let n = z_shares.len();
    check_reduction_size(n, t)?;

    let xs: Vec<u64> = z_shares.iter().map(|s| s.x).collect();
    let operator = TruncationOperator::new(field, &xs, t)?;

    let masked: Vec<Share> = match policy {
        MaskPolicy::Randomized => {
            let q = random_mask(field, n, t, rng)?;
            z_shares
                .iter()
                .map(|s| Share::new(s.x, field.add(s.y, q.eval(s.x).value())))
                .collect()
        }
        MaskPolicy::Disabled => z_shares.to_vec(),
    };

    let reduced = operator.apply(&masked)?;
    for s in &reduced {
        trace!(x = s.x, y = s.y, "reduced share");
    }
    debug!(prime = field.prime(), n, t, ?policy, "degree reduction complete");
    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::mult_shares;
    use crate::shamir::{reconstruct, share};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gf(p: u64) -> PrimeField {
        PrimeField::new(p).unwrap()
    }

    #[test]
    fn operator_fixes_low_degree_sharings() {
        // A degree-1 sharing is already truncated, so A leaves it unchanged.
        let f = gf(67);
        let mut rng = StdRng::seed_from_u64(1);
        let shares = share(f, 9, 5, 2, &mut rng).unwrap();
        let xs: Vec<u64> = shares.iter().map(|s| s.x).collect();
        let op = TruncationOperator::new(f, &xs, 2).unwrap();
        assert_eq!(op.apply(&shares).unwrap(), shares);
    }

    #[test]
    fn operator_is_idempotent() {
        let f = gf(101);
        let op = TruncationOperator::new(f, &[1, 2, 3, 4], 2).unwrap();
        let a = op.matrix();
        assert_eq!(a.mul(a), *a);
    }

    #[test]
    fn full_threshold_operator_is_identity() {
        let f = gf(31);
        let op = TruncationOperator::new(f, &[2, 5, 7], 3).unwrap();
        assert_eq!(*op.matrix(), ModMatrix::identity(f, 3));
    }

    #[test]
    fn operator_drops_high_coefficients() {
        // 4 + 3x + 2x^2 + x^3 truncated to t = 2 is 4 + 3x
        let f = gf(97);
        let xs = [1u64, 2, 3, 4];
        let full = Poly::from_coeffs(f, &[4, 3, 2, 1]);
        let low = Poly::from_coeffs(f, &[4, 3]);
        let shares: Vec<Share> = xs.iter().map(|&x| Share::new(x, full.eval(x).value())).collect();
        let op = TruncationOperator::new(f, &xs, 2).unwrap();
        let reduced = op.apply(&shares).unwrap();
        for s in reduced {
            assert_eq!(s.y, low.eval(s.x).value());
        }
    }

    #[test]
    fn duplicate_points_are_singular() {
        assert_eq!(
            TruncationOperator::new(gf(67), &[1, 2, 2, 4], 2),
            Err(SharingError::SingularVandermonde { n: 4, prime: 67 })
        );
    }

    #[test]
    fn operator_rejects_unaligned_shares() {
        let op = TruncationOperator::new(gf(67), &[1, 2, 3], 2).unwrap();
        let shares = [Share::new(1, 0), Share::new(3, 0), Share::new(2, 0)];
        assert_eq!(
            op.apply(&shares),
            Err(SharingError::ShareMismatch(Mismatch::Coordinate {
                index: 1,
                left: 2,
                right: 3
            }))
        );
        assert!(matches!(
            op.apply(&shares[..2]),
            Err(SharingError::ShareMismatch(Mismatch::Length { .. }))
        ));
    }

    #[test]
    fn mask_vanishes_at_zero() {
        let f = gf(67);
        let mut rng = StdRng::seed_from_u64(2);
        for t in 1..5 {
            let q = random_mask(f, 7, t, &mut rng).unwrap();
            assert_eq!(q.degree(), 2 * (t - 1));
            assert!(q.eval(0).is_zero());
        }
    }

    #[test]
    fn reduction_restores_threshold() {
        let f = gf(67);
        let mut rng = StdRng::seed_from_u64(3);
        let xs = share(f, 3, 5, 2, &mut rng).unwrap();
        let ys = share(f, 4, 5, 2, &mut rng).unwrap();
        let zs = mult_shares(f, &xs, &ys).unwrap();
        for policy in [MaskPolicy::Randomized, MaskPolicy::Disabled] {
            let reduced = degree_reduction_with(f, &zs, 2, policy, &mut rng).unwrap();
            for pair in reduced.windows(2) {
                assert_eq!(reconstruct(f, pair).unwrap(), 12);
            }
        }
    }

    #[test]
    fn masking_changes_the_sharing() {
        let f = gf(104_729);
        let mut rng = StdRng::seed_from_u64(4);
        let xs = share(f, 11, 7, 3, &mut rng).unwrap();
        let ys = share(f, 13, 7, 3, &mut rng).unwrap();
        let zs = mult_shares(f, &xs, &ys).unwrap();
        let plain = degree_reduction_with(f, &zs, 3, MaskPolicy::Disabled, &mut rng).unwrap();
        let masked = degree_reduction(f, &zs, 3, &mut rng).unwrap();
        assert_ne!(plain, masked);
        assert_eq!(reconstruct(f, &plain[..3]).unwrap(), 143);
        assert_eq!(reconstruct(f, &masked[4..]).unwrap(), 143);
    }

    #[test]
    fn too_few_shares_for_reduction() {
        let f = gf(67);
        let mut rng = StdRng::seed_from_u64(5);
        let zs = [Share::new(1, 1), Share::new(2, 2), Share::new(3, 3)];
        assert_eq!(
            degree_reduction(f, &zs, 3, &mut rng),
            Err(SharingError::InvalidParameters(
                ParameterError::InsufficientSharesForReduction {
                    threshold: 3,
                    share_count: 3,
                    required: 5
                }
            ))
        );
        assert_eq!(
            degree_reduction(f, &[], 2, &mut rng),
            Err(SharingError::EmptyShareSet)
        );
    }

    #[test]
    fn huge_threshold_is_rejected() {
        let f = gf(67);
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(
            degree_reduction(f, &[Share::new(1, 1)], usize::MAX, &mut rng),
            Err(SharingError::InvalidParameters(
                ParameterError::ThresholdExceedsShareCount {
                    threshold: usize::MAX,
                    share_count: 1
                }
            ))
        );
        assert!(matches!(
            random_mask(f, usize::MAX, usize::MAX, &mut rng),
            Err(SharingError::InvalidParameters(
                ParameterError::InsufficientSharesForReduction {
                    required: usize::MAX,
                    ..
                }
            ))
        ));
        assert_eq!(product_share_count(usize::MAX), None);
        assert_eq!(product_share_count(0), Some(1));
        assert_eq!(product_share_count(3), Some(5));
    }

    #[test]
    fn accepts_a_dyn_rng() {
        let f = gf(67);
        let mut seeded = StdRng::seed_from_u64(8);
        let rng: &mut dyn rand::RngCore = &mut seeded;
        let xs = crate::shamir::share(f, 5, 5, 2, rng).unwrap();
        let ys = crate::shamir::share(f, 6, 5, 2, rng).unwrap();
        let zs = mult_shares(f, &xs, &ys).unwrap();
        let reduced = degree_reduction(f, &zs, 2, rng).unwrap();
        assert_eq!(reconstruct(f, &reduced[3..]).unwrap(), 30);
    }
}
