//! Shamir secret sharing over GF(pp).
//!
//! A secret `s` is hidden as the constant term of a random polynomial of degree at most
//! `t - 1`; party `i` holds the evaluation at `x = i`. Any `t` shares recover
//! `s` by Lagrange interpolation at zero, and any `t - 1` reveal nothing.
//!
//! [`reconstruct`] cannot tell how many shares the sharing needs. Fewer than
//! the threshold still interpolate to *some* field element, which is not the
//! secret. Supplying enough shares is part of the caller's contract.

use rand::Rng;
use tracing::{debug, trace};

use crate::error::{ParameterError, Result, SharingError};
use crate::field::PrimeField;
use crate::lagrange::interpolate_at_zero;
use crate::polynomial::Poly;

/// One evaluation `(x, y = P(x))` of a sharing polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Share {
    /// Evaluation point. Never zero for shares produced by [`share`].
    pub x: u64,
    pub y: u64,
}

impl Share {
    pub fn new(x: u64, y: u64) -> Self {
        Share { x, y }
    }
}

impl From<(u64, u64)> for Share {
    fn from((x, y): (u64, u64)) -> Self {
        Share { x, y }
    }
}

impl From<Share> for (u64, u64) {
    fn from(share: Share) -> Self {
        (share.x, share.y)
    }
}

/// Checks the `Share` preconditions: `1 <= t <= n`, `secret < pp`, `pp > n`.
pub(crate) fn check_parameters(
    field: PrimeField,
    secret: u64,
    n: usize,
    t: usize,
) -> Result<()> {
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
    if !field.contains(secret) {
        return Err(ParameterError::SecretOutOfField {
            secret,
            prime: field.prime(),
        }
        .into());
    }
    if u64::try_from(n).map_or(true, |n| field.prime() <= n) {
        return Err(ParameterError::FieldTooSmall {
            prime: field.prime(),
            share_count: n,
        }
        .into());
    }
    Ok(())
}

/// Split `secret` into `n` shares at `x = 1..=n`, any `t` of which reconstruct it.
pub fn share<R: Rng + ?Sized>(
    field: PrimeField,
    secret: u64,
    n: usize,
    t: usize,
    rng: &mut R,
) -> Result<Vec<Share>> {
    check_parameters(field, secret, n, t)?;
    debug!(prime = field.prime(), n, t, "sharing secret");

    let poly = Poly::random_with_constant(field, secret, t, rng);
    let shares: Vec<Share> = (1..=n as u64)
        .map(|x| Share::new(x, poly.eval(x).value()))
        .collect();
    for s in &shares {
        trace!(x = s.x, y = s.y, "issued share");
    }
    Ok(shares)
}

/// Recover the secret from `shares` by interpolation at zero.
///
/// Every `y` must already be a field element. The x-coordinates must be
/// pairwise distinct modulo pp.
pub fn reconstruct(field: PrimeField, shares: &[Share]) -> Result<u64> {
    if shares.is_empty() {
        return Err(SharingError::EmptyShareSet);
    }
    for s in shares {
        if !field.contains(s.y) {
            return Err(SharingError::InvalidShare {
                x: s.x,
                y: s.y,
                prime: field.prime(),
            });
        }
    }
    let points: Vec<(u64, u64)> = shares.iter().map(|&s| s.into()).collect();
    let secret = interpolate_at_zero(field, &points)?.value();
    debug!(prime = field.prime(), shares = shares.len(), "reconstructed secret");
    Ok(secret)
}

/// Re-share a held share's value into `m` sub-shares at threshold `t`.
///
/// The sub-shares are an ordinary sharing of `share.y`; their own x-coordinates
/// run `1..=m` and are unrelated to `share.x`.
pub fn redistribute<R: Rng + ?Sized>(
    field: PrimeField,
    share: Share,
    m: usize,
    t: usize,
    rng: &mut R,
) -> Result<Vec<Share>> {
    if !field.contains(share.y) {
        return Err(SharingError::InvalidShare {
            x: share.x,
            y: share.y,
            prime: field.prime(),
        });
    }
    debug!(x = share.x, m, t, "redistributing share");
    self::share(field, share.y, m, t, rng)
}

/// Recover the share at `x` from sub-shares produced by [`redistribute`].
pub fn reconstruct_redistributed(field: PrimeField, x: u64, sub_shares: &[Share]) -> Result<Share> {
    Ok(Share::new(x, reconstruct(field, sub_shares)?))
}
