//! Point-wise arithmetic on sharings that use the same x-coordinates.
//!
//! Addition and scaling keep the degree, so the threshold is unchanged.
//! Multiplication doubles the degree: a product of two threshold-`t` sharings
//! needs `2t - 1` shares until it goes through
//! [`degree_reduction`](crate::reduction::degree_reduction).

use crate::error::{Mismatch, Result};
use crate::field::PrimeField;
use crate::shamir::Share;

/// Both collections must have equal length and identical x-coordinates in order.
pub fn check_aligned(lhs: &[Share], rhs: &[Share]) -> Result<()> {
    if lhs.len() != rhs.len() {
        return Err(Mismatch::Length {
            left: lhs.len(),
            right: rhs.len(),
        }
        .into());
    }
    for (index, (l, r)) in lhs.iter().zip(rhs).enumerate() {
        if l.x != r.x {
            return Err(Mismatch::Coordinate {
                index,
                left: l.x,
                right: r.x,
            }
            .into());
        }
    }
    Ok(())
}

fn pointwise(
    lhs: &[Share],
    rhs: &[Share],
    op: impl Fn(u64, u64) -> u64,
) -> Result<Vec<Share>> {
    check_aligned(lhs, rhs)?;
    Ok(lhs
        .iter()
        .zip(rhs)
        .map(|(l, r)| Share::new(l.x, op(l.y, r.y)))
        .collect())
}

/// Shares of `x + y` from shares of `x` and `y`.
pub fn add_shares(field: PrimeField, x_shares: &[Share], y_shares: &[Share]) -> Result<Vec<Share>> {
    pointwise(x_shares, y_shares, |a, b| field.add(a, b))
}

/// Shares of `x * y` from shares of `x` and `y`, at twice the degree.
pub fn mult_shares(field: PrimeField, x_shares: &[Share], y_shares: &[Share]) -> Result<Vec<Share>> {
    pointwise(x_shares, y_shares, |a, b| field.mul(a, b))
}

/// Shares of `c * x` for a public constant `c`.
pub fn scale_shares(field: PrimeField, shares: &[Share], c: u64) -> Vec<Share> {
    shares
        .iter()
        .map(|s| Share::new(s.x, field.mul(s.y, c)))
        .collect()
}
