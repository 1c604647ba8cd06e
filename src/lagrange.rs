//! Lagrange interpolation at zero over GF(pp).

use crate::error::{Result, SharingError};
use crate::field::PrimeField;
use crate::field_element::FieldElement;

/// Lagrange coefficient λ_i for the point at position `i` of `xs`.
///
/// # Formula
/// ```text
/// λ_i = ∏_{j ≠ i} (0 - x_j) / (x_i - x_j)  (mod pp)
/// ```
/// These satisfy ∑ λ_i · f(x_i) = f(0) for any f of degree below `xs.len()`.
/// A zero denominator means two x-coordinates coincide modulo pp.
///
/// # Panics
/// If `i >= xs.len()`.
pub fn lagrange_coefficient(field: PrimeField, i: usize, xs: &[u64]) -> Result<FieldElement> {
    let x_i = field.element(xs[i]);
    let mut num = field.one();
    let mut den = field.one();
    for (j, &x_j) in xs.iter().enumerate() {
        if j == i {
            continue;
        }
        let x_j = field.element(x_j);
        num = num * &(-x_j);
        den = den * &(x_i - &x_j);
    }
    if den.is_zero() {
        return Err(SharingError::DuplicateOrDegenerateShare {
            x: xs[i],
            prime: field.prime(),
        });
    }
    num.checked_div(&den)
}

/// All Lagrange coefficients for `xs`, in the same order.
pub fn lagrange_coefficients(field: PrimeField, xs: &[u64]) -> Result<Vec<FieldElement>> {
    (0..xs.len())
        .map(|i| lagrange_coefficient(field, i, xs))
        .collect()
}

/// f(0) from the point set `(x_i, y_i)`.
pub fn interpolate_at_zero(field: PrimeField, points: &[(u64, u64)]) -> Result<FieldElement> {
    let xs: Vec<u64> = points.iter().map(|&(x, _)| x).collect();
    let mut acc = field.zero();
    for (i, &(_, y)) in points.iter().enumerate() {
        let lambda = lagrange_coefficient(field, i, &xs)?;
        acc = acc + &(field.element(y) * &lambda);
    }
    Ok(acc)
}
