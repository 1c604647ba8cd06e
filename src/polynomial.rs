use rand::Rng;

use crate::field::PrimeField;
use crate::field_element::FieldElement;

/// A polynomial f(x) = a0 + a1*x + ... + a_{k}*x^{k} over GF(pp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    /// Coefficients a0, a1, ..., a_k
    coeffs: Vec<FieldElement>,
    field: PrimeField,
}

impl Poly {
    /// Construct a polynomial from explicit coefficients, lowest power first.
    pub fn from_coeffs(field: PrimeField, coeffs: &[u64]) -> Self {
        Poly {
            coeffs: coeffs.iter().map(|&c| field.element(c)).collect(),
            field,
        }
    }

    /// Random polynomial of degree at most t-1 (threshold t) with `a0 = constant`.
    /// The remaining coefficients are uniform over the whole field.
    pub fn random_with_constant<R: Rng + ?Sized>(
        field: PrimeField,
        constant: u64,
        t: usize,
        rng: &mut R,
    ) -> Self {
        let mut coeffs = Vec::with_capacity(t.max(1));
        coeffs.push(field.element(constant));
        for _ in 1..t {
            coeffs.push(field.element(field.random(rng)));
        }
        Poly { coeffs, field }
    }

    pub fn coeffs(&self) -> &[FieldElement] {
        &self.coeffs
    }

    /// f(0).
    pub fn constant(&self) -> FieldElement {
        self.coeffs
            .first()
            .copied()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Degree bound (number of coefficients minus one).
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Threshold (number of coefficients).
    pub fn threshold(&self) -> usize {
        self.coeffs.len()
    }

    /// Evaluate the polynomial at x using Horner's method.
    pub fn eval(&self, x: u64) -> FieldElement {
        let x = self.field.element(x);
        let mut result = self.field.zero();
        for coeff in self.coeffs.iter().rev() {
            result = result * &x + coeff;
        }
        result
    }
}
