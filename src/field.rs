use num_integer::Integer;
use rand::Rng;

use crate::error::{ParameterError, Result, SharingError};
use crate::field_element::FieldElement;

/// The prime field GF(pp) every sharing is defined over.
///
/// Elements are plain `u64` representatives in `[0, pp)`. Products are formed in
/// `u128` so any modulus that fits in a `u64` is supported. Primality of `pp` is
/// the caller's responsibility; only the size is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimeField {
    prime: u64,
}

impl PrimeField {
    pub fn new(prime: u64) -> Result<Self> {
        if prime < 2 {
            return Err(ParameterError::ModulusTooSmall { prime }.into());
        }
        Ok(Self { prime })
    }

    /// The modulus `pp`.
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Whether `value` is already a canonical representative.
    pub fn contains(&self, value: u64) -> bool {
        value < self.prime
    }

    pub fn reduce(&self, value: u64) -> u64 {
        value % self.prime
    }

    /// Wrap `value` (reduced) as a [`FieldElement`] of this field.
    pub fn element(&self, value: u64) -> FieldElement {
        FieldElement::new(*self, value)
    }

    pub fn zero(&self) -> FieldElement {
        FieldElement::new(*self, 0)
    }

    pub fn one(&self) -> FieldElement {
        FieldElement::new(*self, 1)
    }

    pub fn add(&self, a: u64, b: u64) -> u64 {
        ((a as u128 + b as u128) % self.prime as u128) as u64
    }

    pub fn sub(&self, a: u64, b: u64) -> u64 {
        let (a, b) = (self.reduce(a), self.reduce(b));
        if a >= b {
            a - b
        } else {
            self.prime - (b - a)
        }
    }

    pub fn neg(&self, a: u64) -> u64 {
        self.sub(0, a)
    }

    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.prime as u128) as u64
    }

    /// `base^exp mod pp` by square-and-multiply. Not constant time.
    pub fn pow(&self, base: u64, mut exp: u64) -> u64 {
        let mut result = self.reduce(1);
        let mut base = self.reduce(base);
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(result, base);
            }
            base = self.mul(base, base);
            exp >>= 1;
        }
        result
    }

    /// Multiplicative inverse via the extended Euclidean algorithm.
    pub fn inverse(&self, a: u64) -> Result<u64> {
        let a = self.reduce(a);
        let egcd = Integer::extended_gcd(&(a as i128), &(self.prime as i128));
        if a == 0 || egcd.gcd != 1 {
            return Err(SharingError::NotInvertible {
                value: a,
                prime: self.prime,
            });
        }
        Ok(egcd.x.rem_euclid(self.prime as i128) as u64)
    }

    /// Uniform element of `[0, pp)`.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        rng.random_range(0..self.prime)
    }
}
