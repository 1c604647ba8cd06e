use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::Result;
use crate::field::PrimeField;

// Carries its field by value (a single u64), so operands from different
// fields are a logic error caught in debug builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: u64,
    field: PrimeField,
}

impl FieldElement {
    pub fn new(field: PrimeField, value: u64) -> Self {
        Self {
            value: field.reduce(value),
            field,
        }
    }

    /// Canonical representative in `[0, pp)`.
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn field(&self) -> PrimeField {
        self.field
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    pub fn pow(self, exp: u64) -> Self {
        Self::new(self.field, self.field.pow(self.value, exp))
    }

    pub fn inverse(self) -> Result<Self> {
        Ok(Self::new(self.field, self.field.inverse(self.value)?))
    }

    pub fn checked_div(self, rhs: &Self) -> Result<Self> {
        Ok(self * &rhs.inverse()?)
    }
}

impl Add<&FieldElement> for FieldElement {
    type Output = Self;

    fn add(self, rhs: &Self) -> Self::Output {
        debug_assert_eq!(self.field, rhs.field);
        Self::new(self.field, self.field.add(self.value, rhs.value))
    }
}

impl Sub<&FieldElement> for FieldElement {
    type Output = Self;

    fn sub(self, rhs: &Self) -> Self::Output {
        debug_assert_eq!(self.field, rhs.field);
        Self::new(self.field, self.field.sub(self.value, rhs.value))
    }
}

impl Mul<&FieldElement> for FieldElement {
    type Output = Self;

    fn mul(self, rhs: &Self) -> Self::Output {
        debug_assert_eq!(self.field, rhs.field);
        Self::new(self.field, self.field.mul(self.value, rhs.value))
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        *self * rhs
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(self.field, self.field.neg(self.value))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
