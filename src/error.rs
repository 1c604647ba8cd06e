//! Error types shared by every sharing operation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SharingError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharingError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
    #[error("share mismatch: {0}")]
    ShareMismatch(Mismatch),
    #[error("share ({x}, {y}) is not an element of GF({prime})")]
    InvalidShare { x: u64, y: u64, prime: u64 },
    #[error("x-coordinate {x} is duplicated or degenerate modulo {prime}")]
    DuplicateOrDegenerateShare { x: u64, prime: u64 },
    #[error("Vandermonde matrix over {n} points is singular modulo {prime}")]
    SingularVandermonde { n: usize, prime: u64 },
    #[error("{value} is not invertible modulo {prime}")]
    NotInvertible { value: u64, prime: u64 },
    #[error("operation requires at least one share")]
    EmptyShareSet,
}

/// Reasons a `(pp, secret, n, t)` combination is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("threshold {threshold} exceeds share count {share_count}")]
    ThresholdExceedsShareCount { threshold: usize, share_count: usize },
    #[error("secret {secret} is not an element of GF({prime})")]
    SecretOutOfField { secret: u64, prime: u64 },
    #[error("GF({prime}) is too small for {share_count} shares")]
    FieldTooSmall { prime: u64, share_count: usize },
    #[error("threshold must be at least 1")]
    ZeroThreshold,
    #[error("modulus {prime} is too small to define a field")]
    ModulusTooSmall { prime: u64 },
    #[error("{share_count} shares cannot hold a degree-reduced product at threshold {threshold} (need {required})")]
    InsufficientSharesForReduction {
        threshold: usize,
        share_count: usize,
        required: usize,
    },
}

/// How two share collections fail to line up point-wise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    #[error("share collections have lengths {left} and {right}")]
    Length { left: usize, right: usize },
    #[error("x-coordinates differ at position {index}: {left} != {right}")]
    Coordinate { index: usize, left: u64, right: u64 },
}

impl From<Mismatch> for SharingError {
    fn from(mismatch: Mismatch) -> Self {
        SharingError::ShareMismatch(mismatch)
    }
}
