//! Error type

use thiserror::Error;

/// Result specialization for Faulhaber errors
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by Faulhaber sums
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Occurs when the modulus is invalid or a required inverse does not
    /// exist
    #[error(transparent)]
    Num(#[from] faulhaber_num::Error),
    /// Occurs when a power above the configured maximum is requested
    #[error("power {power} exceeds the maximum power {max_power}")]
    PowerOutOfRange {
        /// The requested power
        power: usize,
        /// The configured maximum power
        max_power: usize,
    },
    /// Occurs when the number of terms to sum is negative
    #[error("number of terms must not be negative")]
    NegativeInput,
}
