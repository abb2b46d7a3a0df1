//! Error type

use thiserror::Error;

/// Result specialization for numeric errors
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by modular arithmetic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Occurs when a modulus is not greater than one
    #[error("invalid modulus {0}: must be greater than 1")]
    InvalidModulus(u64),
    /// Occurs when an inverse is requested for a value that shares a factor
    /// with the modulus
    #[error("{value} has no inverse modulo {modulus}")]
    NonInvertible {
        /// The value that was to be inverted
        value: u64,
        /// The modulus it was to be inverted under
        modulus: u64,
    },
}
