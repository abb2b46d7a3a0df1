#![warn(missing_docs)]
#![deny(clippy::correctness)]

//! Numeric utilities for Faulhaber sums

#[macro_use]
extern crate serde_derive;

mod error;
pub use self::error::{Error, Result};

/// Arithmetic over a fixed modulus
pub mod modular;
pub use self::modular::{IntoResidue, Modulus};

/// Binomial coefficients
pub mod binomial;
pub use self::binomial::BinomialTable;
