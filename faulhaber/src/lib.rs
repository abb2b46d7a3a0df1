#![warn(missing_docs)]
#![deny(clippy::correctness)]

//! Sums of powers modulo *m* via Faulhaber's formula
//!
//! ```
//! use faulhaber::Faulhaber;
//!
//! let mut sums = Faulhaber::new(3, 1_000_000_007).unwrap();
//! assert_eq!(sums.sum_of_powers(10u64, 2).unwrap(), 385);
//! ```

#[macro_use]
extern crate serde_derive;

mod error;
pub use self::error::{Error, Result};

/// Parameters of a Faulhaber engine
pub mod params;
pub use self::params::Params;

/// Memoized Bernoulli numbers
pub mod bernoulli;
pub use self::bernoulli::BernoulliCache;

mod evaluator;
pub use self::evaluator::Faulhaber;

pub use faulhaber_num::{BinomialTable, IntoResidue, Modulus};
