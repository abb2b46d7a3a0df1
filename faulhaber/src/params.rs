use crate::Result;
use faulhaber_num::Modulus;
use serde::{de, Deserialize, Deserializer};
use std::cmp;

/// Parameters of a Faulhaber engine: the largest supported power and the
/// modulus.
///
/// Parameters are only ever constructed valid: the modulus is greater than
/// one and every divisor the engine can need (`2 ..= max_power + 1`) is
/// invertible modulo it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Params {
    max_power: usize,
    modulus: Modulus,
}

impl Params {
    /// Creates new parameters, checking that they are usable
    pub fn new(max_power: usize, modulus: u64) -> Result<Params> {
        let modulus = Modulus::new(modulus)?;
        Self { max_power, modulus }.check()
    }

    fn check(self) -> Result<Params> {
        for divisor in self.divisors() {
            self.modulus.inverse(divisor)?;
        }
        Ok(self)
    }

    /// Gets the divisors the engine inverts: 2 for the seed of *B(1)*, and
    /// *p + 1* for every supported power *p*.
    fn divisors(&self) -> impl Iterator<Item = u64> {
        2..=cmp::max(2, self.max_power as u64 + 1)
    }

    /// Gets the largest supported power
    pub fn max_power(&self) -> usize {
        self.max_power
    }

    /// Gets the modulus
    pub fn modulus(&self) -> Modulus {
        self.modulus
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ParamsRaw::deserialize(deserializer)?
            .check()
            .map_err(de::Error::custom)
    }
}

#[derive(Deserialize)]
#[serde(remote = "Params")]
struct ParamsRaw {
    max_power: usize,
    modulus: Modulus,
}
