use crate::{Error, Result};
use rug::Integer;
use std::convert::TryFrom;

/// A fixed modulus greater than one.
///
/// All arithmetic methods take residues in `[0, m)` and return residues in
/// `[0, m)`. Intermediate products are formed in 128 bits, so any 64-bit
/// modulus is supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Modulus(u64);

impl Modulus {
    /// Creates a new modulus, rejecting values below two.
    pub fn new(m: u64) -> Result<Modulus> {
        if m > 1 {
            Ok(Modulus(m))
        } else {
            Err(Error::InvalidModulus(m))
        }
    }

    /// Gets the value of the modulus (aka *m*)
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Reduces an arbitrary value into `[0, m)`
    pub fn reduce(&self, x: u64) -> u64 {
        x % self.0
    }

    /// Modular addition
    pub fn add(&self, a: u64, b: u64) -> u64 {
        ((a as u128 + b as u128) % self.0 as u128) as u64
    }

    /// Modular subtraction
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        self.add(a, self.neg(b))
    }

    /// Modular negation
    pub fn neg(&self, a: u64) -> u64 {
        match self.reduce(a) {
            0 => 0,
            r => self.0 - r,
        }
    }

    /// Modular multiplication
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.0 as u128) as u64
    }

    /// Computes `base^exponent mod m` by square-and-multiply.
    ///
    /// An exponent of zero yields one.
    pub fn pow(&self, base: u64, mut exponent: u64) -> u64 {
        if exponent == 0 {
            return 1;
        }

        let mut r = 1;
        let mut square = self.reduce(base);
        while exponent != 0 {
            if exponent & 1 == 1 {
                r = self.mul(r, square);
            }
            square = self.mul(square, square);
            exponent >>= 1;
        }
        r
    }

    /// Computes the multiplicative inverse of `a` with the extended Euclidean
    /// algorithm.
    ///
    /// Fails with [`Error::NonInvertible`] when `gcd(a, m) != 1`.
    pub fn inverse(&self, a: u64) -> Result<u64> {
        let m = self.0 as i128;
        let (mut t, mut next_t) = (0i128, 1i128);
        let (mut r, mut next_r) = (m, self.reduce(a) as i128);

        while next_r != 0 {
            let q = r / next_r;
            let (t0, r0) = (t, r);
            t = next_t;
            next_t = t0 - q * next_t;
            r = next_r;
            next_r = r0 - q * next_r;
        }

        if r != 1 {
            return Err(Error::NonInvertible {
                value: a,
                modulus: self.0,
            });
        }
        if t < 0 {
            t += m;
        }
        Ok(t as u64)
    }

    /// Checks whether `a` has a multiplicative inverse
    pub fn is_invertible(&self, a: u64) -> bool {
        self.inverse(a).is_ok()
    }
}

impl TryFrom<u64> for Modulus {
    type Error = Error;

    fn try_from(m: u64) -> Result<Modulus> {
        Modulus::new(m)
    }
}

impl From<Modulus> for u64 {
    fn from(m: Modulus) -> u64 {
        m.0
    }
}

/// Values that can be reduced modulo a [`Modulus`].
///
/// Returns `None` for negative values.
pub trait IntoResidue {
    /// Reduces `self` into `[0, m)`
    fn into_residue(self, modulus: &Modulus) -> Option<u64>;
}

macro_rules! impl_into_residue {
    ($($t:ty),*) => {
        $(
            impl IntoResidue for $t {
                fn into_residue(self, modulus: &Modulus) -> Option<u64> {
                    Some((self as u128 % modulus.value() as u128) as u64)
                }
            }
        )*
    };
}

impl_into_residue!(u8, u16, u32, u64, u128, usize);

impl IntoResidue for &Integer {
    fn into_residue(self, modulus: &Modulus) -> Option<u64> {
        if *self < 0 {
            return None;
        }
        Integer::from(self % modulus.value()).to_u64()
    }
}

impl IntoResidue for Integer {
    fn into_residue(self, modulus: &Modulus) -> Option<u64> {
        (&self).into_residue(modulus)
    }
}
