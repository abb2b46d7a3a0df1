use crate::{Error, Result};
use faulhaber_num::{BinomialTable, Modulus};
use tracing::trace;

/// Bernoulli numbers *B(0), B(1), …* reduced modulo *m*, computed on demand
/// and kept for reuse.
///
/// Uses the convention *B(1) = -1/2*. Each *B(p)* with *p ≥ 2* is obtained from
/// the identity `Σ_{k=0}^{p} C(p+1, k) B(k) = 0`, which needs row *p + 1* of
/// the binomial table and every lower entry, so the cache is always a prefix
/// of the sequence and only ever grows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BernoulliCache {
    values: Vec<u64>,
}

impl BernoulliCache {
    /// Creates a new cache seeded with *B(0)* and *B(1)*
    pub fn new(modulus: &Modulus) -> Result<BernoulliCache> {
        let half = modulus.inverse(2)?;
        Ok(BernoulliCache {
            values: vec![1, modulus.neg(half)],
        })
    }

    /// Gets the number of cached entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether the cache is empty, which it never is once seeded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets *B(p)* if it has already been computed
    pub fn get(&self, p: usize) -> Option<u64> {
        self.values.get(p).copied()
    }

    /// Gets *B(p) mod m*, computing and caching any missing entries up to *p*.
    pub fn number(&mut self, p: usize, table: &BinomialTable, modulus: &Modulus) -> Result<u64> {
        self.warm_up(p, table, modulus)?;
        Ok(self.values[p])
    }

    /// Computes and caches every entry up to and including *B(up_to)*.
    ///
    /// Fails with [`Error::PowerOutOfRange`] if `table` has no row
    /// `up_to + 1`.
    pub fn warm_up(&mut self, up_to: usize, table: &BinomialTable, modulus: &Modulus) -> Result<()> {
        if up_to + 1 >= table.rows() {
            return Err(Error::PowerOutOfRange {
                power: up_to,
                max_power: table.rows() - 2,
            });
        }

        while self.values.len() <= up_to {
            let p = self.values.len();
            let b = self.next(table, modulus)?;
            trace!(power = p, value = b, "computed Bernoulli number");
            self.values.push(b);
        }
        Ok(())
    }

    fn next(&self, table: &BinomialTable, modulus: &Modulus) -> Result<u64> {
        let p = self.values.len();
        let row = p + 1;

        let mut sum = modulus.add(1, modulus.mul(table.get(row, 1), self.values[1]));
        // B(k) = 0 for odd k > 1
        for k in (2..p).step_by(2) {
            sum = modulus.add(sum, modulus.mul(table.get(row, k), self.values[k]));
        }

        let inv = modulus.inverse(row as u64)?;
        Ok(modulus.neg(modulus.mul(sum, inv)))
    }
}
