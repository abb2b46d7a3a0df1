use crate::Modulus;
use std::iter;

/// Precomputed table of binomial coefficients reduced modulo *m*
///
/// Row *r* holds `C(r, 0) ..= C(r, r)` followed by one zero slot, so that
/// Pascal's rule never needs to special-case the edge of the triangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinomialTable {
    table: Vec<Vec<u64>>,
}

impl BinomialTable {
    /// Creates a new table with enough rows for sums of powers up to
    /// `max_power`, i.e. rows `0 ..= max_power + 1`.
    pub fn new(max_power: usize, modulus: &Modulus) -> BinomialTable {
        let rows = max_power + 2;
        let mut table = Vec::new();
        table.reserve_exact(rows);

        table.extend(
            iter::successors(Some(vec![1, 0]), |prev: &Vec<u64>| {
                let r = prev.len() - 1;
                let mut row = vec![0; r + 2];
                row[0] = 1;
                for c in 1..=r {
                    row[c] = modulus.add(prev[c - 1], prev[c]);
                }
                Some(row)
            })
            .take(rows),
        );
        BinomialTable { table }
    }

    /// Gets `C(row, col) mod m`; zero whenever `col > row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not in the table.
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.table[row].get(col).copied().unwrap_or(0)
    }

    /// Gets the coefficients `C(r, 0) ..= C(r, r)` of row *r*
    pub fn row(&self, r: usize) -> &[u64] {
        &self.table[r][..=r]
    }

    /// Gets the number of rows in the table
    pub fn rows(&self) -> usize {
        self.table.len()
    }
}
