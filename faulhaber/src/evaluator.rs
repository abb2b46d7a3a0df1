use crate::{BernoulliCache, Error, Params, Result};
use faulhaber_num::{BinomialTable, IntoResidue, Modulus};
use tracing::debug;

/// An engine for sums of powers `1^p + 2^p + … + n^p` modulo a fixed *m*.
///
/// See [Faulhaber's formula](https://en.wikipedia.org/wiki/Faulhaber%27s_formula).
/// The binomial table is built when the engine is created; Bernoulli numbers
/// are computed the first time a query needs them and kept for later queries.
#[derive(Clone, Debug)]
pub struct Faulhaber {
    params: Params,
    binomials: BinomialTable,
    bernoulli: BernoulliCache,
}

impl Faulhaber {
    /// Creates a new engine supporting powers up to `max_power` modulo
    /// `modulus`.
    ///
    /// Fails if `modulus < 2` or if any of `2 ..= max_power + 1` shares a
    /// factor with `modulus`.
    pub fn new(max_power: usize, modulus: u64) -> Result<Faulhaber> {
        Self::from_params(&Params::new(max_power, modulus)?)
    }

    /// Creates a new engine from checked parameters
    pub fn from_params(params: &Params) -> Result<Faulhaber> {
        let modulus = params.modulus();
        let binomials = BinomialTable::new(params.max_power(), &modulus);
        let bernoulli = BernoulliCache::new(&modulus)?;
        debug!(
            max_power = params.max_power(),
            modulus = modulus.value(),
            "created Faulhaber engine"
        );
        Ok(Faulhaber {
            params: *params,
            binomials,
            bernoulli,
        })
    }

    /// Gets the parameters of this engine
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Gets the modulus
    pub fn modulus(&self) -> Modulus {
        self.params.modulus()
    }

    /// Gets the largest supported power
    pub fn max_power(&self) -> usize {
        self.params.max_power()
    }

    /// Computes `1^p + 2^p + … + n^p mod m`.
    ///
    /// `n` can be any unsigned integer, or a `rug::Integer` of arbitrary
    /// size.
    pub fn sum_of_powers<N: IntoResidue>(&mut self, n: N, p: usize) -> Result<u64> {
        self.check_power(p)?;
        let m = self.modulus();
        let n = n.into_residue(&m).ok_or(Error::NegativeInput)?;
        self.warm_up_to(p)?;

        let row = p + 1;
        let mut sum = 0;
        for power in 0..=p {
            let b = self.bernoulli.number(power, &self.binomials, &m)?;
            let coefficient = m.mul(self.binomials.get(row, power), b);
            let term = m.mul(coefficient, m.pow(n, (row - power) as u64));
            sum = if power % 2 == 1 {
                m.sub(sum, term)
            } else {
                m.add(sum, term)
            };
        }

        let inv = m.inverse(row as u64)?;
        Ok(m.mul(sum, inv))
    }

    /// Gets the *p*-th Bernoulli number modulo *m* (with *B(1) = -1/2*)
    pub fn bernoulli(&mut self, p: usize) -> Result<u64> {
        self.check_power(p)?;
        let m = self.modulus();
        self.bernoulli.number(p, &self.binomials, &m)
    }

    /// Gets the binomial coefficient `C(row, col) mod m`.
    ///
    /// # Panics
    ///
    /// Panics if `row > max_power + 1`.
    pub fn binomial(&self, row: usize, col: usize) -> u64 {
        self.binomials.get(row, col)
    }

    /// Computes every Bernoulli number this engine can use, so that later
    /// queries only read the cache.
    pub fn warm_up(&mut self) -> Result<()> {
        self.warm_up_to(self.max_power())
    }

    /// Gets the number of Bernoulli numbers computed so far
    pub fn cached_bernoulli_numbers(&self) -> usize {
        self.bernoulli.len()
    }

    fn warm_up_to(&mut self, p: usize) -> Result<()> {
        let before = self.bernoulli.len();
        let m = self.modulus();
        self.bernoulli.warm_up(p, &self.binomials, &m)?;
        if self.bernoulli.len() > before {
            debug!(
                from = before,
                to = self.bernoulli.len(),
                "extended Bernoulli cache"
            );
        }
        Ok(())
    }

    fn check_power(&self, p: usize) -> Result<()> {
        if p > self.max_power() {
            Err(Error::PowerOutOfRange {
                power: p,
                max_power: self.max_power(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::Faulhaber;
    use crate::{Error, Params};
    use faulhaber_num::{Error as NumError, Modulus};
    use rand::{thread_rng, Rng};
    use rug::Integer;

    const P: u64 = 1_000_000_007;

    fn brute_force(n: u64, p: usize, m: &Modulus) -> u64 {
        (1..=n).fold(0, |sum, i| m.add(sum, m.pow(i, p as u64)))
    }

    #[test]
    fn sum_of_squares_up_to_ten() {
        let mut sums = Faulhaber::new(3, P).unwrap();
        assert_eq!(sums.sum_of_powers(10u64, 2).unwrap(), 385);
    }

    #[test]
    fn sum_up_to_five_modulo_small_prime() {
        let mut sums = Faulhaber::new(2, 97).unwrap();
        assert_eq!(sums.sum_of_powers(5u64, 1).unwrap(), 15);
    }

    #[test]
    fn sum_of_cubes_for_huge_n_matches_closed_form() {
        let mut sums = Faulhaber::new(4, P).unwrap();
        let m = sums.modulus();
        let n: u64 = 1_000_000_000_000;

        let nm = m.reduce(n);
        let n1 = m.reduce(n + 1);
        let expected = m.mul(
            m.mul(m.mul(nm, nm), m.mul(n1, n1)),
            m.inverse(4).unwrap(),
        );
        assert_eq!(sums.sum_of_powers(n, 3).unwrap(), expected);
    }

    #[test]
    fn sum_of_powers_matches_brute_force() {
        for &m in [P, 998_244_353, 97, 101, 1_000_003].iter() {
            let mut sums = Faulhaber::new(10, m).unwrap();
            let modulus = sums.modulus();
            for p in 0..=10 {
                for n in 0..=300 {
                    assert_eq!(
                        sums.sum_of_powers(n, p).unwrap(),
                        brute_force(n, p, &modulus),
                        "n = {}, p = {}, m = {}",
                        n,
                        p,
                        m
                    );
                }
            }
        }
    }

    #[test]
    fn sum_of_powers_matches_brute_force_for_random_inputs() {
        let mut rng = thread_rng();
        let mut sums = Faulhaber::new(20, P).unwrap();
        let m = sums.modulus();
        for _ in 0..32 {
            let n = rng.gen_range(0, 20_000);
            let p = rng.gen_range(0, 21);
            assert_eq!(
                sums.sum_of_powers(n, p).unwrap(),
                brute_force(n, p, &m),
                "n = {}, p = {}",
                n,
                p
            );
        }
    }

    #[test]
    fn sum_of_powers_under_composite_modulus() {
        // 7 * 11 * 13: every divisor up to 6 is invertible
        let mut sums = Faulhaber::new(5, 1001).unwrap();
        let m = sums.modulus();
        for p in 0..=5 {
            for n in 0..=600 {
                assert_eq!(
                    sums.sum_of_powers(n, p).unwrap(),
                    brute_force(n, p, &m),
                    "n = {}, p = {}",
                    n,
                    p
                );
            }
        }
    }

    #[test]
    fn n_past_the_modulus_wraps() {
        let mut sums = Faulhaber::new(4, 101).unwrap();
        let m = sums.modulus();
        for p in 0..=4 {
            for &n in [100u64, 101, 102, 202, 303, 1000].iter() {
                assert_eq!(
                    sums.sum_of_powers(n, p).unwrap(),
                    brute_force(n, p, &m),
                    "n = {}, p = {}",
                    n,
                    p
                );
            }
        }
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        let mut sums = Faulhaber::new(8, P).unwrap();
        for p in 0..=8 {
            assert_eq!(sums.sum_of_powers(0u64, p).unwrap(), 0, "p = {}", p);
        }
    }

    #[test]
    fn sum_of_zeroth_powers_counts_terms() {
        let mut sums = Faulhaber::new(2, 97).unwrap();
        for n in 0..500u64 {
            assert_eq!(sums.sum_of_powers(n, 0).unwrap(), n % 97);
        }
    }

    #[test]
    fn last_term_uses_first_power_of_n() {
        // The final term of the formula is C(p+1, p) B(p) n, so this pins
        // the exponent at the end of the loop at one, never zero.
        let mut sums = Faulhaber::new(1, P).unwrap();
        let m = sums.modulus();
        // (n^2 + n) / 2
        let n = 123_456_789_012u64;
        let nm = m.reduce(n);
        let expected = m.mul(m.add(m.mul(nm, nm), nm), m.inverse(2).unwrap());
        assert_eq!(sums.sum_of_powers(n, 1).unwrap(), expected);
        assert_eq!(m.pow(n, 0), 1);
    }

    #[test]
    fn results_are_deterministic_and_order_independent() {
        let mut forward = Faulhaber::new(6, P).unwrap();
        let mut backward = Faulhaber::new(6, P).unwrap();
        let n = 987_654_321u64;

        let first: Vec<_> = (0..=6)
            .map(|p| forward.sum_of_powers(n, p).unwrap())
            .collect();
        let mut second: Vec<_> = (0..=6)
            .rev()
            .map(|p| backward.sum_of_powers(n, p).unwrap())
            .collect();
        second.reverse();
        let again: Vec<_> = (0..=6)
            .map(|p| forward.sum_of_powers(n, p).unwrap())
            .collect();

        assert_eq!(first, second);
        assert_eq!(first, again);
    }

    #[test]
    fn results_stay_in_range() {
        let mut rng = thread_rng();
        let mut sums = Faulhaber::new(12, 97).unwrap();
        for _ in 0..256 {
            let n: u64 = rng.gen();
            let p = rng.gen_range(0, 13);
            assert!(sums.sum_of_powers(n, p).unwrap() < 97);
        }
    }

    #[test]
    fn huge_integers_agree_with_their_residues() {
        let mut sums = Faulhaber::new(7, P).unwrap();
        let n = Integer::from(Integer::u_pow_u(10, 50)) + 12345;
        let reduced = Integer::from(&n % P).to_u64().unwrap();

        for p in 0..=7 {
            assert_eq!(
                sums.sum_of_powers(&n, p).unwrap(),
                sums.sum_of_powers(reduced, p).unwrap(),
                "p = {}",
                p
            );
        }
    }

    #[test]
    fn negative_integers_are_rejected() {
        let mut sums = Faulhaber::new(2, P).unwrap();
        assert_eq!(
            sums.sum_of_powers(Integer::from(-5), 1),
            Err(Error::NegativeInput)
        );
    }

    #[test]
    fn powers_above_the_maximum_are_rejected() {
        let mut sums = Faulhaber::new(3, P).unwrap();
        assert_eq!(
            sums.sum_of_powers(10u64, 4),
            Err(Error::PowerOutOfRange {
                power: 4,
                max_power: 3
            })
        );
        assert!(sums.bernoulli(4).is_err());
    }

    #[test]
    fn invalid_modulus_is_rejected() {
        assert_eq!(
            Faulhaber::new(3, 1).unwrap_err(),
            Error::Num(NumError::InvalidModulus(1))
        );
    }

    #[test]
    fn moduli_sharing_a_factor_with_a_divisor_are_rejected() {
        // p + 1 = 3 divides 3 * 5
        assert_eq!(
            Faulhaber::new(2, 15).unwrap_err(),
            Error::Num(NumError::NonInvertible {
                value: 3,
                modulus: 15
            })
        );
        // 2 is needed for B(1)
        assert!(Faulhaber::new(0, 1 << 20).is_err());
        // 7 is only needed from p = 6
        assert!(Faulhaber::new(5, 7 * 11).is_ok());
        assert!(Faulhaber::new(6, 7 * 11).is_err());
    }

    #[test]
    fn warm_up_fills_the_cache() {
        let mut sums = Faulhaber::new(9, P).unwrap();
        assert_eq!(sums.cached_bernoulli_numbers(), 2);

        sums.sum_of_powers(3u64, 4).unwrap();
        assert_eq!(sums.cached_bernoulli_numbers(), 5);

        sums.warm_up().unwrap();
        assert_eq!(sums.cached_bernoulli_numbers(), 10);

        let m = sums.modulus();
        assert_eq!(sums.bernoulli(2).unwrap(), m.inverse(6).unwrap());
        assert_eq!(sums.cached_bernoulli_numbers(), 10);
    }

    #[test]
    fn from_params_matches_new() {
        let params = Params::new(4, 97).unwrap();
        let mut a = Faulhaber::from_params(&params).unwrap();
        let mut b = Faulhaber::new(4, 97).unwrap();

        assert_eq!(a.params(), &params);
        assert_eq!(a.max_power(), 4);
        assert_eq!(a.binomial(5, 2), 10);
        assert_eq!(
            a.sum_of_powers(50u64, 4).unwrap(),
            b.sum_of_powers(50u64, 4).unwrap()
        );
    }
}
