//! Quasi-Monte Carlo sequences.
//!
//! This module defines the interface for low-discrepancy sequences and a
//! Sobol generator implementing it.
//!
//! ## Construction
//!
//! - Dimension 0 is the van der Corput sequence in base 2.
//! - Dimension `j >= 1` uses the `j`-th primitive polynomial over GF(2) in
//!   order of degree then coefficient value, found by search, so any
//!   dimension up to [`MAX_DIMENSION`] is available.
//! - Points are produced in Gray-code order, one XOR per coordinate per
//!   point, and any index can be reached directly with
//!   [`LowDiscrepancySequence::skip_to`].
//! - An optional seeded digital shift XORs a random word into every
//!   coordinate. The shift preserves the net structure of the point set.

use super::prng::splitmix64;
use crate::mc::ConfigError;

/// Largest supported dimension.
pub const MAX_DIMENSION: usize = 4096;

/// Bits of precision carried by the direction numbers.
const BITS: usize = 64;

/// Initial direction numbers `m_1..m_s` for the first dimensions after
/// van der Corput. Further dimensions draw odd `m_k < 2^k` from a fixed
/// SplitMix64 stream.
const INITIAL_DIRECTIONS: [&[u64]; 15] = [
    &[1],
    &[1, 3],
    &[1, 3, 1],
    &[1, 1, 1],
    &[1, 1, 3, 3],
    &[1, 3, 5, 13],
    &[1, 1, 5, 5, 17],
    &[1, 1, 5, 5, 5],
    &[1, 1, 7, 11, 19],
    &[1, 1, 5, 1, 1],
    &[1, 1, 1, 3, 11],
    &[1, 3, 5, 5, 31],
    &[1, 3, 3, 9, 7, 49],
    &[1, 1, 1, 15, 21, 21],
    &[1, 3, 1, 13, 27, 49],
];

/// Trait for low-discrepancy sequences used in quasi-Monte Carlo methods.
///
/// Low-discrepancy sequences provide more uniform coverage of the unit hypercube
/// compared to pseudo-random sequences, often leading to faster convergence in
/// numerical integration problems.
pub trait LowDiscrepancySequence {
    /// Returns the dimensionality of the sequence.
    fn dimension(&self) -> usize;

    /// Index of the point the next call to [`next_point`](Self::next_point) returns.
    fn index(&self) -> u64;

    /// Advances the sequence and returns the next point.
    ///
    /// A slice of `dimension()` values, each in the open interval (0, 1).
    fn next_point(&mut self) -> &[f64];

    /// Resets the sequence to its initial state.
    ///
    /// After calling this method, the sequence will produce the same
    /// points as a newly initialised instance.
    fn reset(&mut self);

    /// Positions the sequence so that the next point is the one at `index`.
    ///
    /// Workers processing disjoint index ranges of one sequence jump
    /// straight to the start of their range.
    fn skip_to(&mut self, index: u64);
}

/// Sobol sequence generator.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{LowDiscrepancySequence, SobolSequence};
///
/// let mut sobol = SobolSequence::new(2).unwrap();
/// sobol.next_point();
/// let second = sobol.next_point().to_vec();
/// assert!((second[0] - 0.5).abs() < 1e-12);
/// assert!((second[1] - 0.5).abs() < 1e-12);
///
/// // Random access agrees with sequential generation
/// let mut jumped = SobolSequence::new(2).unwrap();
/// jumped.skip_to(1);
/// assert_eq!(jumped.next_point(), second.as_slice());
/// ```
#[derive(Clone, Debug)]
pub struct SobolSequence {
    /// Direction numbers, `BITS` per dimension, dimension-major.
    directions: Vec<u64>,
    /// Digital shift per dimension (zero when unscrambled).
    shift: Vec<u64>,
    /// Unshifted integer coordinates of the point at `index`.
    state: Vec<u64>,
    /// Output buffer for the current point.
    point: Vec<f64>,
    /// Index of the next point.
    index: u64,
}

impl SobolSequence {
    /// Creates an unscrambled Sobol sequence.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidDimension` if `dimension` is 0 or exceeds
    /// [`MAX_DIMENSION`].
    pub fn new(dimension: usize) -> Result<Self, ConfigError> {
        if dimension == 0 || dimension > MAX_DIMENSION {
            return Err(ConfigError::InvalidDimension {
                dimension,
                max: MAX_DIMENSION,
            });
        }

        let polynomials = primitive_polynomials(dimension.saturating_sub(1));
        let mut directions = Vec::with_capacity(dimension * BITS);
        directions.extend(van_der_corput_directions());
        for (j, &(degree, coefficients)) in polynomials.iter().enumerate() {
            let initial = initial_directions(j, degree);
            directions.extend(polynomial_directions(degree, coefficients, &initial));
        }

        Ok(Self {
            directions,
            shift: vec![0; dimension],
            state: vec![0; dimension],
            point: vec![0.0; dimension],
            index: 0,
        })
    }

    /// Creates a Sobol sequence with a seeded digital shift.
    ///
    /// Equal seeds give identical point sets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::{LowDiscrepancySequence, SobolSequence};
    ///
    /// let mut a = SobolSequence::scrambled(8, 42).unwrap();
    /// let mut b = SobolSequence::scrambled(8, 42).unwrap();
    /// assert_eq!(a.next_point(), b.next_point());
    /// ```
    pub fn scrambled(dimension: usize, seed: u64) -> Result<Self, ConfigError> {
        let mut sequence = Self::new(dimension)?;
        let mut state = splitmix64(seed);
        for shift in sequence.shift.iter_mut() {
            *shift = state;
            state = splitmix64(state);
        }
        Ok(sequence)
    }

    #[inline]
    fn direction(&self, dim: usize, bit: usize) -> u64 {
        self.directions[dim * BITS + bit]
    }
}

impl LowDiscrepancySequence for SobolSequence {
    fn dimension(&self) -> usize {
        self.state.len()
    }

    fn index(&self) -> u64 {
        self.index
    }

    fn next_point(&mut self) -> &[f64] {
        for (value, (&x, &shift)) in self
            .point
            .iter_mut()
            .zip(self.state.iter().zip(self.shift.iter()))
        {
            *value = to_unit_interval(x ^ shift);
        }

        // Gray code: point n+1 differs from point n in the bit that flips
        // at the lowest zero bit of n
        let bit = (self.index.trailing_ones() as usize).min(BITS - 1);
        for dim in 0..self.state.len() {
            self.state[dim] ^= self.direction(dim, bit);
        }
        self.index = self.index.wrapping_add(1);

        &self.point
    }

    fn reset(&mut self) {
        self.skip_to(0);
    }

    fn skip_to(&mut self, index: u64) {
        let gray = index ^ (index >> 1);
        for dim in 0..self.state.len() {
            let mut x = 0;
            for bit in 0..BITS {
                if (gray >> bit) & 1 == 1 {
                    x ^= self.direction(dim, bit);
                }
            }
            self.state[dim] = x;
        }
        self.index = index;
    }
}

/// Maps a 64-bit word to the open interval (0, 1), never hitting either end.
#[inline]
fn to_unit_interval(x: u64) -> f64 {
    const SCALE: f64 = 1.0 / (1u64 << 52) as f64;
    ((x >> 12) as f64 + 0.5) * SCALE
}

fn van_der_corput_directions() -> impl Iterator<Item = u64> {
    (0..BITS).map(|k| 1u64 << (BITS - 1 - k))
}

/// Direction numbers from the Bratley-Fox recurrence on a primitive
/// polynomial `x^s + a_1 x^(s-1) + ... + a_(s-1) x + 1`.
fn polynomial_directions(degree: usize, coefficients: u64, initial: &[u64]) -> Vec<u64> {
    let mut v = vec![0u64; BITS];
    for (k, &m) in initial.iter().enumerate().take(degree) {
        v[k] = m << (BITS - 1 - k);
    }
    for k in degree..BITS {
        let mut x = v[k - degree] ^ (v[k - degree] >> degree);
        for i in 1..degree {
            if (coefficients >> (degree - 1 - i)) & 1 == 1 {
                x ^= v[k - i];
            }
        }
        v[k] = x;
    }
    v
}

/// `m_1..m_s` for the polynomial dimension `j` (0-based after van der Corput).
fn initial_directions(j: usize, degree: usize) -> Vec<u64> {
    if let Some(table) = INITIAL_DIRECTIONS.get(j) {
        return table.to_vec();
    }
    let mut state = splitmix64(j as u64);
    (1..=degree)
        .map(|k| {
            state = splitmix64(state);
            (state % (1u64 << k)) | 1
        })
        .collect()
}

/// The first `count` primitive polynomials `(degree, middle coefficients)`.
fn primitive_polynomials(count: usize) -> Vec<(usize, u64)> {
    let mut found = Vec::with_capacity(count);
    let mut degree = 1;
    while found.len() < count {
        for coefficients in 0..(1u64 << (degree - 1)) {
            if found.len() == count {
                break;
            }
            if is_primitive(degree as u32, coefficients) {
                found.push((degree, coefficients));
            }
        }
        degree += 1;
    }
    found
}

/// Whether `x` generates the full multiplicative group modulo the polynomial.
fn is_primitive(degree: u32, coefficients: u64) -> bool {
    let poly = (1u64 << degree) | (coefficients << 1) | 1;
    let order = (1u64 << degree) - 1;
    // x reduced modulo the polynomial; for degree 1, x ≡ 1 mod (x + 1)
    let x = if degree > 1 { 2 } else { 2 ^ poly };

    if gf2_powmod(x, order, poly, degree) != 1 {
        return false;
    }
    prime_factors(order)
        .into_iter()
        .all(|q| gf2_powmod(x, order / q, poly, degree) != 1)
}

fn gf2_mulmod(mut a: u64, mut b: u64, poly: u64, degree: u32) -> u64 {
    let mut product = 0;
    while b != 0 {
        if b & 1 == 1 {
            product ^= a;
        }
        b >>= 1;
        a <<= 1;
        if (a >> degree) & 1 == 1 {
            a ^= poly;
        }
    }
    product
}

fn gf2_powmod(base: u64, mut exponent: u64, poly: u64, degree: u32) -> u64 {
    let mut result = 1;
    let mut base = base;
    while exponent != 0 {
        if exponent & 1 == 1 {
            result = gf2_mulmod(result, base, poly, degree);
        }
        base = gf2_mulmod(base, base, poly, degree);
        exponent >>= 1;
    }
    result
}

fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            factors.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn take(sequence: &mut SobolSequence, n: usize) -> Vec<Vec<f64>> {
        (0..n).map(|_| sequence.next_point().to_vec()).collect()
    }

    #[test]
    fn test_rejects_invalid_dimension() {
        assert!(matches!(
            SobolSequence::new(0),
            Err(ConfigError::InvalidDimension { dimension: 0, .. })
        ));
        assert!(SobolSequence::new(MAX_DIMENSION + 1).is_err());
    }

    #[test]
    fn test_primitive_polynomial_order() {
        let polys = primitive_polynomials(12);
        assert_eq!(
            polys,
            vec![
                (1, 0),
                (2, 1),
                (3, 1),
                (3, 2),
                (4, 1),
                (4, 4),
                (5, 2),
                (5, 4),
                (5, 7),
                (5, 11),
                (5, 13),
                (5, 14)
            ]
        );
    }

    #[test]
    fn test_first_points_reference_values() {
        let mut sobol = SobolSequence::new(3).unwrap();
        let points = take(&mut sobol, 8);
        let expected = [
            [0.0, 0.0, 0.0],
            [0.5, 0.5, 0.5],
            [0.75, 0.25, 0.25],
            [0.25, 0.75, 0.75],
            [0.375, 0.375, 0.625],
            [0.875, 0.875, 0.125],
            [0.625, 0.125, 0.875],
            [0.125, 0.625, 0.375],
        ];
        for (point, want) in points.iter().zip(expected.iter()) {
            for (x, w) in point.iter().zip(want.iter()) {
                assert_relative_eq!(*x, *w, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_points_strictly_inside_unit_interval() {
        let mut sobol = SobolSequence::new(5).unwrap();
        for point in take(&mut sobol, 1024) {
            assert!(point.iter().all(|&u| u > 0.0 && u < 1.0));
        }
    }

    #[test]
    fn test_skip_to_matches_sequential() {
        let mut sequential = SobolSequence::scrambled(20, 9).unwrap();
        let points = take(&mut sequential, 300);

        let mut jumped = SobolSequence::scrambled(20, 9).unwrap();
        for &start in &[0u64, 1, 7, 128, 255, 299] {
            jumped.skip_to(start);
            assert_eq!(jumped.index(), start);
            assert_eq!(jumped.next_point(), points[start as usize].as_slice());
        }
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut sobol = SobolSequence::scrambled(4, 3).unwrap();
        let first = sobol.next_point().to_vec();
        take(&mut sobol, 10);
        sobol.reset();
        assert_eq!(sobol.next_point(), first.as_slice());
    }

    #[test]
    fn test_one_dimensional_stratification() {
        // Every 1-D projection of the first 2^k points hits each dyadic
        // interval of width 2^-k exactly once, scrambled or not
        let dimension = 40;
        let k = 8;
        let n = 1usize << k;
        let mut sobol = SobolSequence::scrambled(dimension, 1234).unwrap();
        let points = take(&mut sobol, n);
        for dim in 0..dimension {
            let mut hits = vec![0usize; n];
            for point in &points {
                hits[(point[dim] * n as f64) as usize] += 1;
            }
            assert!(hits.iter().all(|&h| h == 1), "dimension {} not stratified", dim);
        }
    }

    #[test]
    fn test_two_dimensional_mean_close_to_half() {
        let mut sobol = SobolSequence::scrambled(2, 77).unwrap();
        let n = 4096;
        let mut sum = [0.0; 2];
        for _ in 0..n {
            let p = sobol.next_point();
            sum[0] += p[0];
            sum[1] += p[1];
        }
        assert_relative_eq!(sum[0] / n as f64, 0.5, epsilon = 1e-3);
        assert_relative_eq!(sum[1] / n as f64, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_different_seeds_different_shifts() {
        let mut a = SobolSequence::scrambled(3, 1).unwrap();
        let mut b = SobolSequence::scrambled(3, 2).unwrap();
        assert_ne!(a.next_point(), b.next_point());
    }

    #[test]
    fn test_generated_directions_are_odd_and_bounded() {
        for j in INITIAL_DIRECTIONS.len()..INITIAL_DIRECTIONS.len() + 50 {
            let m = initial_directions(j, 7);
            for (k, &mk) in m.iter().enumerate() {
                assert_eq!(mk & 1, 1);
                assert!(mk < 1 << (k + 1));
            }
        }
    }

    #[test]
    fn test_max_dimension_constructs() {
        let mut sobol = SobolSequence::new(MAX_DIMENSION).unwrap();
        assert_eq!(sobol.dimension(), MAX_DIMENSION);
        assert_eq!(sobol.next_point().len(), MAX_DIMENSION);
    }
}
