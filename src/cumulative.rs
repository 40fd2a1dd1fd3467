//! Samplers over a normalized cumulative-weight array.
//!
//! Both map one uniform draw `p` to the first index whose cumulative
//! probability exceeds `p`; they differ only in how they search.

use num_traits::AsPrimitive;
use rand::Rng;

use crate::{IndexSampler, error::InvalidInput, weights};

/// Non-decreasing partial sums of the normalized weights.
///
/// Entry `i` is `(w[0] + ... + w[i]) / sum(w)`; the last entry is 1 up to
/// rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeTable {
    accum: Vec<f64>,
}

impl CumulativeTable {
    /// # Errors
    /// See [`InvalidInput`]: empty weights, a negative or non-finite weight,
    /// or a zero total.
    pub fn new<W: AsPrimitive<f64>>(weights: &[W]) -> Result<Self, InvalidInput> {
        let sum = weights::total(weights)?;
        let mut a = 0.0;
        let accum = weights
            .iter()
            .map(|&w| {
                a += w.as_() / sum;
                a
            })
            .collect();
        log::debug!("built cumulative table: {} weights", weights.len());
        Ok(Self { accum })
    }

    pub fn len(&self) -> usize {
        self.accum.len()
    }
    pub fn is_empty(&self) -> bool {
        self.accum.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.accum
    }

    /// First index whose cumulative value exceeds `p`, or `len()` if none
    /// does. Binary search, O(log n).
    pub fn upper_bound(&self, p: f64) -> usize {
        let accum = &self.accum;
        // the answer always lies in [first, last]
        let mut first = 0;
        let mut last = accum.len();
        while last - first > 3 {
            let mid = first + ((last - first) >> 1);
            if p < accum[mid] {
                last = mid;
            } else {
                first = mid + 1;
            }
        }
        // at most three candidates left
        accum[first..last]
            .iter()
            .position(|&c| p < c)
            .map_or(last, |k| first + k)
    }

    /// Same answer as [`upper_bound`](Self::upper_bound) by scanning from
    /// the front. O(n).
    pub fn linear_scan(&self, p: f64) -> usize {
        self.accum
            .iter()
            .position(|&c| c > p)
            .unwrap_or(self.accum.len())
    }
}

/// O(log n) sampler: binary search over a [`CumulativeTable`].
#[derive(Debug, Clone)]
pub struct BinarySearchSampler {
    table: CumulativeTable,
}

impl BinarySearchSampler {
    pub fn new<W: AsPrimitive<f64>>(weights: &[W]) -> Result<Self, InvalidInput> {
        CumulativeTable::new(weights).map(|table| Self { table })
    }

    pub fn table(&self) -> &CumulativeTable {
        &self.table
    }

    #[inline]
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.sample_with(rng.random())
    }

    /// Map a uniform `p` in `[0, 1)` to an index. A `p` that rounding puts
    /// past the last cumulative value selects the last index.
    #[inline]
    pub fn sample_with(&self, p: f64) -> usize {
        self.table.upper_bound(p).min(self.table.len() - 1)
    }
}

/// O(n) sampler: linear scan over a [`CumulativeTable`]. Mostly a baseline.
#[derive(Debug, Clone)]
pub struct LinearSearchSampler {
    table: CumulativeTable,
}

impl LinearSearchSampler {
    pub fn new<W: AsPrimitive<f64>>(weights: &[W]) -> Result<Self, InvalidInput> {
        CumulativeTable::new(weights).map(|table| Self { table })
    }

    pub fn table(&self) -> &CumulativeTable {
        &self.table
    }

    #[inline]
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.sample_with(rng.random())
    }

    #[inline]
    pub fn sample_with(&self, p: f64) -> usize {
        self.table.linear_scan(p).min(self.table.len() - 1)
    }
}

impl IndexSampler for BinarySearchSampler {
    #[inline]
    fn len(&self) -> usize {
        self.table.len()
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        BinarySearchSampler::sample_index(self, rng)
    }
}

impl IndexSampler for LinearSearchSampler {
    #[inline]
    fn len(&self) -> usize {
        self.table.len()
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        LinearSearchSampler::sample_index(self, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_frequencies, counts};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            CumulativeTable::new::<f64>(&[]),
            Err(InvalidInput::Empty)
        ));
        assert!(matches!(
            BinarySearchSampler::new(&[0.0, 0.0]),
            Err(InvalidInput::ZeroSum)
        ));
        assert!(matches!(
            LinearSearchSampler::new(&[3, -1]),
            Err(InvalidInput::Negative { index: 1, .. })
        ));
    }

    #[test]
    fn partial_sums_are_normalized() {
        let table = CumulativeTable::new(&[1u32, 2, 3, 4]).unwrap();
        let expected = [0.1, 0.3, 0.6, 1.0];
        for (a, e) in table.as_slice().iter().zip(expected) {
            assert!((a - e).abs() < 1e-12);
        }
        assert!(table.as_slice().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn upper_bound_agrees_with_partition_point() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in 1..70usize {
            // zero weights produce runs of equal cumulative values
            let weights: Vec<f64> = (0..n)
                .map(|_| if rng.random_bool(0.3) { 0.0 } else { rng.random() })
                .collect();
            let Ok(table) = CumulativeTable::new(&weights) else {
                continue;
            };
            let accum = table.as_slice();
            let mut points: Vec<f64> = accum.to_vec();
            points.extend((0..50).map(|_| rng.random::<f64>()));
            points.extend([0.0, 1.0, 2.0]);
            for p in points {
                let expected = accum.partition_point(|&c| c <= p);
                assert_eq!(table.upper_bound(p), expected, "n={n} p={p}");
                assert_eq!(table.linear_scan(p), expected, "n={n} p={p}");
            }
        }
    }

    #[test]
    fn skips_zero_weights() {
        let sampler = BinarySearchSampler::new(&[0.0, 1.0, 0.0, 1.0]).unwrap();
        assert_eq!(sampler.sample_with(0.0), 1);
        assert_eq!(sampler.sample_with(0.49), 1);
        assert_eq!(sampler.sample_with(0.5), 3);
        assert_eq!(sampler.sample_with(0.99), 3);
    }

    #[test]
    fn rounding_past_the_end_selects_last_index() {
        let binary = BinarySearchSampler::new(&[1.0, 1.0]).unwrap();
        let linear = LinearSearchSampler::new(&[1.0, 1.0]).unwrap();
        assert_eq!(binary.sample_with(1.0), 1);
        assert_eq!(linear.sample_with(1.0), 1);
    }

    #[test]
    fn one_two_three_four() {
        let weights = [1.0, 2.0, 3.0, 4.0];
        let mut rng = StdRng::seed_from_u64(42);
        let hist = counts(&BinarySearchSampler::new(&weights).unwrap(), &mut rng, 100_000);
        assert_frequencies(&hist, &weights, 5.0);
        let hist = counts(&LinearSearchSampler::new(&weights).unwrap(), &mut rng, 100_000);
        assert_frequencies(&hist, &weights, 5.0);
    }

    #[test]
    fn uniform_weights_are_near_uniform() {
        let weights = vec![1u8; 37];
        let mut rng = StdRng::seed_from_u64(99);
        let hist = counts(&BinarySearchSampler::new(&weights).unwrap(), &mut rng, 200_000);
        assert_frequencies(&hist, &weights, 5.0);
    }

    #[test]
    fn dominant_weight_takes_every_draw() {
        let weights = [0, 0, 0, 1000];
        let binary = BinarySearchSampler::new(&weights).unwrap();
        let linear = LinearSearchSampler::new(&weights).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..10_000 {
            assert_eq!(binary.sample_index(&mut rng), 3);
            assert_eq!(linear.sample_index(&mut rng), 3);
        }
    }

    #[test]
    fn degenerate_singleton() {
        let binary = BinarySearchSampler::new(&[3.0]).unwrap();
        let linear = LinearSearchSampler::new(&[3.0]).unwrap();
        let mut rng = rand::rng();
        for _ in 0..1000 {
            assert_eq!(binary.sample_index(&mut rng), 0);
            assert_eq!(linear.sample_index(&mut rng), 0);
        }
    }
}
