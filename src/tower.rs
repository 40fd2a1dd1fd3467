//! Tower sampling: an O(log n) sampler built straight from an iterator of
//! weights.

use num_traits::AsPrimitive;
use rand::Rng;

use crate::{IndexSampler, error::InvalidInput, weights};

#[derive(Debug, Clone, PartialEq)]
pub struct TowerSampler {
    sum: f64,
    table: Vec<f64>,
}

impl Default for TowerSampler {
    /// A single bucket that is always selected.
    fn default() -> Self {
        Self {
            sum: 1.0,
            table: vec![1.0],
        }
    }
}

impl TowerSampler {
    /// Build from any iterator of weights, dividing each running total by the
    /// grand total.
    ///
    /// # Errors
    /// See [`InvalidInput`]: empty weights, a negative or non-finite weight,
    /// or a zero total.
    pub fn new<I, W>(weights: I) -> Result<Self, InvalidInput>
    where
        I: IntoIterator<Item = W>,
        W: AsPrimitive<f64>,
    {
        let mut table = Vec::new();
        let mut s = 0.0f64;
        for (index, w) in weights.into_iter().enumerate() {
            s += weights::checked(index, w.as_())?;
            table.push(s);
        }
        if table.is_empty() {
            return Err(InvalidInput::Empty);
        }
        if !s.is_finite() || s <= 0.0 {
            return Err(InvalidInput::ZeroSum);
        }
        for t in &mut table {
            *t /= s;
        }
        log::debug!("built tower table: {} weights", table.len());
        Ok(Self { sum: s, table })
    }

    /// Total of the weights the sampler was built from.
    pub fn total(&self) -> f64 {
        self.sum
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[inline]
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.sample_with(rng.random())
    }

    /// Index of the first tower level strictly above `p`.
    #[inline]
    pub fn sample_with(&self, p: f64) -> usize {
        // the top level is exactly 1, so any p in [0, 1) lands inside
        self.table.partition_point(|&c| c <= p).min(self.table.len() - 1)
    }
}

impl IndexSampler for TowerSampler {
    #[inline]
    fn len(&self) -> usize {
        self.table.len()
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        TowerSampler::sample_index(self, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_frequencies, counts};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn default_always_picks_zero() {
        let tower = TowerSampler::default();
        assert_eq!(tower.len(), 1);
        let mut rng = rand::rng();
        for _ in 0..1000 {
            assert_eq!(tower.sample_index(&mut rng), 0);
        }
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(
            TowerSampler::new(Vec::<f64>::new()),
            Err(InvalidInput::Empty)
        );
        assert_eq!(TowerSampler::new([0u32, 0]), Err(InvalidInput::ZeroSum));
        assert!(matches!(
            TowerSampler::new([2.0, -1.0]),
            Err(InvalidInput::Negative { index: 1, .. })
        ));
    }

    #[test]
    fn builds_from_iterators() {
        let tower = TowerSampler::new((1..=4).map(|w| w as f64)).unwrap();
        assert_eq!(tower.total(), 10.0);
        assert_eq!(tower.table.last(), Some(&1.0));
        assert_eq!(tower.sample_with(0.0), 0);
        assert_eq!(tower.sample_with(0.1), 1);
        assert_eq!(tower.sample_with(0.35), 2);
        assert_eq!(tower.sample_with(0.999), 3);
    }

    #[test]
    fn matches_distribution() {
        let weights = [1.0, 2.0, 3.0, 4.0];
        let tower = TowerSampler::new(weights.iter().copied()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let hist = counts(&tower, &mut rng, 100_000);
        assert_frequencies(&hist, &weights, 5.0);
    }

    #[test]
    fn dominant_weight_takes_every_draw() {
        let tower = TowerSampler::new([0, 0, 0, 1000]).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..10_000 {
            assert_eq!(tower.sample_index(&mut rng), 3);
        }
    }
}
