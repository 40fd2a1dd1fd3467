//! O(1) samplers over an [`AliasTable`].

use num_traits::AsPrimitive;
use rand::Rng;

use crate::{
    IndexSampler,
    cutoff::Quantized,
    error::InvalidInput,
    walker::{self, AliasTable},
};

/// Alias sampler with `f64` cutoffs.
///
/// Each draw consumes two uniform `f64`s: one picks the bucket, the other is
/// tested against the bucket's cutoff.
#[derive(Debug, Clone)]
pub struct AliasSampler {
    table: AliasTable<f64>,
}

impl AliasSampler {
    /// Build with the O(n) two-pointer construction.
    ///
    /// # Errors
    /// See [`InvalidInput`]: empty weights, a negative or non-finite weight,
    /// or a zero total.
    pub fn new<W: AsPrimitive<f64>>(weights: &[W]) -> Result<Self, InvalidInput> {
        AliasTable::new(weights).map(Self::from_table)
    }

    /// Wrap an existing table, e.g. one built by [`AliasTable::walker1977`].
    pub fn from_table(table: AliasTable<f64>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &AliasTable<f64> {
        &self.table
    }

    /// Draw a single sample in O(1).
    #[inline]
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let bucket: f64 = rng.random();
        let accept: f64 = rng.random();
        self.sample_with(bucket, accept)
    }

    /// Map two uniform draws in `[0, 1)` to an index.
    #[inline]
    pub fn sample_with(&self, bucket: f64, accept: f64) -> usize {
        let n = self.table.len();
        let x = ((n as f64 * bucket) as usize).min(n - 1);
        if accept < self.table.cutoff(x) {
            x
        } else {
            self.table.alias(x)
        }
    }

    /// See [`AliasTable::check`].
    pub fn check<W: AsPrimitive<f64>>(&self, weights: &[W], tolerance: f64) -> bool {
        self.table.check(weights, tolerance)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Alias sampler with integer cutoffs.
///
/// The bucket comes from the high bits of one raw draw, and a second raw
/// draw is compared against the quantized cutoff, so no float arithmetic
/// happens per sample. Use it with generators whose native output is an
/// unsigned integer.
#[derive(Debug, Clone)]
pub struct QuantizedAliasSampler<Q: Quantized = u32> {
    table: AliasTable<Q>,
    shift: u32,
}

impl<Q: Quantized> QuantizedAliasSampler<Q> {
    /// # Errors
    /// Same as [`AliasSampler::new`], plus [`InvalidInput::TooManyWeights`]
    /// if the padded table cannot be indexed by the bits of `Q`.
    pub fn new<W: AsPrimitive<f64>>(weights: &[W]) -> Result<Self, InvalidInput> {
        let table = AliasTable::<Q>::new(weights)?;
        let shift = walker::bucket_shift::<Q>(table.buckets());
        Ok(Self { table, shift })
    }

    pub fn table(&self) -> &AliasTable<Q> {
        &self.table
    }

    /// Low-order bits discarded from the bucket draw.
    pub fn shift(&self) -> u32 {
        self.shift
    }

    #[inline]
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let bucket = Q::draw(rng);
        let accept = Q::draw(rng);
        self.sample_with_bits(bucket, accept)
    }

    /// Map two raw draws, uniform over all of `Q`, to an index.
    #[inline]
    pub fn sample_with_bits(&self, bucket: Q, accept: Q) -> usize {
        let x = bucket.bucket(self.shift);
        if accept < self.table.cutoff(x) {
            x
        } else {
            self.table.alias(x)
        }
    }

    pub fn check<W: AsPrimitive<f64>>(&self, weights: &[W], tolerance: f64) -> bool {
        self.table.check(weights, tolerance)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl IndexSampler for AliasSampler {
    #[inline]
    fn len(&self) -> usize {
        // call the inherent method explicitly to avoid trait-recursion
        AliasSampler::len(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        AliasSampler::sample_index(self, rng)
    }
}

impl<Q: Quantized> IndexSampler for QuantizedAliasSampler<Q> {
    #[inline]
    fn len(&self) -> usize {
        QuantizedAliasSampler::len(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        QuantizedAliasSampler::sample_index(self, rng)
    }
}
