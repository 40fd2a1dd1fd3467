//! Walker's Alias Method: table construction and validation.
//!
//! Two builders are provided. [`AliasTable::new`] is the O(n) two-pointer
//! construction (Fukui & Todo, 2009) and works for every [`Cutoff`]
//! representation. [`AliasTable::walker1977`] is the original O(n²) routine
//! (A. J. Walker, ACM TOMS 3, 253, 1977), kept as an independent reference.

use crate::cutoff::{Cutoff, Quantized};
use crate::error::InvalidInput;
use crate::weights;
use num_traits::AsPrimitive;

/// Default tolerance of [`AliasTable::check`], multiplied by the weight count.
pub const CHECK_TOLERANCE: f64 = 1.0e-10;

/// Default early-exit tolerance of [`AliasTable::walker1977`].
pub const WALKER1977_TOLERANCE: f64 = 1.0e-10;

/// Alias table for discrete distribution sampling.
///
/// Bucket `i` keeps itself with probability `cutoff[i]` and otherwise
/// redirects to `alias[i]`. Quantized tables hold more buckets than weights:
/// the trailing buckets are zero-weight padding.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTable<C: Cutoff> {
    cutoff: Vec<C>,
    alias: Vec<usize>,
    len: usize,
}

impl<C: Cutoff> AliasTable<C> {
    /// Construct an alias table from non-negative weights. O(n).
    ///
    /// # Errors
    /// Any [`InvalidInput`] reported by weight validation, plus
    /// [`InvalidInput::TooManyWeights`] when a quantized table would need more
    /// buckets than its integer width can address.
    pub fn new<W: AsPrimitive<f64>>(weights: &[W]) -> Result<Self, InvalidInput> {
        let sum = weights::total(weights)?;
        let n = weights.len();
        let m = bucket_count::<C>(n)?;
        // normalize before scaling so tiny totals cannot overflow
        let scale = m as f64;

        // Deficits fill the scratch buffer from the front, surpluses from the
        // back, each tagged with its bucket index.
        let mut scratch = vec![(0.0f64, 0usize); m];
        let mut neg = 0;
        let mut pos = m;
        for i in 0..m {
            let w: f64 = if i < n { weights[i].as_() } else { 0.0 };
            let b = w / sum * scale - 1.0;
            if b < 0.0 {
                scratch[neg] = (b, i);
                neg += 1;
            } else {
                pos -= 1;
                scratch[pos] = (b, i);
            }
        }

        // `pos` is now the first surplus slot. A surplus drained to zero or
        // below is left behind and resolved when the walk reaches it.
        let mut cutoff = vec![C::quantize(1.0); m];
        let mut alias: Vec<usize> = (0..m).collect();
        for k in 0..m {
            let (b, i) = scratch[k];
            if pos < m {
                cutoff[i] = C::quantize(1.0 + b);
                alias[i] = scratch[pos].1;
                scratch[pos].0 += b;
                if scratch[pos].0 <= 0.0 {
                    pos += 1;
                }
            } else {
                log::trace!("alias table: bucket {i} left unpaired (residue {b:e})");
            }
        }

        log::debug!("built alias table: {n} weights, {m} buckets");
        Ok(Self { cutoff, alias, len: n })
    }

    /// Number of weights the table was built from.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets, including padding.
    pub fn buckets(&self) -> usize {
        self.cutoff.len()
    }

    #[inline]
    pub fn cutoff(&self, bucket: usize) -> C {
        self.cutoff[bucket]
    }

    #[inline]
    pub fn alias(&self, bucket: usize) -> usize {
        self.alias[bucket]
    }

    /// Probability of each original index implied by the table.
    ///
    /// Index `i` receives the mass its own bucket keeps plus the rejected
    /// mass of every bucket aliased to it.
    pub fn implied_probabilities(&self) -> Vec<f64> {
        let m = self.buckets() as f64;
        self.implied_masses().iter().map(|mass| mass / m).collect()
    }

    /// Check that the table reproduces `weights` within `tolerance * n`,
    /// measured in bucket units. Use [`CHECK_TOLERANCE`] unless you have a
    /// reason not to.
    ///
    /// Quantized tables get one extra [`Cutoff::STEP`] of slack for every
    /// bucket that contributes mass to an index.
    ///
    /// Weights that fail validation, or whose count differs from the table,
    /// never pass.
    pub fn check<W: AsPrimitive<f64>>(&self, weights: &[W], tolerance: f64) -> bool {
        let Ok(sum) = weights::total(weights) else {
            return false;
        };
        if weights.len() != self.len {
            return false;
        }
        let tol = tolerance * self.len as f64;
        let m = self.buckets() as f64;
        self.implied_masses()
            .iter()
            .zip(weights)
            .zip(self.contributors())
            .all(|((&p, &w), k)| (p - w.as_() / sum * m).abs() < tol + k as f64 * C::STEP)
    }

    /// Buckets feeding each original index: its own plus every bucket
    /// aliased to it.
    fn contributors(&self) -> Vec<usize> {
        let mut count = vec![1usize; self.buckets()];
        for (j, &a) in self.alias.iter().enumerate() {
            if a != j {
                count[a] += 1;
            }
        }
        count.truncate(self.len);
        count
    }

    fn implied_masses(&self) -> Vec<f64> {
        // padding buckets are accumulated too; only the first `len` are kept
        let mut mass = vec![0.0f64; self.buckets()];
        for (j, (&c, &a)) in self.cutoff.iter().zip(&self.alias).enumerate() {
            let keep = c.fraction();
            mass[j] += keep;
            mass[a] += 1.0 - keep;
        }
        mass.truncate(self.len);
        mass
    }
}

impl AliasTable<f64> {
    /// Walker's original O(n²) construction.
    ///
    /// Each pass pairs the most negative excess with the most positive one
    /// and stops as soon as the total absolute excess drops below
    /// `tolerance` (see [`WALKER1977_TOLERANCE`]).
    pub fn walker1977<W: AsPrimitive<f64>>(
        weights: &[W],
        tolerance: f64,
    ) -> Result<Self, InvalidInput> {
        let sum = weights::total(weights)?;
        let n = weights.len();
        let scale = n as f64;

        let mut cutoff = vec![1.0f64; n];
        let mut alias: Vec<usize> = (0..n).collect();
        let mut b: Vec<f64> = weights
            .iter()
            .map(|&w| w.as_() / sum * scale - 1.0)
            .collect();

        for pass in 0..n {
            let mut total = 0.0;
            let (mut min_val, mut min_pos) = (0.0, 0);
            let (mut max_val, mut max_pos) = (0.0, 0);
            for (j, &bj) in b.iter().enumerate() {
                total += bj.abs();
                if bj <= min_val {
                    min_val = bj;
                    min_pos = j;
                }
                if bj >= max_val {
                    max_val = bj;
                    max_pos = j;
                }
            }

            if total < tolerance {
                log::trace!("walker1977: converged after {pass} passes");
                break;
            }

            cutoff[min_pos] = 1.0 + min_val;
            alias[min_pos] = max_pos;
            b[max_pos] += min_val;
            b[min_pos] = 0.0;
        }

        log::debug!("built alias table (walker1977): {n} weights");
        Ok(Self { cutoff, alias, len: n })
    }
}

/// Buckets needed for `n` weights: `n` itself for float cutoffs, otherwise
/// the next power of two (at least 2) that the integer width can address.
fn bucket_count<C: Cutoff>(n: usize) -> Result<usize, InvalidInput> {
    if !C::QUANTIZED {
        return Ok(n);
    }
    let max = 1usize.checked_shl(C::BITS).unwrap_or(usize::MAX);
    match n.checked_next_power_of_two() {
        Some(m) if m <= max => Ok(m.max(2)),
        _ => Err(InvalidInput::TooManyWeights { len: n, max }),
    }
}

/// Bits of a raw draw discarded to leave a bucket index below `buckets`.
///
/// `buckets` is a power of two accepted by `bucket_count`.
pub(crate) fn bucket_shift<Q: Quantized>(buckets: usize) -> u32 {
    Q::BITS - buckets.trailing_zeros()
}
