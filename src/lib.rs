//! # walker-choice
//!
//! Draw indices from a fixed discrete distribution, fast.
//!
//! The centerpiece is
//! [Walker's Alias Method](https://en.wikipedia.org/wiki/Alias_method):
//! an O(n) construction followed by O(1) sampling. Alongside it live the
//! simpler cumulative-array samplers, handy as baselines and for small `n`.
//!
//! | sampler | build | draw | random draws per sample |
//! |---|---|---|---|
//! | [`AliasSampler`] | O(n) | O(1) | 2 × `f64` |
//! | [`QuantizedAliasSampler`] | O(n) | O(1) | 2 × raw `u32`/`u64`, no float math |
//! | [`BinarySearchSampler`] | O(n) | O(log n) | 1 × `f64` |
//! | [`LinearSearchSampler`] | O(n) | O(n) | 1 × `f64` |
//! | [`TowerSampler`] | O(n) | O(log n) | 1 × `f64` |
//!
//! [`RandomChoice`] picks between the float and quantized alias samplers
//! from an explicit [`CutoffKind`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use walker_choice::{CutoffKind, RandomChoice, CHECK_TOLERANCE};
//!
//! # fn main() -> Result<(), walker_choice::InvalidInput> {
//! let weights = [1.0, 2.0, 3.0, 4.0];
//! let choice = RandomChoice::new(&weights, CutoffKind::Quantized32)?;
//! assert!(choice.check(&weights, CHECK_TOLERANCE));
//!
//! let mut rng = rand::rng();
//! let i = choice.sample_index(&mut rng); // 3 about 40% of the time
//! # Ok(()) }
//! ```
//!
//! ## Gotchas
//! * Weights must be finite, **non-negative** and not all zero; anything else
//!   is an [`InvalidInput`] at construction. Sampling never fails.
//! * This is for *fixed* distributions. If weights change, rebuild.
//! * Samplers are immutable and `Sync`; share one across threads and give
//!   each thread its own RNG.
//!
//! ## Logging
//! Builders report through the [`log`] facade at `debug`/`trace` level. No
//! logger is installed by this crate.

mod cumulative;
mod cutoff;
mod error;
mod sampler;
mod tower;
mod walker;
mod weights;

/// A minimal interface for “index samplers”: draw an index in `0..len()`.
#[allow(clippy::len_without_is_empty)]
pub trait IndexSampler {
    fn len(&self) -> usize;
    fn sample_index<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> usize;
}

pub use cumulative::{BinarySearchSampler, CumulativeTable, LinearSearchSampler};
pub use cutoff::{Cutoff, Quantized};
pub use error::InvalidInput;
pub use sampler::{AliasSampler, QuantizedAliasSampler};
pub use tower::TowerSampler;
pub use walker::{AliasTable, CHECK_TOLERANCE, WALKER1977_TOLERANCE};

use num_traits::AsPrimitive;
use rand::Rng;

/// How [`RandomChoice`] stores alias-table cutoffs.
///
/// Pick a quantized kind when the generator natively yields unsigned
/// integers of that width (PCG32, MT19937, ...), [`CutoffKind::Float`]
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutoffKind {
    #[default]
    Float,
    Quantized32,
    Quantized64,
}

/// Alias-method sampler whose cutoff representation is chosen at
/// construction.
#[derive(Debug, Clone)]
pub enum RandomChoice {
    Float(AliasSampler),
    Quantized32(QuantizedAliasSampler<u32>),
    Quantized64(QuantizedAliasSampler<u64>),
}

impl RandomChoice {
    /// Build an alias table of the requested `kind`. O(n).
    ///
    /// # Errors
    /// * [`InvalidInput::Empty`] if there are no weights.
    /// * [`InvalidInput::Negative`] / [`InvalidInput::NotFinite`] for a bad
    ///   weight.
    /// * [`InvalidInput::ZeroSum`] if the weights add up to zero.
    /// * [`InvalidInput::TooManyWeights`] if a quantized `kind` cannot
    ///   address enough buckets for the weights.
    pub fn new<W: AsPrimitive<f64>>(weights: &[W], kind: CutoffKind) -> Result<Self, InvalidInput> {
        Ok(match kind {
            CutoffKind::Float => Self::Float(AliasSampler::new(weights)?),
            CutoffKind::Quantized32 => Self::Quantized32(QuantizedAliasSampler::new(weights)?),
            CutoffKind::Quantized64 => Self::Quantized64(QuantizedAliasSampler::new(weights)?),
        })
    }

    pub fn kind(&self) -> CutoffKind {
        match self {
            Self::Float(_) => CutoffKind::Float,
            Self::Quantized32(_) => CutoffKind::Quantized32,
            Self::Quantized64(_) => CutoffKind::Quantized64,
        }
    }

    /// Draw a single sample in O(1).
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self {
            Self::Float(s) => s.sample_index(rng),
            Self::Quantized32(s) => s.sample_index(rng),
            Self::Quantized64(s) => s.sample_index(rng),
        }
    }

    /// Whether the underlying table reproduces `weights`; see
    /// [`AliasTable::check`].
    pub fn check<W: AsPrimitive<f64>>(&self, weights: &[W], tolerance: f64) -> bool {
        match self {
            Self::Float(s) => s.check(weights, tolerance),
            Self::Quantized32(s) => s.check(weights, tolerance),
            Self::Quantized64(s) => s.check(weights, tolerance),
        }
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(s) => s.len(),
            Self::Quantized32(s) => s.len(),
            Self::Quantized64(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IndexSampler for RandomChoice {
    #[inline]
    fn len(&self) -> usize {
        RandomChoice::len(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        RandomChoice::sample_index(self, rng)
    }
}
