//! Cutoff representations stored in an alias table.
//!
//! A cutoff is the probability of keeping the bucket that was drawn. It is
//! either a plain `f64` in `[0, 1]` or an unsigned integer holding that same
//! fraction scaled to the integer's full range, so the sampling hot path can
//! compare raw random bits without any float conversion.

use rand::RngCore;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f64 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// Storage type of an alias-table cutoff.
pub trait Cutoff: sealed::Sealed + Copy + PartialOrd + std::fmt::Debug + 'static {
    /// Whether the table must be padded to a power of two.
    const QUANTIZED: bool;

    /// Width of the stored value in bits.
    const BITS: u32;

    /// Largest error, as a fraction of one bucket, that storing a cutoff can
    /// introduce. Zero for `f64`.
    const STEP: f64;

    /// Convert a fraction (`1 + b` in the builder) into a stored cutoff,
    /// clamping to the representable range.
    fn quantize(fraction: f64) -> Self;

    /// The stored cutoff as a fraction of one bucket.
    fn fraction(self) -> f64;
}

impl Cutoff for f64 {
    const QUANTIZED: bool = false;
    const BITS: u32 = 64;
    const STEP: f64 = 0.0;

    #[inline]
    fn quantize(fraction: f64) -> Self {
        fraction.min(1.0)
    }

    #[inline]
    fn fraction(self) -> f64 {
        self
    }
}

/// Integer cutoffs, compared directly against raw RNG output.
pub trait Quantized: Cutoff + Ord {
    /// One raw draw covering every bit of `Self`.
    fn draw<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    /// High-order bits of `self` after discarding `shift` low bits.
    fn bucket(self, shift: u32) -> usize;
}

macro_rules! quantized_cutoff {
    ($t:ty, $next:ident) => {
        impl Cutoff for $t {
            const QUANTIZED: bool = true;
            const BITS: u32 = <$t>::BITS;
            const STEP: f64 = 1.0 / <$t>::MAX as f64;

            #[inline]
            fn quantize(fraction: f64) -> Self {
                // `as` truncates and saturates at both ends
                (<$t>::MAX as f64 * fraction) as $t
            }

            #[inline]
            fn fraction(self) -> f64 {
                self as f64 / <$t>::MAX as f64
            }
        }

        impl Quantized for $t {
            #[inline]
            fn draw<R: RngCore + ?Sized>(rng: &mut R) -> Self {
                rng.$next()
            }

            #[inline]
            fn bucket(self, shift: u32) -> usize {
                (self >> shift) as usize
            }
        }
    };
}

quantized_cutoff!(u32, next_u32);
quantized_cutoff!(u64, next_u64);
