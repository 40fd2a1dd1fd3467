//! Validation shared by every builder.

use crate::error::InvalidInput;
use num_traits::AsPrimitive;

/// Check `weights` and return their total.
///
/// # Errors
/// * [`InvalidInput::Empty`] if there are no weights.
/// * [`InvalidInput::NotFinite`] for a NaN or infinite weight.
/// * [`InvalidInput::Negative`] if any weight is below zero.
/// * [`InvalidInput::ZeroSum`] if the total is zero or overflows.
pub(crate) fn total<W: AsPrimitive<f64>>(weights: &[W]) -> Result<f64, InvalidInput> {
    if weights.is_empty() {
        return Err(InvalidInput::Empty);
    }
    let mut sum = 0.0f64;
    for (index, &w) in weights.iter().enumerate() {
        sum += checked(index, w.as_())?;
    }
    if !sum.is_finite() || sum <= 0.0 {
        return Err(InvalidInput::ZeroSum);
    }
    Ok(sum)
}

/// Validate a single weight already converted to `f64`.
pub(crate) fn checked(index: usize, w: f64) -> Result<f64, InvalidInput> {
    if !w.is_finite() {
        return Err(InvalidInput::NotFinite { index });
    }
    if w < 0.0 {
        return Err(InvalidInput::Negative { index, value: w });
    }
    Ok(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_integer_and_float_weights() {
        assert_eq!(total(&[1u32, 2, 3]), Ok(6.0));
        assert_eq!(total(&[0.5f32, 0.25]), Ok(0.75));
        assert_eq!(total(&[0i64, 7]), Ok(7.0));
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(total::<f64>(&[]), Err(InvalidInput::Empty));
        assert_eq!(total(&[0.0, 0.0]), Err(InvalidInput::ZeroSum));
        assert_eq!(total(&[0u8; 4]), Err(InvalidInput::ZeroSum));
        assert!(matches!(
            total(&[1.0, -0.1, 0.2]),
            Err(InvalidInput::Negative { index: 1, .. })
        ));
        assert!(matches!(
            total(&[-3i32]),
            Err(InvalidInput::Negative { index: 0, .. })
        ));
        assert_eq!(
            total(&[1.0, f64::NAN]),
            Err(InvalidInput::NotFinite { index: 1 })
        );
        assert_eq!(
            total(&[f64::INFINITY]),
            Err(InvalidInput::NotFinite { index: 0 })
        );
        assert_eq!(total(&[f64::MAX, f64::MAX]), Err(InvalidInput::ZeroSum));
    }

    #[test]
    fn negative_zero_is_a_zero_weight() {
        assert_eq!(total(&[-0.0, 1.0]), Ok(1.0));
    }
}
