// crates/ewi-core/src/validate.rs
//
// Boundary checks for raw numbers entering the model.
//
// Anything that passes these checks is safe to feed into the bank model and
// the emission schedule: neither produces NaN or panics on validated input.

use crate::error::EwiError;

/// Accept a signed block height as reported by a collaborator.
///
/// # Errors
/// Returns `EwiError::InvalidInput` for negative heights.
pub fn validate_height(height: i64) -> Result<u64, EwiError> {
    u64::try_from(height).map_err(|_| {
        EwiError::InvalidInput(format!("height must be >= 0, got {}", height))
    })
}

/// Accept a supply or reserve quantity.
///
/// # Errors
/// Returns `EwiError::InvalidInput` if `value` is negative, NaN, or infinite.
pub fn validate_amount(name: &str, value: f64) -> Result<f64, EwiError> {
    if !value.is_finite() {
        return Err(EwiError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            name, value
        )));
    }
    if value < 0.0 {
        return Err(EwiError::InvalidInput(format!(
            "{} must be >= 0, got {}",
            name, value
        )));
    }
    // -0.0 becomes 0.0
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_zero_and_positive() {
        assert_eq!(validate_height(0), Ok(0));
        assert_eq!(validate_height(777_217), Ok(777_217));
    }

    #[test]
    fn test_negative_height_rejected() {
        assert!(matches!(validate_height(-1), Err(EwiError::InvalidInput(_))));
    }

    #[test]
    fn test_amount_accepts_zero() {
        assert_eq!(validate_amount("scCirc", 0.0), Ok(0.0));
    }

    #[test]
    fn test_amount_rejects_negative() {
        assert!(validate_amount("scCirc", -0.5).is_err());
    }

    #[test]
    fn test_amount_rejects_nan_and_infinity() {
        assert!(validate_amount("reserves", f64::NAN).is_err());
        assert!(validate_amount("reserves", f64::INFINITY).is_err());
    }

    #[test]
    fn test_negative_zero_normalized() {
        let v = validate_amount("rcCirc", -0.0).unwrap();
        assert!(v.is_sign_positive());
    }
}
