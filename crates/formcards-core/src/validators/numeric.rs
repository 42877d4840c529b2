//! Numeric validators

use super::{ValidationError, ValidationResult, Validator};

/// Inclusive lower bound.
#[derive(Debug, Clone, Copy)]
pub struct MinValueValidator {
	min: f64,
}

impl MinValueValidator {
	/// # Examples
	///
	/// ```
	/// use formcards_core::validators::{MinValueValidator, Validator};
	///
	/// let validator = MinValueValidator::new(0.0);
	/// assert!(validator.validate(&0.0).is_ok());
	/// assert!(validator.validate(&-1.0).is_err());
	/// ```
	pub fn new(min: f64) -> Self {
		Self { min }
	}
}

impl Validator<f64> for MinValueValidator {
	fn validate(&self, value: &f64) -> ValidationResult<()> {
		if *value >= self.min {
			Ok(())
		} else {
			Err(ValidationError::TooSmall {
				value: *value,
				min: self.min,
			})
		}
	}
}

/// Inclusive upper bound.
#[derive(Debug, Clone, Copy)]
pub struct MaxValueValidator {
	max: f64,
}

impl MaxValueValidator {
	pub fn new(max: f64) -> Self {
		Self { max }
	}
}

impl Validator<f64> for MaxValueValidator {
	fn validate(&self, value: &f64) -> ValidationResult<()> {
		if *value <= self.max {
			Ok(())
		} else {
			Err(ValidationError::TooLarge {
				value: *value,
				max: self.max,
			})
		}
	}
}

/// Rejects values with a fractional part, NaN and infinities.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeNumberValidator;

impl WholeNumberValidator {
	pub fn new() -> Self {
		Self
	}
}

impl Validator<f64> for WholeNumberValidator {
	fn validate(&self, value: &f64) -> ValidationResult<()> {
		if value.is_finite() && value.fract() == 0.0 {
			Ok(())
		} else {
			Err(ValidationError::NotWholeNumber(*value))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case(0.0, true)]
	#[case(150.0, true)]
	#[case(150.5, false)]
	#[case(-0.1, false)]
	fn test_min_max_bounds(#[case] value: f64, #[case] valid: bool) {
		let min = MinValueValidator::new(0.0);
		let max = MaxValueValidator::new(150.0);
		assert_eq!(min.is_valid(&value) && max.is_valid(&value), valid);
	}

	#[rstest]
	#[case(25.0, true)]
	#[case(25.5, false)]
	#[case(f64::NAN, false)]
	#[case(f64::INFINITY, false)]
	fn test_whole_number(#[case] value: f64, #[case] valid: bool) {
		assert_eq!(WholeNumberValidator::new().is_valid(&value), valid);
	}

	proptest! {
		#[test]
		fn integers_are_whole(n in -1_000_000i64..1_000_000) {
			prop_assert!(WholeNumberValidator::new().is_valid(&(n as f64)));
		}

		#[test]
		fn adding_a_fraction_breaks_wholeness(n in -1_000i64..1_000, frac in 0.01f64..0.99) {
			prop_assert!(!WholeNumberValidator::new().is_valid(&(n as f64 + frac)));
		}
	}
}
