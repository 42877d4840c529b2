//! String validators

use super::{ValidationError, ValidationResult, Validator};
use regex::Regex;

/// Rejects empty strings.
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator;

impl RequiredValidator {
	pub fn new() -> Self {
		Self
	}
}

impl Validator<str> for RequiredValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if value.is_empty() {
			Err(ValidationError::Required)
		} else {
			Ok(())
		}
	}
}

impl Validator<String> for RequiredValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value)
	}
}

/// Minimum length validator, counted in characters rather than bytes.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
	min: usize,
}

impl MinLengthValidator {
	/// Creates a new MinLengthValidator with the specified minimum length.
	///
	/// # Examples
	///
	/// ```
	/// use formcards_core::validators::{MinLengthValidator, Validator};
	///
	/// let validator = MinLengthValidator::new(8);
	/// assert!(validator.validate("Password").is_ok());
	/// assert!(validator.validate("short").is_err());
	/// ```
	pub fn new(min: usize) -> Self {
		Self { min }
	}
}

impl Validator<str> for MinLengthValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		let length = value.chars().count();
		if length >= self.min {
			Ok(())
		} else {
			Err(ValidationError::TooShort {
				length,
				min: self.min,
			})
		}
	}
}

impl Validator<String> for MinLengthValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value)
	}
}

/// Accepts values in which the pattern matches somewhere.
///
/// Anchor the pattern (`^...$`) when the whole value has to match.
#[derive(Debug, Clone)]
pub struct RegexValidator {
	regex: Regex,
	message: String,
}

impl RegexValidator {
	/// Creates a new RegexValidator with the specified regex pattern.
	///
	/// # Examples
	///
	/// ```
	/// use formcards_core::validators::{RegexValidator, Validator};
	///
	/// let validator = RegexValidator::new(r"^[A-Z]").unwrap();
	/// assert!(validator.validate("John").is_ok());
	/// assert!(validator.validate("john").is_err());
	/// ```
	pub fn new(pattern: &str) -> Result<Self, regex::Error> {
		Ok(Self {
			regex: Regex::new(pattern)?,
			message: format!("Value must match pattern: {}", pattern),
		})
	}

	/// Wraps an already compiled regex.
	pub fn from_regex(regex: Regex) -> Self {
		let message = format!("Value must match pattern: {}", regex.as_str());
		Self { regex, message }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = message.into();
		self
	}
}

impl Validator<str> for RegexValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if self.regex.is_match(value) {
			Ok(())
		} else {
			Err(ValidationError::PatternMismatch(self.message.clone()))
		}
	}
}

impl Validator<String> for RegexValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("", false)]
	#[case(" ", true)]
	#[case("x", true)]
	fn test_required_validator(#[case] input: &str, #[case] valid: bool) {
		assert_eq!(RequiredValidator::new().validate(input).is_ok(), valid);
	}

	#[rstest]
	fn test_min_length_counts_chars() {
		// Arrange
		let validator = MinLengthValidator::new(4);

		// Act
		// Four characters, eight bytes.
		let result = validator.validate("ÄÖÜß");

		// Assert
		assert!(result.is_ok());
	}

	#[rstest]
	fn test_min_length_reports_length() {
		let result = MinLengthValidator::new(8).validate("abc");
		assert_eq!(result, Err(ValidationError::TooShort { length: 3, min: 8 }));
	}

	#[rstest]
	fn test_regex_custom_message() {
		// Arrange
		let validator = RegexValidator::new(r"[0-9]")
			.unwrap()
			.with_message("needs a digit");

		// Act
		let result = validator.validate("abc");

		// Assert
		assert_eq!(
			result,
			Err(ValidationError::PatternMismatch("needs a digit".to_string()))
		);
	}

	proptest! {
		#[test]
		fn min_length_counts_chars(value in "\\PC{0,24}", min in 0usize..16) {
			let validator = MinLengthValidator::new(min);
			let long_enough = value.chars().count() >= min;
			prop_assert_eq!(Validator::<str>::validate(&validator, &value).is_ok(), long_enough);
		}
	}
}
