//! Email address validator

use super::{ValidationError, ValidationResult, Validator};
use regex::Regex;
use std::sync::LazyLock;

// Local part: dot-separated atoms of letters, digits and `_ ' + -`; no leading,
// trailing or doubled dots. Domain: one or more labels that start with an
// alphanumeric, followed by an alphabetic TLD of at least two characters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Syntactic email validator.
///
/// # Examples
///
/// ```
/// use formcards_core::validators::{EmailValidator, Validator};
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("test@example.com").is_ok());
/// assert!(validator.validate("test@example").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
	pub fn new() -> Self {
		Self
	}
}

impl Validator<str> for EmailValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if EMAIL_REGEX.is_match(value) {
			Ok(())
		} else {
			Err(ValidationError::InvalidEmail(value.to_string()))
		}
	}
}

impl Validator<String> for EmailValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("test@example.com")]
	#[case("john.doe+tag@mail.example.co.uk")]
	#[case("o'brien@example.ie")]
	#[case("a_b-c@sub-domain.example.org")]
	fn test_valid_emails(#[case] email: &str) {
		assert!(EmailValidator::new().validate(email).is_ok(), "{email}");
	}

	#[rstest]
	#[case("")]
	#[case("plainaddress")]
	#[case("@example.com")]
	#[case("john@")]
	#[case("john@example")]
	#[case(".john@example.com")]
	#[case("john..doe@example.com")]
	#[case("john doe@example.com")]
	#[case("john@-example.com")]
	#[case("john@example.c")]
	fn test_invalid_emails(#[case] email: &str) {
		assert!(EmailValidator::new().validate(email).is_err(), "{email}");
	}
}
