//! File size and MIME type validators

use super::{ValidationError, ValidationResult, Validator};

/// Upper bound on a file size in bytes (inclusive).
#[derive(Debug, Clone, Copy)]
pub struct FileSizeValidator {
	max_bytes: u64,
}

impl FileSizeValidator {
	/// One mebibyte.
	pub const MIB: u64 = 1024 * 1024;

	/// # Examples
	///
	/// ```
	/// use formcards_core::validators::{FileSizeValidator, Validator};
	///
	/// let validator = FileSizeValidator::new(5 * FileSizeValidator::MIB);
	/// assert!(validator.validate(&(5 * 1024 * 1024)).is_ok());
	/// assert!(validator.validate(&(5 * 1024 * 1024 + 1)).is_err());
	/// ```
	pub fn new(max_bytes: u64) -> Self {
		Self { max_bytes }
	}

	pub fn max_bytes(&self) -> u64 {
		self.max_bytes
	}
}

impl Validator<u64> for FileSizeValidator {
	fn validate(&self, value: &u64) -> ValidationResult<()> {
		if *value <= self.max_bytes {
			Ok(())
		} else {
			Err(ValidationError::FileTooLarge {
				size: *value,
				max: self.max_bytes,
			})
		}
	}
}

/// Whitelist of MIME types, compared exactly (case-sensitive, no parameters).
#[derive(Debug, Clone)]
pub struct MimeTypeValidator {
	allowed: Vec<String>,
}

impl MimeTypeValidator {
	pub const MIME_JPEG: &'static str = "image/jpeg";
	pub const MIME_JPG: &'static str = "image/jpg";
	pub const MIME_PNG: &'static str = "image/png";

	pub fn new<I, S>(allowed: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			allowed: allowed.into_iter().map(Into::into).collect(),
		}
	}

	/// JPEG and PNG, as declared by browsers.
	///
	/// # Examples
	///
	/// ```
	/// use formcards_core::validators::{MimeTypeValidator, Validator};
	///
	/// let validator = MimeTypeValidator::jpeg_png();
	/// assert!(validator.validate("image/png").is_ok());
	/// assert!(validator.validate("application/pdf").is_err());
	/// ```
	pub fn jpeg_png() -> Self {
		Self::new([Self::MIME_JPEG, Self::MIME_PNG])
	}

	pub fn allowed(&self) -> &[String] {
		&self.allowed
	}
}

impl Validator<str> for MimeTypeValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if self.allowed.iter().any(|allowed| allowed == value) {
			Ok(())
		} else {
			Err(ValidationError::MimeTypeNotAllowed {
				mime_type: value.to_string(),
			})
		}
	}
}

impl Validator<String> for MimeTypeValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		Validator::<str>::validate(self, value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_file_size_boundary() {
		// Arrange
		let validator = FileSizeValidator::new(100);

		// Act / Assert
		assert!(validator.validate(&100).is_ok());
		assert_eq!(
			validator.validate(&101),
			Err(ValidationError::FileTooLarge {
				size: 101,
				max: 100
			})
		);
	}

	#[rstest]
	#[case("image/jpeg", true)]
	#[case("image/png", true)]
	#[case("image/jpg", false)]
	#[case("IMAGE/PNG", false)]
	#[case("", false)]
	fn test_jpeg_png_whitelist(#[case] mime: &str, #[case] valid: bool) {
		assert_eq!(MimeTypeValidator::jpeg_png().validate(mime).is_ok(), valid);
	}
}
