//! Reusable validators
//!
//! Every validator implements [`Validator<T>`] and reports failures as a typed
//! [`ValidationError`]. Validators know nothing about forms or field names; the
//! submission schema pairs them with user-facing messages.

pub mod email;
pub mod errors;
pub mod file_type;
pub mod numeric;
pub mod string;

pub use email::EmailValidator;
pub use errors::{ValidationError, ValidationResult};
pub use file_type::{FileSizeValidator, MimeTypeValidator};
pub use numeric::{MaxValueValidator, MinValueValidator, WholeNumberValidator};
pub use string::{MinLengthValidator, RegexValidator, RequiredValidator};

/// Trait for validators
pub trait Validator<T: ?Sized> {
	fn validate(&self, value: &T) -> ValidationResult<()>;

	/// Convenience wrapper around [`validate`](Validator::validate).
	fn is_valid(&self, value: &T) -> bool {
		self.validate(value).is_ok()
	}
}
