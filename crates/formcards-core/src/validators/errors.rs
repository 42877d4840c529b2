//! Validator error types

use thiserror::Error;

/// Reason a single validator rejected a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
	#[error("This field is required")]
	Required,
	#[error("Length {length} is below the minimum of {min}")]
	TooShort { length: usize, min: usize },
	#[error("{0}")]
	PatternMismatch(String),
	#[error("Value {value} is below the minimum of {min}")]
	TooSmall { value: f64, min: f64 },
	#[error("Value {value} is above the maximum of {max}")]
	TooLarge { value: f64, max: f64 },
	#[error("Value {0} is not a whole number")]
	NotWholeNumber(f64),
	#[error("Invalid email address: {0}")]
	InvalidEmail(String),
	#[error("File size {size} exceeds the limit of {max} bytes")]
	FileTooLarge { size: u64, max: u64 },
	#[error("MIME type {mime_type} is not allowed")]
	MimeTypeNotAllowed { mime_type: String },
}

pub type ValidationResult<T> = Result<T, ValidationError>;
