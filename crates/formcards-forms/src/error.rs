//! Field-level validation errors

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A single failed rule, addressed by the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
	pub path: Vec<String>,
	pub message: String,
}

impl FieldError {
	pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			path: vec![field.into()],
			message: message.into(),
		}
	}

	/// First path segment, the key UI code looks errors up by.
	pub fn field(&self) -> &str {
		self.path.first().map(String::as_str).unwrap_or_default()
	}
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.path.join("."), self.message)
	}
}

/// Ordered list of every failed field from one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, error: FieldError) {
		self.0.push(error);
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
		self.0.iter()
	}

	pub fn has_error(&self, field: &str) -> bool {
		self.iter().any(|e| e.field() == field)
	}

	/// Message of the first error recorded against `field`.
	pub fn field_error(&self, field: &str) -> Option<&str> {
		self.iter()
			.find(|e| e.field() == field)
			.map(|e| e.message.as_str())
	}

	/// Collapse into a field name to message map.
	///
	/// When a field has more than one error the first one wins.
	pub fn to_field_map(&self) -> HashMap<String, String> {
		let mut map = HashMap::new();
		for error in self.iter() {
			map.entry(error.field().to_string())
				.or_insert_with(|| error.message.clone());
		}
		map
	}

	pub fn into_inner(self) -> Vec<FieldError> {
		self.0
	}
}

impl From<Vec<FieldError>> for ValidationErrors {
	fn from(errors: Vec<FieldError>) -> Self {
		Self(errors)
	}
}

impl Extend<FieldError> for ValidationErrors {
	fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
		self.0.extend(iter);
	}
}

impl<'a> IntoIterator for &'a ValidationErrors {
	type Item = &'a FieldError;
	type IntoIter = std::slice::Iter<'a, FieldError>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_field_map_keeps_first_message() {
		// Arrange
		let errors = ValidationErrors::from(vec![
			FieldError::new("name", "Name is required"),
			FieldError::new("name", "Name must start with uppercase letter"),
			FieldError::new("email", "Invalid email address"),
		]);

		// Act
		let map = errors.to_field_map();

		// Assert
		assert_eq!(map.len(), 2);
		assert_eq!(map["name"], "Name is required");
		assert_eq!(map["email"], "Invalid email address");
	}

	#[rstest]
	fn test_field_map_uses_first_path_segment() {
		// Arrange
		let errors = ValidationErrors::from(vec![FieldError {
			path: vec!["profilePicture".to_string(), "0".to_string()],
			message: "File size must be less than 5MB".to_string(),
		}]);

		// Act
		let map = errors.to_field_map();

		// Assert
		assert_eq!(map["profilePicture"], "File size must be less than 5MB");
		assert_eq!(errors.iter().next().unwrap().to_string(), "profilePicture.0: File size must be less than 5MB");
	}

	#[rstest]
	fn test_display_counts_errors() {
		let errors = ValidationErrors::from(vec![FieldError::new("age", "Age is required")]);
		assert_eq!(errors.to_string(), "1 field(s) failed validation");
	}
}
