//! Form pipeline settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable overriding [`UploadSettings::max_bytes`].
pub const ENV_UPLOAD_MAX_BYTES: &str = "FORMCARDS_UPLOAD_MAX_BYTES";
/// Environment variable overriding [`ValidationSettings::mode`].
pub const ENV_VALIDATION_MODE: &str = "FORMCARDS_VALIDATION_MODE";
/// Environment variable overriding [`LoggingSettings::filter`].
pub const ENV_LOG: &str = "FORMCARDS_LOG";

/// Top-level settings for the submission pipeline
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormSettings {
	/// Constraints enforced by the schema on the profile picture
	#[serde(default)]
	pub upload: UploadSettings,

	/// MIME types the file encoder agrees to read
	#[serde(default)]
	pub encoder: EncoderSettings,

	/// When the controlled form re-runs validation
	#[serde(default)]
	pub validation: ValidationSettings,

	#[serde(default)]
	pub logging: LoggingSettings,
}

impl FormSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse settings from a TOML document. Missing keys keep their defaults.
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))
	}

	/// Load settings from a `.toml` or `.json` file.
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml_str(&contents),
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e))),
			_ => Err(SettingsError::UnsupportedFormat(
				"Supported formats: .toml, .json".to_string(),
			)),
		}
	}

	/// Defaults overridden by the process environment.
	pub fn from_env() -> Result<Self, SettingsError> {
		let mut settings = Self::default();
		settings.apply_env(|key| std::env::var(key).ok())?;
		Ok(settings)
	}

	/// Apply overrides from an environment lookup.
	///
	/// The lookup is injected so callers (and tests) decide where variables come
	/// from; [`from_env`](Self::from_env) passes `std::env::var`.
	pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), SettingsError>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(raw) = lookup(ENV_UPLOAD_MAX_BYTES) {
			self.upload.max_bytes = raw.trim().parse().map_err(|_| {
				SettingsError::InvalidValue {
					key: ENV_UPLOAD_MAX_BYTES.to_string(),
					value: raw.clone(),
				}
			})?;
		}

		if let Some(raw) = lookup(ENV_VALIDATION_MODE) {
			self.validation.mode = raw.parse()?;
		}

		if let Some(filter) = lookup(ENV_LOG) {
			self.logging.filter = filter;
		}

		Ok(())
	}

	/// Validate settings
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.upload.max_bytes == 0 {
			return Err(SettingsError::ValidationError(
				"upload.max_bytes must be greater than zero".to_string(),
			));
		}

		if self.upload.accepted_types.is_empty() {
			return Err(SettingsError::ValidationError(
				"upload.accepted_types must not be empty".to_string(),
			));
		}

		if self.encoder.allowed_types.is_empty() {
			return Err(SettingsError::ValidationError(
				"encoder.allowed_types must not be empty".to_string(),
			));
		}

		// Anything the schema accepts has to be encodable, otherwise a valid
		// submission would fail after validation.
		if let Some(missing) = self
			.upload
			.accepted_types
			.iter()
			.find(|t| !self.encoder.allowed_types.contains(t))
		{
			return Err(SettingsError::ValidationError(format!(
				"upload accepts {} but the encoder does not",
				missing
			)));
		}

		Ok(())
	}
}

/// Profile picture constraints
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
	pub max_bytes: u64,
	pub accepted_types: Vec<String>,
}

impl Default for UploadSettings {
	fn default() -> Self {
		Self {
			max_bytes: 5 * 1024 * 1024,
			accepted_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
		}
	}
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
	pub allowed_types: Vec<String>,
}

impl Default for EncoderSettings {
	fn default() -> Self {
		Self {
			allowed_types: vec![
				"image/png".to_string(),
				"image/jpeg".to_string(),
				"image/jpg".to_string(),
			],
		}
	}
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidationSettings {
	pub mode: ValidationMode,
}

/// When validation runs for the controlled form.
///
/// The engine is the same in both modes; only the scheduling differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
	/// Re-validate after every field change.
	#[default]
	OnChange,
	/// Validate only when the form is submitted.
	OnSubmit,
}

impl FromStr for ValidationMode {
	type Err = SettingsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"on_change" | "onchange" | "change" => Ok(Self::OnChange),
			"on_submit" | "onsubmit" | "submit" => Ok(Self::OnSubmit),
			_ => Err(SettingsError::InvalidValue {
				key: ENV_VALIDATION_MODE.to_string(),
				value: s.to_string(),
			}),
		}
	}
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// `tracing_subscriber::EnvFilter` directive, e.g. `"info,formcards_forms=debug"`
	pub filter: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			filter: "info".to_string(),
		}
	}
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),

	#[error("Invalid value for {key}: {value:?}")]
	InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashMap;

	#[rstest]
	fn test_default_settings() {
		let settings = FormSettings::default();
		assert_eq!(settings.upload.max_bytes, 5_242_880);
		assert_eq!(settings.encoder.allowed_types.len(), 3);
		assert_eq!(settings.validation.mode, ValidationMode::OnChange);
		assert_eq!(settings.logging.filter, "info");
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_partial_toml_keeps_defaults() {
		// Arrange
		let toml = r#"
			[upload]
			max_bytes = 1024
		"#;

		// Act
		let settings = FormSettings::from_toml_str(toml).unwrap();

		// Assert
		assert_eq!(settings.upload.max_bytes, 1024);
		assert_eq!(
			settings.upload.accepted_types,
			UploadSettings::default().accepted_types
		);
	}

	#[rstest]
	fn test_env_overrides() {
		// Arrange
		let env: HashMap<&str, &str> = HashMap::from([
			(ENV_UPLOAD_MAX_BYTES, "2048"),
			(ENV_VALIDATION_MODE, "on_submit"),
			(ENV_LOG, "debug"),
		]);
		let mut settings = FormSettings::default();

		// Act
		settings
			.apply_env(|key| env.get(key).map(|v| v.to_string()))
			.unwrap();

		// Assert
		assert_eq!(settings.upload.max_bytes, 2048);
		assert_eq!(settings.validation.mode, ValidationMode::OnSubmit);
		assert_eq!(settings.logging.filter, "debug");
	}

	#[rstest]
	fn test_env_override_rejects_garbage() {
		let mut settings = FormSettings::default();
		let result = settings.apply_env(|key| {
			(key == ENV_UPLOAD_MAX_BYTES).then(|| "five megabytes".to_string())
		});
		assert!(matches!(result, Err(SettingsError::InvalidValue { .. })));
	}

	#[rstest]
	#[case("on_change", ValidationMode::OnChange)]
	#[case("OnSubmit", ValidationMode::OnSubmit)]
	#[case(" submit ", ValidationMode::OnSubmit)]
	fn test_validation_mode_from_str(#[case] raw: &str, #[case] expected: ValidationMode) {
		assert_eq!(raw.parse::<ValidationMode>().unwrap(), expected);
	}

	#[rstest]
	fn test_validate_rejects_unencodable_upload_type() {
		// Arrange
		let mut settings = FormSettings::default();
		settings.upload.accepted_types.push("image/gif".to_string());

		// Act
		let result = settings.validate();

		// Assert
		assert!(matches!(result, Err(SettingsError::ValidationError(msg)) if msg.contains("image/gif")));
	}

	#[rstest]
	fn test_validate_rejects_zero_upload_limit() {
		let mut settings = FormSettings::default();
		settings.upload.max_bytes = 0;
		assert!(settings.validate().is_err());
	}
}
