//! # formcards configuration
//!
//! Settings for the submission pipeline, loaded from code, a TOML/JSON file, or
//! environment variables, in that order of precedence (later wins).
//!
//! ```
//! use formcards_conf::{FormSettings, ValidationMode};
//!
//! let settings = FormSettings::from_toml_str(r#"
//! [validation]
//! mode = "on_submit"
//! "#).unwrap();
//!
//! assert_eq!(settings.validation.mode, ValidationMode::OnSubmit);
//! assert_eq!(settings.upload.max_bytes, 5 * 1024 * 1024);
//! ```

pub mod settings;

pub use settings::{
	EncoderSettings, FormSettings, LoggingSettings, SettingsError, UploadSettings,
	ValidationMode, ValidationSettings,
};
