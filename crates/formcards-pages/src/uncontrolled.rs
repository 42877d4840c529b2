//! Snapshot-read collector
//!
//! Nothing is tracked while the user types. On submit the form controls are
//! read once through [`FormControls`], coerced, and validated in one pass.

use crate::collector::{OnClose, SubmissionBuilder, SubmitOutcome, UnexpectedNotice, parse_age};
use formcards_conf::{FormSettings, SettingsError};
use formcards_forms::{FileList, PasswordStrength, RawSubmission, ValidationContext, field_names};
use formcards_state::{AppStore, FormType};
use std::collections::HashMap;
use std::rc::Rc;

/// Read access to the rendered form controls.
pub trait FormControls {
	/// Submitted value of a text input, select, radio group or checkbox.
	///
	/// An unchecked checkbox or radio group has no value.
	fn value(&self, name: &str) -> Option<String>;

	/// Selected files of a file input.
	fn files(&self, name: &str) -> FileList;
}

/// In-memory [`FormControls`], shaped like a browser form-data payload.
///
/// # Examples
///
/// ```
/// use formcards_pages::{FormControls, FormData};
///
/// let data = FormData::new()
///     .with_value("name", "John")
///     .with_value("acceptTerms", "on");
///
/// assert_eq!(data.value("name").as_deref(), Some("John"));
/// assert!(data.files("profilePicture").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormData {
	values: HashMap<String, String>,
	files: HashMap<String, FileList>,
}

impl FormData {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set_value(name, value);
		self
	}

	pub fn with_files(mut self, name: impl Into<String>, files: FileList) -> Self {
		self.files.insert(name.into(), files);
		self
	}

	pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.values.insert(name.into(), value.into());
	}

	pub fn remove(&mut self, name: &str) {
		self.values.remove(name);
		self.files.remove(name);
	}
}

impl FormControls for FormData {
	fn value(&self, name: &str) -> Option<String> {
		self.values.get(name).cloned()
	}

	fn files(&self, name: &str) -> FileList {
		self.files.get(name).cloned().unwrap_or_default()
	}
}

/// Read and coerce every control into a [`RawSubmission`].
pub fn read_controls(controls: &impl FormControls) -> RawSubmission {
	use field_names::*;

	let text = |name: &str| controls.value(name).unwrap_or_default();
	RawSubmission {
		name: text(NAME),
		age: controls.value(AGE).as_deref().and_then(parse_age),
		email: text(EMAIL),
		password: text(PASSWORD),
		confirm_password: text(CONFIRM_PASSWORD),
		gender: text(GENDER),
		accept_terms: controls.value(ACCEPT_TERMS).as_deref() == Some("on"),
		profile_picture: controls.files(PROFILE_PICTURE),
		country: text(COUNTRY),
	}
}

/// Form that reads its controls once per submit.
pub struct UncontrolledForm {
	builder: SubmissionBuilder,
	errors: HashMap<String, String>,
	notice: Option<UnexpectedNotice>,
	strength: PasswordStrength,
	on_close: OnClose,
}

impl UncontrolledForm {
	pub fn new(
		store: AppStore,
		settings: &FormSettings,
		on_close: impl Fn() + 'static,
	) -> Result<Self, SettingsError> {
		Ok(Self::with_builder(
			SubmissionBuilder::from_settings(store, settings, FormType::Uncontrolled)?,
			Rc::new(on_close),
		))
	}

	pub fn with_builder(builder: SubmissionBuilder, on_close: OnClose) -> Self {
		Self {
			builder,
			errors: HashMap::new(),
			notice: None,
			strength: PasswordStrength::default(),
			on_close,
		}
	}

	/// Errors from the last submit, keyed by field name.
	pub fn errors(&self) -> &HashMap<String, String> {
		&self.errors
	}

	pub fn field_error(&self, field: &str) -> Option<&str> {
		self.errors.get(field).map(String::as_str)
	}

	pub fn notice(&self) -> Option<UnexpectedNotice> {
		self.notice
	}

	/// Strength of the password read at the last submit.
	pub fn password_strength(&self) -> PasswordStrength {
		self.strength
	}

	/// Read, validate and commit.
	///
	/// Takes `&mut self`, so a second submit on the same form cannot start
	/// while this one is awaiting the file encoder.
	pub async fn submit(&mut self, controls: &impl FormControls) -> SubmitOutcome {
		let raw = read_controls(controls);
		self.strength = PasswordStrength::of(&raw.password);
		self.notice = None;

		let validated = {
			let countries = self.builder.store().countries();
			self.builder
				.schema()
				.validate(&raw, &ValidationContext::new(countries.countries()))
		};
		let valid = match validated {
			Ok(valid) => valid,
			Err(errors) => {
				tracing::debug!(errors = errors.len(), "uncontrolled submit rejected");
				self.errors = errors.to_field_map();
				return SubmitOutcome::Invalid(errors);
			}
		};
		self.errors.clear();

		match self.builder.commit(valid).await {
			Ok(id) => {
				(self.on_close)();
				SubmitOutcome::Committed(id)
			}
			Err(err) => {
				tracing::error!(error = %err, "uncontrolled submit failed");
				self.notice = Some(UnexpectedNotice);
				SubmitOutcome::Failed(UnexpectedNotice)
			}
		}
	}

	/// Close without submitting.
	pub fn cancel(&self) {
		(self.on_close)();
	}
}
