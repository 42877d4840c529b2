//! The commit tail shared by both collectors

use chrono::Utc;
use formcards_conf::{FormSettings, SettingsError};
use formcards_forms::{
	EncodeError, FileEncoder, SubmissionSchema, ValidSubmission, ValidationErrors,
};
use formcards_state::{AppStore, FormType, NewSubmission, SubmissionId};
use std::fmt;
use std::rc::Rc;

/// Message shown when a submit fails for a reason other than validation.
pub const UNEXPECTED_ERROR_NOTICE: &str = "An unexpected error occurred. Please try again.";

/// Called when the hosting modal should close.
pub type OnClose = Rc<dyn Fn()>;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
	#[error("Failed to encode profile picture: {0}")]
	Encode(#[from] EncodeError),
}

/// The user-facing side of a [`SubmitError`]. Carries no detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnexpectedNotice;

impl UnexpectedNotice {
	pub fn message(&self) -> &'static str {
		UNEXPECTED_ERROR_NOTICE
	}
}

impl fmt::Display for UnexpectedNotice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(UNEXPECTED_ERROR_NOTICE)
	}
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// Stored under this id; the modal has been asked to close.
	Committed(SubmissionId),
	/// At least one rule failed. The store is untouched.
	Invalid(ValidationErrors),
	/// Validation passed but committing did not. The store is untouched.
	Failed(UnexpectedNotice),
	/// The collector refused to start: a submit is already running, or the
	/// tracked values are known to be invalid.
	Blocked,
}

impl SubmitOutcome {
	pub fn is_committed(&self) -> bool {
		matches!(self, Self::Committed(_))
	}

	pub fn submission_id(&self) -> Option<SubmissionId> {
		match self {
			Self::Committed(id) => Some(*id),
			_ => None,
		}
	}

	pub fn errors(&self) -> Option<&ValidationErrors> {
		match self {
			Self::Invalid(errors) => Some(errors),
			_ => None,
		}
	}
}

/// Resolves the picture, stamps the record and adds it to the store.
///
/// Holds everything a collector needs besides its own field state.
#[derive(Debug, Clone)]
pub struct SubmissionBuilder {
	store: AppStore,
	schema: Rc<SubmissionSchema>,
	encoder: FileEncoder,
	form_type: FormType,
}

impl SubmissionBuilder {
	pub fn new(
		store: AppStore,
		schema: Rc<SubmissionSchema>,
		encoder: FileEncoder,
		form_type: FormType,
	) -> Self {
		Self {
			store,
			schema,
			encoder,
			form_type,
		}
	}

	/// Builder wired from settings: picture limits for the schema, accepted
	/// formats for the encoder.
	///
	/// Fails when `settings` does not pass [`FormSettings::validate`].
	pub fn from_settings(
		store: AppStore,
		settings: &FormSettings,
		form_type: FormType,
	) -> Result<Self, SettingsError> {
		settings.validate()?;
		Ok(Self::new(
			store,
			Rc::new(SubmissionSchema::from_settings(&settings.upload)),
			FileEncoder::new(&settings.encoder),
			form_type,
		))
	}

	pub fn store(&self) -> &AppStore {
		&self.store
	}

	pub fn schema(&self) -> &SubmissionSchema {
		&self.schema
	}

	pub fn form_type(&self) -> FormType {
		self.form_type
	}

	/// Encode, stamp and store a validated submission.
	///
	/// Nothing reaches the store unless encoding succeeds.
	pub async fn commit(&self, valid: ValidSubmission) -> Result<SubmissionId, SubmitError> {
		let profile_picture = self
			.encoder
			.encode_optional(valid.profile_picture.as_ref())
			.await?;

		let submission = NewSubmission {
			name: valid.name,
			age: valid.age,
			email: valid.email,
			password: valid.password,
			confirm_password: valid.confirm_password,
			gender: valid.gender,
			accept_terms: valid.accept_terms,
			profile_picture,
			country: valid.country,
			created_at: Utc::now(),
			form_type: self.form_type,
		};
		Ok(self.store.add_submission(submission))
	}
}

/// Coerce the text of the age input.
///
/// Blank or non-numeric text means the age is missing.
///
/// # Examples
///
/// ```
/// use formcards_pages::parse_age;
///
/// assert_eq!(parse_age(" 25 "), Some(25.0));
/// assert_eq!(parse_age("25.5"), Some(25.5));
/// assert_eq!(parse_age(""), None);
/// assert_eq!(parse_age("abc"), None);
/// ```
pub fn parse_age(input: &str) -> Option<f64> {
	let input = input.trim();
	if input.is_empty() {
		return None;
	}
	input.parse::<f64>().ok().filter(|age| age.is_finite())
}

#[cfg(test)]
mod tests {
	use super::*;
	use formcards_forms::{FileSource, UploadedFile};
	use rstest::{fixture, rstest};

	#[fixture]
	fn valid() -> ValidSubmission {
		ValidSubmission {
			name: "John".to_string(),
			age: 25,
			email: "test@example.com".to_string(),
			password: "Password123!".to_string(),
			confirm_password: "Password123!".to_string(),
			gender: "male".to_string(),
			accept_terms: true,
			profile_picture: None,
			country: "United States".to_string(),
		}
	}

	fn builder(store: &AppStore, form_type: FormType) -> SubmissionBuilder {
		SubmissionBuilder::from_settings(store.clone(), &FormSettings::default(), form_type).unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_commit_stamps_and_stores(valid: ValidSubmission) {
		// Arrange
		let store = AppStore::default();
		let before = Utc::now();

		// Act
		let id = builder(&store, FormType::Uncontrolled).commit(valid).await.unwrap();

		// Assert
		let stored = store.submission(&id).unwrap();
		assert_eq!(stored.form_type, FormType::Uncontrolled);
		assert_eq!(stored.profile_picture, None);
		assert!(stored.created_at >= before);
		assert_eq!(store.new_submission_id(), Some(id));
	}

	#[rstest]
	#[tokio::test]
	async fn test_commit_embeds_encoded_picture(mut valid: ValidSubmission) {
		// Arrange
		let store = AppStore::default();
		valid.profile_picture = Some(UploadedFile::from_bytes("p.png", "image/png", vec![0xFF, 0xD8]));

		// Act
		let id = builder(&store, FormType::Controlled).commit(valid).await.unwrap();

		// Assert
		assert_eq!(
			store.submission(&id).unwrap().profile_picture.as_deref(),
			Some("data:image/png;base64,/9g=")
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_failed_encode_leaves_store_untouched(mut valid: ValidSubmission) {
		// Arrange
		let store = AppStore::default();
		valid.profile_picture = Some(UploadedFile {
			name: "gone.png".to_string(),
			size: 1,
			content_type: "image/png".to_string(),
			source: FileSource::Disk("/nonexistent/gone.png".into()),
		});

		// Act
		let result = builder(&store, FormType::Controlled).commit(valid).await;

		// Assert
		assert!(matches!(result, Err(SubmitError::Encode(EncodeError::Read { .. }))));
		assert!(store.submissions().is_empty());
		assert_eq!(store.new_submission_id(), None);
	}

	#[rstest]
	#[case("42", Some(42.0))]
	#[case("-3", Some(-3.0))]
	#[case("   ", None)]
	#[case("NaN", None)]
	#[case("inf", None)]
	fn test_parse_age(#[case] input: &str, #[case] expected: Option<f64>) {
		assert_eq!(parse_age(input), expected);
	}

	#[rstest]
	fn test_from_settings_rejects_zero_limit() {
		// Arrange
		let mut settings = FormSettings::default();
		settings.upload.max_bytes = 0;

		// Act
		let result =
			SubmissionBuilder::from_settings(AppStore::default(), &settings, FormType::Controlled);

		// Assert
		assert!(matches!(result, Err(SettingsError::ValidationError(_))));
	}

	#[rstest]
	fn test_notice_text() {
		assert_eq!(
			UnexpectedNotice.to_string(),
			"An unexpected error occurred. Please try again."
		);
	}
}
