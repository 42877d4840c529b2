//! The submission schema
//!
//! A [`SubmissionSchema`] is a list of independent [`FieldValidator`]s
//! followed by a list of [`CrossFieldValidator`]s. Every field validator
//! always runs, so a submission with three bad fields reports three errors.
//! Inside one field the [`Rule`]s form a chain: the first failing rule
//! produces the field's only error.
//!
//! Cross-field validators run last and leave alone any field that already
//! carries an error.
//!
//! Country membership is checked against the snapshot handed in through
//! [`ValidationContext`] on every call; the schema never keeps a copy.

use crate::error::{FieldError, ValidationErrors};
use crate::file::{FileList, UploadedFile};
use formcards_conf::UploadSettings;
use formcards_core::validators::{
	EmailValidator, FileSizeValidator, MaxValueValidator, MimeTypeValidator, MinLengthValidator,
	MinValueValidator, RegexValidator, RequiredValidator, Validator, WholeNumberValidator,
};
use formcards_state::Country;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Field names as they appear in error paths.
pub mod field_names {
	pub const NAME: &str = "name";
	pub const AGE: &str = "age";
	pub const EMAIL: &str = "email";
	pub const PASSWORD: &str = "password";
	pub const CONFIRM_PASSWORD: &str = "confirmPassword";
	pub const GENDER: &str = "gender";
	pub const ACCEPT_TERMS: &str = "acceptTerms";
	pub const PROFILE_PICTURE: &str = "profilePicture";
	pub const COUNTRY: &str = "country";

	pub const ALL: [&str; 9] = [
		NAME,
		AGE,
		EMAIL,
		PASSWORD,
		CONFIRM_PASSWORD,
		GENDER,
		ACCEPT_TERMS,
		PROFILE_PICTURE,
		COUNTRY,
	];
}

static UPPERCASE_START: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Z]").expect("Invalid name regex"));
static HAS_DIGIT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[0-9]").expect("Invalid digit regex"));
static HAS_UPPER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[A-Z]").expect("Invalid uppercase regex"));
static HAS_LOWER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[a-z]").expect("Invalid lowercase regex"));
static HAS_SPECIAL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("Invalid special character regex"));

/// Field values after the collector's coercion step.
///
/// `age` is `None` when the input was empty or not a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSubmission {
	pub name: String,
	pub age: Option<f64>,
	pub email: String,
	pub password: String,
	pub confirm_password: String,
	pub gender: String,
	pub accept_terms: bool,
	pub profile_picture: FileList,
	pub country: String,
}

/// A submission that passed every rule, with normalized types.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
	pub name: String,
	pub age: u8,
	pub email: String,
	pub password: String,
	pub confirm_password: String,
	pub gender: String,
	pub accept_terms: bool,
	pub profile_picture: Option<UploadedFile>,
	pub country: String,
}

impl ValidSubmission {
	fn normalize(raw: &RawSubmission) -> Self {
		Self {
			name: raw.name.clone(),
			// In range and whole once the age rules pass.
			age: raw.age.map(|age| age as u8).unwrap_or_default(),
			email: raw.email.clone(),
			password: raw.password.clone(),
			confirm_password: raw.confirm_password.clone(),
			gender: raw.gender.clone(),
			accept_terms: raw.accept_terms,
			profile_picture: raw.profile_picture.first().cloned(),
			country: raw.country.clone(),
		}
	}
}

/// External state the schema consults.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
	pub countries: &'a [Country],
}

impl<'a> ValidationContext<'a> {
	pub fn new(countries: &'a [Country]) -> Self {
		Self { countries }
	}

	/// Exact, case-sensitive name match.
	pub fn has_country(&self, name: &str) -> bool {
		self.countries.iter().any(|c| c.name == name)
	}
}

type Check<T> = Box<dyn Fn(&T, &ValidationContext<'_>) -> bool + Send + Sync>;

/// One predicate plus the message shown when it fails.
pub struct Rule<T: ?Sized> {
	check: Check<T>,
	message: String,
}

impl<T: ?Sized> Rule<T> {
	pub fn new<F>(message: impl Into<String>, check: F) -> Self
	where
		F: Fn(&T, &ValidationContext<'_>) -> bool + Send + Sync + 'static,
	{
		Self {
			check: Box::new(check),
			message: message.into(),
		}
	}

	/// Adapt a reusable validator, replacing its error with `message`.
	pub fn from_validator<V>(message: impl Into<String>, validator: V) -> Self
	where
		V: Validator<T> + Send + Sync + 'static,
	{
		Self::new(message, move |value, _| validator.is_valid(value))
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	fn passes(&self, value: &T, ctx: &ValidationContext<'_>) -> bool {
		(self.check)(value, ctx)
	}
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Rule").field("message", &self.message).finish()
	}
}

/// Produces zero or more errors for one field of a raw submission.
pub trait FieldValidator: Send + Sync {
	fn field(&self) -> &str;
	fn validate(&self, raw: &RawSubmission, ctx: &ValidationContext<'_>) -> Vec<FieldError>;
}

/// Compares several fields and reports against one of them.
pub trait CrossFieldValidator: Send + Sync {
	fn target(&self) -> &str;
	fn validate(&self, raw: &RawSubmission) -> Vec<FieldError>;
}

/// A rule chain bound to one field of [`RawSubmission`].
pub struct Field<T: ?Sized + 'static> {
	name: &'static str,
	accessor: fn(&RawSubmission) -> &T,
	rules: Vec<Rule<T>>,
}

impl<T: ?Sized + 'static> Field<T> {
	pub fn new(name: &'static str, accessor: fn(&RawSubmission) -> &T) -> Self {
		Self {
			name,
			accessor,
			rules: Vec::new(),
		}
	}

	pub fn rule(mut self, rule: Rule<T>) -> Self {
		self.rules.push(rule);
		self
	}

	pub fn check<F>(self, message: impl Into<String>, check: F) -> Self
	where
		F: Fn(&T, &ValidationContext<'_>) -> bool + Send + Sync + 'static,
	{
		self.rule(Rule::new(message, check))
	}

	pub fn validator<V>(self, message: impl Into<String>, validator: V) -> Self
	where
		V: Validator<T> + Send + Sync + 'static,
	{
		self.rule(Rule::from_validator(message, validator))
	}

	pub fn rules(&self) -> &[Rule<T>] {
		&self.rules
	}
}

impl<T: ?Sized + 'static> FieldValidator for Field<T> {
	fn field(&self) -> &str {
		self.name
	}

	fn validate(&self, raw: &RawSubmission, ctx: &ValidationContext<'_>) -> Vec<FieldError> {
		let value = (self.accessor)(raw);
		self.rules
			.iter()
			.find(|rule| !rule.passes(value, ctx))
			.map(|rule| FieldError::new(self.name, rule.message.clone()))
			.into_iter()
			.collect()
	}
}

/// Two string fields that must be equal.
pub struct FieldsMatch {
	source: fn(&RawSubmission) -> &str,
	target_field: &'static str,
	target: fn(&RawSubmission) -> &str,
	message: String,
}

impl FieldsMatch {
	pub fn new(
		source: fn(&RawSubmission) -> &str,
		target_field: &'static str,
		target: fn(&RawSubmission) -> &str,
		message: impl Into<String>,
	) -> Self {
		Self {
			source,
			target_field,
			target,
			message: message.into(),
		}
	}
}

impl CrossFieldValidator for FieldsMatch {
	fn target(&self) -> &str {
		self.target_field
	}

	fn validate(&self, raw: &RawSubmission) -> Vec<FieldError> {
		if (self.source)(raw) == (self.target)(raw) {
			Vec::new()
		} else {
			vec![FieldError::new(self.target_field, self.message.clone())]
		}
	}
}

/// The full rule set for a submission.
pub struct SubmissionSchema {
	fields: Vec<Box<dyn FieldValidator>>,
	cross_field: Vec<Box<dyn CrossFieldValidator>>,
}

impl Default for SubmissionSchema {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for SubmissionSchema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SubmissionSchema")
			.field("fields", &self.fields.iter().map(|v| v.field()).collect::<Vec<_>>())
			.field(
				"cross_field",
				&self.cross_field.iter().map(|v| v.target()).collect::<Vec<_>>(),
			)
			.finish()
	}
}

/// `bytes` in MiB, rounded to two decimals with trailing zeros dropped.
fn megabytes_label(bytes: u64) -> String {
	let mib = bytes as f64 / FileSizeValidator::MIB as f64;
	format!("{}", (mib * 100.0).round() / 100.0)
}

impl SubmissionSchema {
	/// Schema with the default upload limits.
	pub fn new() -> Self {
		Self::from_settings(&UploadSettings::default())
	}

	/// Schema whose picture rules follow `upload`.
	pub fn from_settings(upload: &UploadSettings) -> Self {
		use field_names::*;

		let size = FileSizeValidator::new(upload.max_bytes);
		let mime = MimeTypeValidator::new(&upload.accepted_types);
		let size_message = format!(
			"File size must be less than {}MB",
			megabytes_label(upload.max_bytes)
		);

		Self::empty()
			.field(
				Field::new(NAME, |r| r.name.as_str())
					.validator("Name is required", RequiredValidator::new())
					.validator(
						"Name must start with uppercase letter",
						RegexValidator::from_regex(UPPERCASE_START.clone()),
					),
			)
			.field(
				Field::new(AGE, |r| &r.age)
					.check("Age is required", |age: &Option<f64>, _| age.is_some())
					.check("Age cannot be negative", |age: &Option<f64>, _| {
						age.is_none_or(|a| MinValueValidator::new(0.0).is_valid(&a))
					})
					.check("Age seems unrealistic", |age: &Option<f64>, _| {
						age.is_none_or(|a| MaxValueValidator::new(150.0).is_valid(&a))
					})
					.check("Age must be a whole number", |age: &Option<f64>, _| {
						age.is_none_or(|a| WholeNumberValidator::new().is_valid(&a))
					}),
			)
			.field(
				Field::new(EMAIL, |r| r.email.as_str())
					.validator("Email is required", RequiredValidator::new())
					.validator("Invalid email address", EmailValidator::new()),
			)
			.field(
				Field::new(PASSWORD, |r| r.password.as_str())
					.validator("Password is required", RequiredValidator::new())
					.validator(
						"Password must be at least 8 characters",
						MinLengthValidator::new(8),
					)
					.validator(
						"Password must contain at least one number",
						RegexValidator::from_regex(HAS_DIGIT.clone()),
					)
					.validator(
						"Password must contain at least one uppercase letter",
						RegexValidator::from_regex(HAS_UPPER.clone()),
					)
					.validator(
						"Password must contain at least one lowercase letter",
						RegexValidator::from_regex(HAS_LOWER.clone()),
					)
					.validator(
						"Password must contain at least one special character",
						RegexValidator::from_regex(HAS_SPECIAL.clone()),
					),
			)
			.field(
				Field::new(CONFIRM_PASSWORD, |r| r.confirm_password.as_str())
					.validator("Please confirm your password", RequiredValidator::new()),
			)
			.field(
				Field::new(GENDER, |r| r.gender.as_str())
					.validator("Gender is required", RequiredValidator::new()),
			)
			.field(
				Field::new(ACCEPT_TERMS, |r| &r.accept_terms).check(
					"You must accept the terms and conditions",
					|accepted: &bool, _| *accepted,
				),
			)
			.field(
				Field::new(PROFILE_PICTURE, |r| &r.profile_picture)
					.check(size_message, move |files: &FileList, _| {
						files.first().is_none_or(|f| size.is_valid(&f.size))
					})
					.check(
						"Only JPEG and PNG images are allowed",
						move |files: &FileList, _| {
							files
								.first()
								.is_none_or(|f| mime.is_valid(f.content_type.as_str()))
						},
					),
			)
			.field(
				Field::new(COUNTRY, |r| r.country.as_str())
					.validator("Country is required", RequiredValidator::new())
					.check(
						"Please select a valid country from the list",
						|country: &str, ctx| ctx.has_country(country),
					),
			)
			.cross_field(FieldsMatch::new(
				|r| r.password.as_str(),
				CONFIRM_PASSWORD,
				|r| r.confirm_password.as_str(),
				"Passwords don't match",
			))
	}

	/// Schema with no rules at all.
	pub fn empty() -> Self {
		Self {
			fields: Vec::new(),
			cross_field: Vec::new(),
		}
	}

	pub fn field(mut self, validator: impl FieldValidator + 'static) -> Self {
		self.fields.push(Box::new(validator));
		self
	}

	pub fn cross_field(mut self, validator: impl CrossFieldValidator + 'static) -> Self {
		self.cross_field.push(Box::new(validator));
		self
	}

	/// Run every rule against `raw`.
	///
	/// Errors are ordered by field declaration, cross-field errors last.
	pub fn validate(
		&self,
		raw: &RawSubmission,
		ctx: &ValidationContext<'_>,
	) -> Result<ValidSubmission, ValidationErrors> {
		let mut errors = ValidationErrors::new();
		for validator in &self.fields {
			errors.extend(validator.validate(raw, ctx));
		}
		for validator in &self.cross_field {
			if errors.has_error(validator.target()) {
				continue;
			}
			errors.extend(validator.validate(raw));
		}

		if errors.is_empty() {
			Ok(ValidSubmission::normalize(raw))
		} else {
			tracing::debug!(
				count = errors.len(),
				fields = ?errors.iter().map(FieldError::field).collect::<Vec<_>>(),
				"submission failed validation"
			);
			Err(errors)
		}
	}
}
