//! Reactive-bound collector
//!
//! Every input is a [`Signal`]. Writing to one marks the field as touched
//! and, when the form is in [`ValidationMode::OnChange`] or a submit has
//! already been attempted, re-runs the schema over all tracked values.
//! Errors are only surfaced for touched fields until the first submit.
//!
//! ```text
//! Signal::set ──► touched += field ──► revalidate ──► errors / strength
//! ```

use crate::collector::{OnClose, SubmissionBuilder, SubmitOutcome, UnexpectedNotice, parse_age};
use formcards_conf::{FormSettings, SettingsError, ValidationMode};
use formcards_core::{Signal, Subscription};
use formcards_forms::{
	FileList, PasswordStrength, RawSubmission, ValidSubmission, ValidationContext,
	ValidationErrors, field_names,
};
use formcards_state::{AppStore, FormType};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// The tracked inputs. Clones share the same signals.
#[derive(Debug, Clone, Default)]
pub struct ControlledFields {
	pub name: Signal<String>,
	/// Raw text of the age input.
	pub age: Signal<String>,
	pub email: Signal<String>,
	pub password: Signal<String>,
	pub confirm_password: Signal<String>,
	pub gender: Signal<String>,
	pub accept_terms: Signal<bool>,
	pub profile_picture: Signal<FileList>,
	pub country: Signal<String>,
}

impl ControlledFields {
	/// Current values, coerced the way the schema expects them.
	pub fn snapshot(&self) -> RawSubmission {
		RawSubmission {
			name: self.name.get(),
			age: self.age.with(|age| parse_age(age)),
			email: self.email.get(),
			password: self.password.get(),
			confirm_password: self.confirm_password.get(),
			gender: self.gender.get(),
			accept_terms: self.accept_terms.get(),
			profile_picture: self.profile_picture.get(),
			country: self.country.get(),
		}
	}
}

struct Inner {
	fields: ControlledFields,
	builder: SubmissionBuilder,
	mode: ValidationMode,
	errors: Signal<ValidationErrors>,
	touched: Signal<BTreeSet<&'static str>>,
	submit_attempted: Cell<bool>,
	submitting: Signal<bool>,
	notice: Signal<Option<UnexpectedNotice>>,
	strength: Signal<PasswordStrength>,
	on_close: OnClose,
}

impl Inner {
	fn validate(&self) -> Result<ValidSubmission, ValidationErrors> {
		let raw = self.fields.snapshot();
		let countries = self.builder.store().countries();
		self.builder
			.schema()
			.validate(&raw, &ValidationContext::new(countries.countries()))
	}

	fn revalidate(&self) {
		let errors = self.validate().err().unwrap_or_default();
		tracing::debug!(errors = errors.len(), "revalidated controlled form");
		self.errors.set(errors);
	}

	fn field_changed(&self, field: &'static str) {
		if !self.touched.with(|touched| touched.contains(field)) {
			self.touched.update(|touched| {
				touched.insert(field);
			});
		}
		if self.mode == ValidationMode::OnChange || self.submit_attempted.get() {
			self.revalidate();
		}
	}
}

/// Resets `submitting` however the submit ends.
struct SubmittingGuard<'a>(&'a Signal<bool>);

impl<'a> SubmittingGuard<'a> {
	fn start(flag: &'a Signal<bool>) -> Self {
		flag.set(true);
		Self(flag)
	}
}

impl Drop for SubmittingGuard<'_> {
	fn drop(&mut self) {
		self.0.set(false);
	}
}

/// Form whose values live in signals and are validated as they change.
pub struct ControlledForm {
	inner: Rc<Inner>,
	_subscriptions: Vec<Subscription>,
}

impl ControlledForm {
	pub fn new(
		store: AppStore,
		settings: &FormSettings,
		on_close: impl Fn() + 'static,
	) -> Result<Self, SettingsError> {
		Ok(Self::with_builder(
			SubmissionBuilder::from_settings(store, settings, FormType::Controlled)?,
			settings.validation.mode,
			Rc::new(on_close),
		))
	}

	pub fn with_builder(builder: SubmissionBuilder, mode: ValidationMode, on_close: OnClose) -> Self {
		let inner = Rc::new(Inner {
			fields: ControlledFields::default(),
			builder,
			mode,
			errors: Signal::default(),
			touched: Signal::default(),
			submit_attempted: Cell::new(false),
			submitting: Signal::new(false),
			notice: Signal::new(None),
			strength: Signal::default(),
			on_close,
		});

		let fields = &inner.fields;
		let mut subscriptions = vec![
			watch(&fields.name, field_names::NAME, &inner),
			watch(&fields.age, field_names::AGE, &inner),
			watch(&fields.email, field_names::EMAIL, &inner),
			watch(&fields.password, field_names::PASSWORD, &inner),
			watch(&fields.confirm_password, field_names::CONFIRM_PASSWORD, &inner),
			watch(&fields.gender, field_names::GENDER, &inner),
			watch(&fields.accept_terms, field_names::ACCEPT_TERMS, &inner),
			watch(&fields.profile_picture, field_names::PROFILE_PICTURE, &inner),
			watch(&fields.country, field_names::COUNTRY, &inner),
		];

		let weak = Rc::downgrade(&inner);
		subscriptions.push(fields.password.subscribe(move || {
			if let Some(inner) = weak.upgrade() {
				let strength = inner.fields.password.with(|p| PasswordStrength::of(p));
				inner.strength.set(strength);
			}
		}));

		if mode == ValidationMode::OnChange {
			inner.revalidate();
		}

		Self {
			inner,
			_subscriptions: subscriptions,
		}
	}

	pub fn fields(&self) -> &ControlledFields {
		&self.inner.fields
	}

	pub fn mode(&self) -> ValidationMode {
		self.inner.mode
	}

	/// No known errors in the tracked values.
	pub fn is_valid(&self) -> bool {
		self.inner.errors.with(ValidationErrors::is_empty)
	}

	pub fn is_submitting(&self) -> bool {
		self.inner.submitting.get()
	}

	/// State of the submit button.
	pub fn can_submit(&self) -> bool {
		self.is_valid() && !self.is_submitting()
	}

	/// Inline error for `field`, once the user has touched it or tried to
	/// submit.
	pub fn field_error(&self, field: &str) -> Option<String> {
		let visible =
			self.inner.submit_attempted.get() || self.inner.touched.with(|t| t.contains(field));
		if !visible {
			return None;
		}
		self.inner
			.errors
			.with(|errors| errors.field_error(field).map(str::to_string))
	}

	/// Every current error, touched or not.
	pub fn errors(&self) -> Signal<ValidationErrors> {
		self.inner.errors.clone()
	}

	pub fn submitting(&self) -> Signal<bool> {
		self.inner.submitting.clone()
	}

	/// Live strength of the password field.
	pub fn password_strength(&self) -> PasswordStrength {
		self.inner.strength.get()
	}

	pub fn strength(&self) -> Signal<PasswordStrength> {
		self.inner.strength.clone()
	}

	/// Form-level notice after an unexpected failure.
	pub fn notice(&self) -> Option<UnexpectedNotice> {
		self.inner.notice.get()
	}

	/// Validate the tracked values and commit them.
	///
	/// Returns [`SubmitOutcome::Blocked`] without doing anything while a
	/// previous submit is still running or the form is known to be invalid.
	pub async fn submit(&self) -> SubmitOutcome {
		let inner = &self.inner;
		if !self.can_submit() {
			tracing::warn!(
				submitting = self.is_submitting(),
				valid = self.is_valid(),
				"controlled submit blocked"
			);
			return SubmitOutcome::Blocked;
		}

		let _guard = SubmittingGuard::start(&inner.submitting);
		inner.submit_attempted.set(true);
		inner.notice.set(None);

		let valid = match inner.validate() {
			Ok(valid) => valid,
			Err(errors) => {
				tracing::debug!(errors = errors.len(), "controlled submit rejected");
				inner.errors.set(errors.clone());
				return SubmitOutcome::Invalid(errors);
			}
		};

		match inner.builder.commit(valid).await {
			Ok(id) => {
				(inner.on_close)();
				SubmitOutcome::Committed(id)
			}
			Err(err) => {
				tracing::error!(error = %err, "controlled submit failed");
				inner.notice.set(Some(UnexpectedNotice));
				SubmitOutcome::Failed(UnexpectedNotice)
			}
		}
	}

	/// Close without submitting.
	pub fn cancel(&self) {
		(self.inner.on_close)();
	}
}

fn watch<T: 'static>(signal: &Signal<T>, field: &'static str, inner: &Rc<Inner>) -> Subscription {
	let weak: Weak<Inner> = Rc::downgrade(inner);
	signal.subscribe(move || {
		if let Some(inner) = weak.upgrade() {
			inner.field_changed(field);
		}
	})
}
