//! Accepted submissions and the store that owns them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder shown instead of passwords in `Debug` output.
pub const PASSWORD_REDACTED: &str = "[REDACTED]";

/// Store-assigned submission identifier.
///
/// Ids come from a per-store sequence, so they are unique within a store and
/// order by insertion. They render and serialize as decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SubmissionId(u64);

impl SubmissionId {
	pub fn new(value: u64) -> Self {
		Self(value)
	}

	pub fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for SubmissionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid submission id: {0:?}")]
pub struct ParseSubmissionIdError(String);

impl FromStr for SubmissionId {
	type Err = ParseSubmissionIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.parse::<u64>()
			.map(Self)
			.map_err(|_| ParseSubmissionIdError(s.to_string()))
	}
}

impl From<SubmissionId> for String {
	fn from(id: SubmissionId) -> Self {
		id.to_string()
	}
}

impl TryFrom<String> for SubmissionId {
	type Error = ParseSubmissionIdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Which collector produced a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
	/// Reactive-bound form: values tracked as the user types.
	Controlled,
	/// Snapshot-read form: values read from the controls at submit time.
	Uncontrolled,
}

impl FormType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Controlled => "controlled",
			Self::Uncontrolled => "uncontrolled",
		}
	}
}

impl fmt::Display for FormType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A fully validated submission that has not been assigned an id yet.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
	pub name: String,
	pub age: u8,
	pub email: String,
	pub password: String,
	pub confirm_password: String,
	pub gender: String,
	pub accept_terms: bool,
	/// Data URI of the encoded picture, never a raw file handle.
	pub profile_picture: Option<String>,
	pub country: String,
	#[serde(with = "iso_millis")]
	pub created_at: DateTime<Utc>,
	pub form_type: FormType,
}

impl fmt::Debug for NewSubmission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NewSubmission")
			.field("name", &self.name)
			.field("age", &self.age)
			.field("email", &self.email)
			.field("password", &PASSWORD_REDACTED)
			.field("confirm_password", &PASSWORD_REDACTED)
			.field("gender", &self.gender)
			.field("accept_terms", &self.accept_terms)
			.field("profile_picture", &self.profile_picture.as_ref().map(|p| p.len()))
			.field("country", &self.country)
			.field("created_at", &self.created_at)
			.field("form_type", &self.form_type)
			.finish()
	}
}

/// An accepted submission. Immutable once stored.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
	pub id: SubmissionId,
	pub name: String,
	pub age: u8,
	pub email: String,
	pub password: String,
	pub confirm_password: String,
	pub gender: String,
	pub accept_terms: bool,
	pub profile_picture: Option<String>,
	pub country: String,
	#[serde(with = "iso_millis")]
	pub created_at: DateTime<Utc>,
	pub form_type: FormType,
}

impl Submission {
	fn from_new(id: SubmissionId, new: NewSubmission) -> Self {
		Self {
			id,
			name: new.name,
			age: new.age,
			email: new.email,
			password: new.password,
			confirm_password: new.confirm_password,
			gender: new.gender,
			accept_terms: new.accept_terms,
			profile_picture: new.profile_picture,
			country: new.country,
			created_at: new.created_at,
			form_type: new.form_type,
		}
	}
}

impl fmt::Debug for Submission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Submission")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("age", &self.age)
			.field("email", &self.email)
			.field("password", &PASSWORD_REDACTED)
			.field("confirm_password", &PASSWORD_REDACTED)
			.field("gender", &self.gender)
			.field("accept_terms", &self.accept_terms)
			.field("profile_picture", &self.profile_picture.as_ref().map(|p| p.len()))
			.field("country", &self.country)
			.field("created_at", &self.created_at)
			.field("form_type", &self.form_type)
			.finish()
	}
}

/// Ordered collection of accepted submissions.
///
/// Submissions are only ever appended, so iteration order is insertion order.
/// Deserialization rejects repeated ids and moves the id counter past every
/// stored id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SubmissionStoreRepr")]
pub struct SubmissionStore {
	submissions: Vec<Submission>,
	new_submission_id: Option<SubmissionId>,
	next_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionStoreRepr {
	submissions: Vec<Submission>,
	#[serde(default)]
	new_submission_id: Option<SubmissionId>,
	#[serde(default)]
	next_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("submission id {0} appears more than once")]
pub struct DuplicateSubmissionIdError(pub SubmissionId);

impl TryFrom<SubmissionStoreRepr> for SubmissionStore {
	type Error = DuplicateSubmissionIdError;

	fn try_from(repr: SubmissionStoreRepr) -> Result<Self, Self::Error> {
		let mut seen = std::collections::HashSet::with_capacity(repr.submissions.len());
		for submission in &repr.submissions {
			if !seen.insert(submission.id) {
				return Err(DuplicateSubmissionIdError(submission.id));
			}
		}
		let floor = repr
			.submissions
			.iter()
			.map(|s| s.id.get() + 1)
			.max()
			.unwrap_or(1);
		Ok(Self {
			submissions: repr.submissions,
			new_submission_id: repr.new_submission_id,
			next_id: repr.next_id.max(floor),
		})
	}
}

impl Default for SubmissionStore {
	fn default() -> Self {
		Self::new()
	}
}

impl SubmissionStore {
	pub fn new() -> Self {
		Self {
			submissions: Vec::new(),
			new_submission_id: None,
			next_id: 1,
		}
	}

	/// Append a submission and mark it as the newest one.
	///
	/// # Examples
	///
	/// ```
	/// # use formcards_state::{SubmissionStore, NewSubmission, FormType};
	/// # let new = NewSubmission {
	/// #     name: "John".into(), age: 25, email: "test@example.com".into(),
	/// #     password: "Password123!".into(), confirm_password: "Password123!".into(),
	/// #     gender: "male".into(), accept_terms: true, profile_picture: None,
	/// #     country: "United States".into(), created_at: chrono::Utc::now(),
	/// #     form_type: FormType::Controlled,
	/// # };
	/// let mut store = SubmissionStore::new();
	/// let id = store.add(new);
	///
	/// assert_eq!(store.len(), 1);
	/// assert_eq!(store.new_submission_id(), Some(id));
	/// ```
	pub fn add(&mut self, new: NewSubmission) -> SubmissionId {
		let id = self.allocate_id();
		self.submissions.push(Submission::from_new(id, new));
		self.new_submission_id = Some(id);
		id
	}

	/// Remove a submission. Unknown ids are ignored.
	///
	/// The "new" marker is left alone; it is only cleared explicitly.
	pub fn remove(&mut self, id: &SubmissionId) -> Option<Submission> {
		let pos = self.submissions.iter().position(|s| s.id == *id)?;
		Some(self.submissions.remove(pos))
	}

	pub fn clear_new_submission_marker(&mut self) {
		self.new_submission_id = None;
	}

	pub fn new_submission_id(&self) -> Option<SubmissionId> {
		self.new_submission_id
	}

	/// Whether `id` is the submission currently flagged as new.
	pub fn is_new(&self, id: &SubmissionId) -> bool {
		self.new_submission_id.as_ref() == Some(id)
	}

	pub fn get(&self, id: &SubmissionId) -> Option<&Submission> {
		self.submissions.iter().find(|s| s.id == *id)
	}

	pub fn submissions(&self) -> &[Submission] {
		&self.submissions
	}

	pub fn iter(&self) -> impl Iterator<Item = &Submission> {
		self.submissions.iter()
	}

	pub fn len(&self) -> usize {
		self.submissions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.submissions.is_empty()
	}

	fn allocate_id(&mut self) -> SubmissionId {
		let id = self.next_id;
		self.next_id += 1;
		SubmissionId(id)
	}
}

mod iso_millis {
	//! `2025-01-01T10:00:00.000Z`, the format browsers produce for `toISOString`.

	use chrono::{DateTime, SecondsFormat, Utc};
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		DateTime::parse_from_rfc3339(&raw)
			.map(|dt| dt.with_timezone(&Utc))
			.map_err(serde::de::Error::custom)
	}
}
