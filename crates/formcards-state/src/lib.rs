//! # formcards state
//!
//! The canonical session state: an append-only list of accepted
//! [`Submission`]s with a "newest" marker, and the immutable [`CountryStore`]
//! that the schema validates country names against.
//!
//! UI code never mutates the stores directly; it goes through an [`AppStore`]
//! handle, which serializes writes and notifies subscribers after each one.

pub mod country;
pub mod store;
pub mod submission;

pub use country::{Country, CountryStore};
pub use store::{AppState, AppStore, StoreEvent, StoreSubscription};
pub use submission::{
	DuplicateSubmissionIdError, FormType, NewSubmission, ParseSubmissionIdError, Submission,
	SubmissionId, SubmissionStore,
};
