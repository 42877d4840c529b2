//! # formcards
//!
//! A form-submission core. Two collectors gather user input, validate it
//! against one shared schema, and commit accepted submissions into
//! in-memory application state for a card renderer to display.
//!
//! ```text
//! input ──► collector ──► SubmissionSchema ──► FileEncoder ──► AppStore
//!                              ▲
//!                       CountryStore snapshot
//! ```
//!
//! ## Crates
//!
//! - [`core`]: signals and reusable field validators
//! - [`conf`]: settings loaded from TOML/JSON and the environment
//! - [`state`]: submissions, countries and the shared [`AppStore`](state::AppStore)
//! - [`forms`]: the schema, password scorer and data-URI encoder
//! - [`pages`]: the controlled and uncontrolled collectors (feature `pages`)
//!
//! ## Quick Example
//!
//! ```
//! use formcards::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = AppStore::default();
//! let mut form = UncontrolledForm::new(store.clone(), &FormSettings::default(), || {}).unwrap();
//!
//! let data = FormData::new()
//!     .with_value("name", "John")
//!     .with_value("age", "25")
//!     .with_value("email", "test@example.com")
//!     .with_value("password", "Password123!")
//!     .with_value("confirmPassword", "Password123!")
//!     .with_value("gender", "male")
//!     .with_value("acceptTerms", "on")
//!     .with_value("country", "United States");
//!
//! let outcome = form.submit(&data).await;
//! assert!(outcome.is_committed());
//! assert_eq!(store.submissions().len(), 1);
//! # }
//! ```

pub mod logging;

pub use formcards_conf as conf;
pub use formcards_core as core;
pub use formcards_forms as forms;
#[cfg(feature = "pages")]
pub use formcards_pages as pages;
pub use formcards_state as state;

pub use formcards_conf::{FormSettings, SettingsError, ValidationMode};
pub use formcards_forms::{
	EncodeError, FieldError, FileEncoder, PasswordStrength, SubmissionSchema, ValidationErrors,
};
#[cfg(feature = "pages")]
pub use formcards_pages::{ControlledForm, SubmitOutcome, UncontrolledForm};
pub use formcards_state::{AppStore, Submission, SubmissionId};

/// Everything a host needs to wire up a form.
pub mod prelude {
	pub use formcards_conf::{FormSettings, ValidationMode};
	pub use formcards_core::{Signal, Subscription};
	pub use formcards_forms::{
		FileList, FileSource, PasswordStrength, RawSubmission, SubmissionSchema, UploadedFile,
		ValidationContext, ValidationErrors,
	};
	#[cfg(feature = "pages")]
	pub use formcards_pages::{
		ControlledForm, FormControls, FormData, SubmitOutcome, UncontrolledForm,
	};
	pub use formcards_state::{
		AppStore, Country, CountryStore, FormType, StoreEvent, Submission, SubmissionId,
	};
}
