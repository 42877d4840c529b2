//! # formcards forms
//!
//! The validation and encoding half of the submission pipeline.
//!
//! - [`schema`]: the declarative [`SubmissionSchema`] that turns a
//!   [`RawSubmission`] into a [`ValidSubmission`] or a list of field errors
//! - [`password`]: the 0-5 password strength scorer behind the meter
//! - [`file`]: uploaded file handles as the schema and encoder see them
//! - [`encoder`]: asynchronous file to data-URI conversion
//!
//! ## Example
//!
//! ```
//! use formcards_forms::{RawSubmission, SubmissionSchema, ValidationContext};
//! use formcards_state::CountryStore;
//!
//! let countries = CountryStore::reference();
//! let schema = SubmissionSchema::new();
//!
//! let raw = RawSubmission {
//!     name: "john".into(),
//!     ..RawSubmission::default()
//! };
//! let errors = schema
//!     .validate(&raw, &ValidationContext::new(countries.countries()))
//!     .unwrap_err();
//!
//! assert_eq!(
//!     errors.field_error("name"),
//!     Some("Name must start with uppercase letter")
//! );
//! ```

pub mod encoder;
pub mod error;
pub mod file;
pub mod password;
pub mod schema;

pub use encoder::{EncodeError, FileEncoder};
pub use error::{FieldError, ValidationErrors};
pub use file::{FileList, FileSource, UploadedFile};
pub use password::{PasswordStrength, StrengthLevel, score};
pub use schema::{
	CrossFieldValidator, Field, FieldValidator, FieldsMatch, RawSubmission, Rule,
	SubmissionSchema, ValidSubmission, ValidationContext, field_names,
};
