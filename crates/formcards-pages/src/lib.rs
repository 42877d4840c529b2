//! # formcards pages
//!
//! The two ways a submission gets collected from the page:
//!
//! - [`ControlledForm`]: every field is a [`Signal`](formcards_core::Signal);
//!   edits re-run validation according to the configured
//!   [`ValidationMode`](formcards_conf::ValidationMode)
//! - [`UncontrolledForm`]: nothing is tracked; the form controls are read
//!   once, at submit time, through [`FormControls`]
//!
//! Both validate against the same [`SubmissionSchema`](formcards_forms::SubmissionSchema)
//! and hand the result to [`SubmissionBuilder::commit`], which encodes the
//! picture, stamps the record and adds it to the [`AppStore`](formcards_state::AppStore).

pub mod collector;
pub mod controlled;
pub mod uncontrolled;

pub use collector::{
	OnClose, SubmissionBuilder, SubmitError, SubmitOutcome, UNEXPECTED_ERROR_NOTICE,
	UnexpectedNotice, parse_age,
};
pub use controlled::{ControlledFields, ControlledForm};
pub use uncontrolled::{FormControls, FormData, UncontrolledForm, read_controls};
