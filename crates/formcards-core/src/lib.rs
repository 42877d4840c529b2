//! # formcards-core
//!
//! Building blocks shared by every formcards crate:
//!
//! - [`reactive`]: a single-threaded `Signal<T>` with change subscriptions, used by
//!   the controlled form to re-run validation whenever a tracked field changes.
//! - [`validators`]: small, composable validators (length, pattern, range, email,
//!   file size and MIME type) that the submission schema chains into rules.

pub mod reactive;
pub mod validators;

pub use reactive::{Signal, Subscription};
pub use validators::{ValidationError, ValidationResult, Validator};
