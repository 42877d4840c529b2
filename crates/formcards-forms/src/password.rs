//! Password strength scoring
//!
//! One point per satisfied criterion:
//!
//! | Criterion | Check |
//! |---|---|
//! | length | at least 8 characters |
//! | digit | an ASCII digit |
//! | upper | an ASCII upper-case letter |
//! | lower | an ASCII lower-case letter |
//! | special | any character outside `[A-Za-z0-9]`, whitespace included |

use serde::Serialize;
use std::fmt;

pub const MIN_LENGTH: usize = 8;
pub const MAX_SCORE: u8 = 5;

/// Score a password from 0 to 5.
///
/// # Examples
///
/// ```
/// use formcards_forms::score;
///
/// assert_eq!(score(""), 0);
/// assert_eq!(score("password"), 2);
/// assert_eq!(score("Password123!"), 5);
/// ```
pub fn score(password: &str) -> u8 {
	let checks = [
		password.chars().count() >= MIN_LENGTH,
		password.chars().any(|c| c.is_ascii_digit()),
		password.chars().any(|c| c.is_ascii_uppercase()),
		password.chars().any(|c| c.is_ascii_lowercase()),
		password.chars().any(|c| !c.is_ascii_alphanumeric()),
	];
	checks.into_iter().filter(|passed| *passed).count() as u8
}

/// Named strength bands, one per score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StrengthLevel {
	VeryWeak,
	Weak,
	Fair,
	Good,
	Strong,
	VeryStrong,
}

impl StrengthLevel {
	pub fn from_score(score: u8) -> Self {
		match score {
			0 => Self::VeryWeak,
			1 => Self::Weak,
			2 => Self::Fair,
			3 => Self::Good,
			4 => Self::Strong,
			_ => Self::VeryStrong,
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::VeryWeak => "Very Weak",
			Self::Weak => "Weak",
			Self::Fair => "Fair",
			Self::Good => "Good",
			Self::Strong => "Strong",
			Self::VeryStrong => "Very Strong",
		}
	}

	/// Meter bar color as a CSS hex string.
	pub fn color(&self) -> &'static str {
		match self {
			Self::VeryWeak => "#dc3545",
			Self::Weak => "#fd7e14",
			Self::Fair => "#ffc107",
			Self::Good => "#a0d911",
			Self::Strong => "#52c41a",
			Self::VeryStrong => "#1890ff",
		}
	}
}

impl fmt::Display for StrengthLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Everything the strength meter renders for one password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
	score: u8,
	level: StrengthLevel,
}

impl PasswordStrength {
	pub fn of(password: &str) -> Self {
		let score = score(password);
		Self {
			score,
			level: StrengthLevel::from_score(score),
		}
	}

	pub fn score(&self) -> u8 {
		self.score
	}

	pub fn level(&self) -> StrengthLevel {
		self.level
	}

	pub fn label(&self) -> &'static str {
		self.level.label()
	}

	pub fn color(&self) -> &'static str {
		self.level.color()
	}

	/// Width of the meter fill, 0 to 100.
	pub fn fill_percent(&self) -> u8 {
		self.score * 100 / MAX_SCORE
	}
}

impl Default for PasswordStrength {
	fn default() -> Self {
		Self::of("")
	}
}
