//! Tracing subscriber setup

use formcards_conf::LoggingSettings;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Build the filter from `settings.filter`.
///
/// An unparsable directive falls back to `info` with a warning on stderr
/// rather than failing startup.
pub fn env_filter(settings: &LoggingSettings) -> EnvFilter {
	EnvFilter::try_new(&settings.filter).unwrap_or_else(|err| {
		eprintln!(
			"formcards: invalid log filter {:?} ({err}), using \"info\"",
			settings.filter
		);
		EnvFilter::new("info")
	})
}

/// Install a fmt subscriber for the whole process.
///
/// Returns `false` when a global subscriber was already installed, which
/// makes repeated calls harmless.
pub fn init(settings: &LoggingSettings) -> bool {
	let installed = tracing_subscriber::registry()
		.with(tracing_subscriber::fmt::layer())
		.with(env_filter(settings))
		.try_init()
		.is_ok();
	if installed {
		tracing::debug!(filter = %settings.filter, "logging initialized");
	}
	installed
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tracing::level_filters::LevelFilter;

	fn settings(filter: &str) -> LoggingSettings {
		let mut settings = LoggingSettings::default();
		settings.filter = filter.to_string();
		settings
	}

	#[rstest]
	fn test_valid_filter_is_kept() {
		let filter = env_filter(&settings("warn,formcards_forms=debug"));
		assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
	}

	#[rstest]
	fn test_invalid_filter_falls_back() {
		let filter = env_filter(&settings("formcards=notalevel"));
		assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
	}

	#[rstest]
	fn test_second_init_is_a_no_op() {
		// Arrange
		let settings = LoggingSettings::default();
		init(&settings);

		// Act
		let again = init(&settings);

		// Assert
		assert!(!again);
	}
}
