//! Country reference list

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
	/// ISO 3166-1 alpha-2 code
	pub code: String,
	pub name: String,
}

impl Country {
	pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			name: name.into(),
		}
	}
}

const REFERENCE_COUNTRIES: &[(&str, &str)] = &[
	("US", "United States"),
	("CA", "Canada"),
	("GB", "United Kingdom"),
	("AU", "Australia"),
	("DE", "Germany"),
	("FR", "France"),
	("JP", "Japan"),
	("BR", "Brazil"),
	("IN", "India"),
	("CN", "China"),
	("RU", "Russia"),
	("MX", "Mexico"),
	("IT", "Italy"),
	("ES", "Spain"),
	("KR", "South Korea"),
	("SA", "Saudi Arabia"),
	("ZA", "South Africa"),
	("EG", "Egypt"),
	("NG", "Nigeria"),
	("AR", "Argentina"),
];

/// Immutable, name-ordered list of valid countries.
///
/// Ordering approximates a locale-aware comparison: names are compared by
/// their NFD form with combining marks stripped and case folded, falling back
/// to the raw name to keep the order total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryStore {
	countries: Vec<Country>,
}

impl CountryStore {
	/// Build a store from any list of countries, sorting it.
	///
	/// # Examples
	///
	/// ```
	/// use formcards_state::{Country, CountryStore};
	///
	/// let store = CountryStore::new(vec![Country::new("US", "USA"), Country::new("RU", "Russia")]);
	/// let names: Vec<_> = store.iter().map(|c| c.name.as_str()).collect();
	/// assert_eq!(names, ["Russia", "USA"]);
	/// ```
	pub fn new(mut countries: Vec<Country>) -> Self {
		countries.sort_by(|a, b| collate(&a.name, &b.name));
		Self { countries }
	}

	/// The built-in twenty-country reference list.
	pub fn reference() -> Self {
		Self::new(
			REFERENCE_COUNTRIES
				.iter()
				.map(|(code, name)| Country::new(*code, *name))
				.collect(),
		)
	}

	pub fn countries(&self) -> &[Country] {
		&self.countries
	}

	pub fn iter(&self) -> impl Iterator<Item = &Country> {
		self.countries.iter()
	}

	pub fn len(&self) -> usize {
		self.countries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.countries.is_empty()
	}

	/// Exact, case-sensitive name lookup.
	pub fn contains_name(&self, name: &str) -> bool {
		self.countries.iter().any(|c| c.name == name)
	}

	pub fn find_by_code(&self, code: &str) -> Option<&Country> {
		self.countries
			.iter()
			.find(|c| c.code.eq_ignore_ascii_case(code))
	}

	/// Countries whose name contains `query`, ignoring case and accents.
	///
	/// An empty or whitespace-only query returns the whole list. Order is
	/// preserved, so suggestions stay alphabetical.
	pub fn suggestions(&self, query: &str) -> Vec<&Country> {
		let needle = collation_key(query.trim());
		self.countries
			.iter()
			.filter(|c| collation_key(&c.name).contains(&needle))
			.collect()
	}
}

impl Default for CountryStore {
	fn default() -> Self {
		Self::reference()
	}
}

impl<'de> Deserialize<'de> for CountryStore {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Vec::<Country>::deserialize(deserializer).map(Self::new)
	}
}

fn collation_key(s: &str) -> String {
	s.nfd()
		.filter(|c| !is_combining_mark(*c))
		.flat_map(char::to_lowercase)
		.collect()
}

fn collate(a: &str, b: &str) -> Ordering {
	collation_key(a)
		.cmp(&collation_key(b))
		.then_with(|| a.cmp(b))
}
