use crate::trust_root::TrustRoot;

use std::fmt;

use serde::Serialize;
use url::Url;

/// Schemes that are handed to the operating system instead of being rendered in-app.
pub const SAFE_EXTERNAL_SCHEMES: [&str; 3] = ["https", "http", "mailto"];

/// Trust category of a URL. Total over all strings: anything unrecognized is `Blocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
	Resource,
	Data,
	SafeExternal,
	Blocked,
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Resource => "resource",
			Self::Data => "data",
			Self::SafeExternal => "safe-external",
			Self::Blocked => "blocked",
		})
	}
}

/// A raw URL together with its parsed form and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedUrl {
	raw: String,
	parsed: Option<Url>,
	category: Category,
}

impl ClassifiedUrl {
	#[must_use]
	pub fn new(root: &TrustRoot, raw: impl Into<String>) -> Self {
		let raw = raw.into();

		let Ok(parsed) = Url::parse(&raw) else {
			return Self {
				raw,
				parsed: None,
				category: Category::Blocked,
			};
		};

		let category = match parsed.scheme() {
			"file" if root.contains(&parsed) => Category::Resource,
			"data" => Category::Data,
			scheme if SAFE_EXTERNAL_SCHEMES.contains(&scheme) => Category::SafeExternal,
			_ => Category::Blocked,
		};

		Self {
			raw,
			parsed: Some(parsed),
			category,
		}
	}

	#[must_use]
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Parsed and normalized URL, `None` when the raw string did not parse.
	#[must_use]
	pub const fn url(&self) -> Option<&Url> {
		self.parsed.as_ref()
	}

	#[must_use]
	pub fn scheme(&self) -> Option<&str> {
		self.parsed.as_ref().map(Url::scheme)
	}

	#[must_use]
	pub const fn category(&self) -> Category {
		self.category
	}
}

/// Classifies `raw` against `root`. Never fails.
#[must_use]
pub fn classify(root: &TrustRoot, raw: &str) -> Category {
	ClassifiedUrl::new(root, raw).category()
}
