use crate::error::TrustRootError;

use std::{fmt, path::Path};

use url::Url;

/// Canonical `file:` URL of the installation's resource directory.
///
/// Everything under this prefix is trusted project content. The URL always ends with a `/`, so
/// `file:///app/` never contains `file:///application/`, and it is re-parsed on construction so dot
/// segments in the source path are already collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrustRoot {
	url: Url,
}

impl TrustRoot {
	/// Builds the root from an absolute directory path.
	pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TrustRootError> {
		let dir = dir.as_ref();
		let url = Url::from_directory_path(dir)
			.map_err(|()| TrustRootError::NotAbsolute(dir.to_path_buf()))?;

		Self::from_url(url)
	}

	pub fn from_url(url: Url) -> Result<Self, TrustRootError> {
		if url.scheme() != "file" {
			return Err(TrustRootError::NotFileScheme(url.into()));
		}

		let mut url = Url::parse(url.as_str())?;
		url.set_query(None);
		url.set_fragment(None);
		if !url.path().ends_with('/') {
			let path = format!("{}/", url.path());
			url.set_path(&path);
		}

		Ok(Self { url })
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		self.url.as_str()
	}

	#[must_use]
	pub const fn url(&self) -> &Url {
		&self.url
	}

	/// Resolves a document relative to the root, e.g. the project's `index.html`.
	pub fn join(&self, relative: &str) -> Result<Url, url::ParseError> {
		self.url.join(relative)
	}

	/// Whether an already parsed (and therefore normalized) URL lies under the root.
	#[must_use]
	pub fn contains(&self, url: &Url) -> bool {
		url.scheme() == "file" && url.as_str().starts_with(self.url.as_str())
	}
}

impl fmt::Display for TrustRoot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.url.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn directory_path_gets_trailing_slash() {
		let root = TrustRoot::from_dir("/opt/app").unwrap();
		assert_eq!(root.as_str(), "file:///opt/app/");
	}

	#[test]
	fn dot_segments_in_directory_are_collapsed() {
		let root = TrustRoot::from_dir("/opt/app/../project").unwrap();
		assert_eq!(root.as_str(), "file:///opt/project/");
	}

	#[test]
	fn relative_directory_is_rejected() {
		assert!(matches!(
			TrustRoot::from_dir("project"),
			Err(TrustRootError::NotAbsolute(_))
		));
	}

	#[test]
	fn non_file_url_is_rejected() {
		let url = Url::parse("https://example.com/app/").unwrap();
		assert!(matches!(
			TrustRoot::from_url(url),
			Err(TrustRootError::NotFileScheme(_))
		));
	}

	#[test]
	fn sibling_directory_with_common_prefix_is_not_contained() {
		let root = TrustRoot::from_dir("/app").unwrap();
		let sibling = Url::parse("file:///application/index.html").unwrap();
		assert!(!root.contains(&sibling));
	}

	#[test]
	fn join_resolves_index_document() {
		let root = TrustRoot::from_dir("/app").unwrap();
		assert_eq!(
			root.join("index.html").unwrap().as_str(),
			"file:///app/index.html"
		);
	}
}
