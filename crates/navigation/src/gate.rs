use crate::trust_root::TrustRoot;

use tracing::warn;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
	Allow,
	Cancel,
}

/// Process-wide filter for `file:` requests from any surface or session.
///
/// Independent of the per-surface interceptor: it also sees sub-resource fetches and redirects that
/// never show up as a navigation. Requests for other schemes are not its concern and pass through.
#[derive(Debug, Clone)]
pub struct NetworkGate {
	root: TrustRoot,
}

impl NetworkGate {
	#[must_use]
	pub const fn new(root: TrustRoot) -> Self {
		Self { root }
	}

	/// Whether `url` falls under this gate at all, i.e. the request pattern `file://*`. Decided on
	/// the parsed scheme, so whitespace and control characters the parser strips cannot hide a
	/// `file:` request.
	#[must_use]
	pub fn is_in_scope(url: &str) -> bool {
		Url::parse(url).map_or_else(|_| looks_like_file(url), |parsed| parsed.scheme() == "file")
	}

	pub fn filter(&self, url: &str) -> GateVerdict {
		let parsed = match Url::parse(url) {
			Ok(parsed) if parsed.scheme() != "file" => return GateVerdict::Allow,
			Ok(parsed) => Some(parsed),
			Err(_) if !looks_like_file(url) => return GateVerdict::Allow,
			Err(_) => None,
		};

		if parsed.is_some_and(|parsed| self.root.contains(&parsed)) {
			GateVerdict::Allow
		} else {
			warn!(url = ?url, root = %self.root, "Cancelled file request outside of trust root");
			GateVerdict::Cancel
		}
	}
}

/// Scheme check for strings the parser rejected, reading them the way the parser would: C0 controls
/// and spaces trimmed from both ends, tabs and newlines dropped anywhere.
fn looks_like_file(url: &str) -> bool {
	let scheme = url
		.trim_matches(|c: char| c <= ' ')
		.chars()
		.filter(|c| !matches!(c, '\t' | '\n' | '\r'))
		.take(5)
		.collect::<String>();

	scheme.eq_ignore_ascii_case("file:")
}
