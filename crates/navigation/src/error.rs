use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrustRootError {
	#[error("resource directory must be an absolute path <path='{}'>", .0.display())]
	NotAbsolute(PathBuf),
	#[error("trust root must use the file scheme <url='{0}'>")]
	NotFileScheme(String),
	#[error("invalid trust root url: {0}")]
	Parse(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read shell config <path='{}'>: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("malformed shell config <path='{}'>: {source}", .path.display())]
	Json {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

/// Failure reported by the windowing runtime. The core never retries these.
#[derive(Debug, Error)]
#[error("host failure: {0}")]
pub struct HostError(pub String);

impl HostError {
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

#[derive(Debug, Error)]
pub enum ShellError {
	#[error(transparent)]
	TrustRoot(#[from] TrustRootError),
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Host(#[from] HostError),
	#[error("invalid index document <path='{path}'>: {source}")]
	IndexDocument {
		path: String,
		#[source]
		source: url::ParseError,
	},
}
