use crate::{error::ConfigError, keys::EscapeBehavior};

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Optional file next to the project resources that overrides [`ShellConfig`] defaults.
pub const CONFIG_FILE_NAME: &str = "shell.json";

/// How the project surface is presented when it opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowMode {
	Window,
	#[default]
	Maximize,
	Fullscreen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
	pub title: String,
	pub window_mode: WindowMode,
	pub escape_behavior: EscapeBehavior,
	pub width: f64,
	pub height: f64,
	pub min_width: f64,
	pub min_height: f64,
	pub background_color: String,
	pub index_document: String,
}

impl Default for ShellConfig {
	fn default() -> Self {
		Self {
			title: "School Stars".to_string(),
			window_mode: WindowMode::default(),
			escape_behavior: EscapeBehavior::default(),
			width: 480.0,
			height: 360.0,
			min_width: 50.0,
			min_height: 50.0,
			background_color: "#000000".to_string(),
			index_document: "index.html".to_string(),
		}
	}
}

impl ShellConfig {
	/// Reads [`CONFIG_FILE_NAME`] from `dir`, falling back to defaults when it does not exist.
	pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = dir.as_ref().join(CONFIG_FILE_NAME);

		let contents = match fs::read_to_string(&path) {
			Ok(contents) => contents,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				debug!(path = %path.display(), "No shell config found, using defaults");
				return Ok(Self::default());
			}
			Err(source) => return Err(ConfigError::Io { path, source }),
		};

		let config = serde_json::from_str(&contents)
			.map_err(|source| ConfigError::Json { path: path.clone(), source })?;

		info!(path = %path.display(), "Loaded shell config");

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use tempfile::tempdir;

	#[test]
	fn missing_file_gives_defaults() {
		let dir = tempdir().unwrap();
		assert_eq!(ShellConfig::load(dir.path()).unwrap(), ShellConfig::default());
	}

	#[test]
	fn partial_file_overrides_only_given_fields() {
		let dir = tempdir().unwrap();
		fs::write(
			dir.path().join(CONFIG_FILE_NAME),
			r#"{ "windowMode": "fullscreen", "escapeBehavior": "unfullscreen-only", "title": "Quiz" }"#,
		)
		.unwrap();

		let config = ShellConfig::load(dir.path()).unwrap();
		assert_eq!(config.window_mode, WindowMode::Fullscreen);
		assert_eq!(config.escape_behavior, EscapeBehavior::UnfullscreenOnly);
		assert_eq!(config.title, "Quiz");
		assert!((config.width - 480.0).abs() < f64::EPSILON);
		assert_eq!(config.index_document, "index.html");
	}

	#[test]
	fn malformed_file_is_an_error() {
		let dir = tempdir().unwrap();
		fs::write(dir.path().join(CONFIG_FILE_NAME), "{ windowMode: ").unwrap();

		assert!(matches!(
			ShellConfig::load(dir.path()),
			Err(ConfigError::Json { .. })
		));
	}
}
