use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyState {
	Down,
	Up,
}

/// A physical key event delivered to a surface. `key` uses DOM key names (`"F11"`, `"Enter"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInput {
	pub state: KeyState,
	pub key: String,
	#[serde(default)]
	pub alt: bool,
}

impl KeyInput {
	#[must_use]
	pub fn down(key: impl Into<String>) -> Self {
		Self {
			state: KeyState::Down,
			key: key.into(),
			alt: false,
		}
	}

	#[must_use]
	pub const fn with_alt(mut self) -> Self {
		self.alt = true;
		self
	}
}

/// What Escape does to a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapeBehavior {
	UnfullscreenOnly,
	#[default]
	UnfullscreenOrExit,
	ExitOnly,
	Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
	ToggleFullscreen,
	ExitFullscreen,
	Close,
	Ignore,
}

#[must_use]
pub fn key_action(input: &KeyInput, fullscreen: bool, escape: EscapeBehavior) -> KeyAction {
	if input.state != KeyState::Down {
		return KeyAction::Ignore;
	}

	match input.key.as_str() {
		"F11" => KeyAction::ToggleFullscreen,
		"Enter" if input.alt => KeyAction::ToggleFullscreen,
		"Escape" => match (escape, fullscreen) {
			(EscapeBehavior::UnfullscreenOnly | EscapeBehavior::UnfullscreenOrExit, true) => {
				KeyAction::ExitFullscreen
			}
			(EscapeBehavior::UnfullscreenOrExit | EscapeBehavior::ExitOnly, _) => KeyAction::Close,
			_ => KeyAction::Ignore,
		},
		_ => KeyAction::Ignore,
	}
}
