use crate::{host::Host, surface::SurfaceId};

use std::fmt;

use serde::Serialize;
use tracing::error;

pub const X86_32_MEMORY_HINT: &str = "Usually this means the project was too big for the 32-bit \
	environment or your computer is out of memory. Ask the creator to use the 64-bit environment \
	instead.";

pub const GENERIC_MEMORY_HINT: &str = "Usually this means your computer is out of memory.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CrashOrigin {
	Renderer,
	/// A helper process of the runtime, e.g. `GPU` or `Utility`.
	ChildProcess { kind: String },
}

impl fmt::Display for CrashOrigin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Renderer => f.write_str("Renderer process"),
			Self::ChildProcess { kind } => write!(f, "{kind} child process"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrashEvent {
	pub origin: CrashOrigin,
	pub reason: String,
	pub exit_code: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildArch {
	X86_32,
	Other,
}

impl BuildArch {
	#[must_use]
	pub const fn current() -> Self {
		if cfg!(target_arch = "x86") {
			Self::X86_32
		} else {
			Self::Other
		}
	}
}

#[must_use]
pub fn crash_message(event: &CrashEvent, arch: BuildArch) -> String {
	let hint = match arch {
		BuildArch::X86_32 => X86_32_MEMORY_HINT,
		BuildArch::Other => GENERIC_MEMORY_HINT,
	};

	format!(
		"{} crashed: {} ({})\n\n{hint}",
		event.origin, event.reason, event.exit_code
	)
}

/// Contents of a modal error dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDialog {
	pub title: String,
	pub message: String,
}

/// Turns crashes into blocking error dialogs. Nothing is reloaded or restarted afterwards.
#[derive(Debug, Clone, Copy)]
pub struct FailureReporter {
	arch: BuildArch,
}

impl Default for FailureReporter {
	fn default() -> Self {
		Self::new(BuildArch::current())
	}
}

impl FailureReporter {
	#[must_use]
	pub const fn new(arch: BuildArch) -> Self {
		Self { arch }
	}

	#[must_use]
	pub fn dialog(&self, event: &CrashEvent) -> ErrorDialog {
		ErrorDialog {
			title: "Error".to_string(),
			message: crash_message(event, self.arch),
		}
	}

	/// Content process of `surface` went away. The dialog is parented to that surface when the host
	/// still knows it.
	pub fn renderer_gone(&self, host: &impl Host, surface: Option<SurfaceId>, event: &CrashEvent) {
		error!(
			?surface,
			origin = %event.origin,
			reason = %event.reason,
			exit_code = event.exit_code,
			"Content process crashed"
		);

		host.show_error_dialog(surface, &self.dialog(event));
	}

	/// A runtime helper process with no surface attached went away.
	pub fn child_process_gone(&self, host: &impl Host, event: &CrashEvent) {
		error!(
			origin = %event.origin,
			reason = %event.reason,
			exit_code = event.exit_code,
			"Child process crashed"
		);

		host.show_error_dialog(None, &self.dialog(event));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn renderer_oom() -> CrashEvent {
		CrashEvent {
			origin: CrashOrigin::Renderer,
			reason: "oom".to_string(),
			exit_code: 134,
		}
	}

	#[test]
	fn renderer_crash_on_64_bit_gets_generic_hint() {
		let message = crash_message(&renderer_oom(), BuildArch::Other);
		assert_eq!(
			message,
			format!("Renderer process crashed: oom (134)\n\n{GENERIC_MEMORY_HINT}")
		);
		assert!(!message.contains("32-bit"));
	}

	#[test]
	fn renderer_crash_on_32_bit_gets_memory_limit_hint() {
		let message = crash_message(&renderer_oom(), BuildArch::X86_32);
		assert!(message.ends_with(X86_32_MEMORY_HINT));
		assert!(message.contains("32-bit"));
	}

	#[test]
	fn child_process_crash_names_the_process_kind() {
		let event = CrashEvent {
			origin: CrashOrigin::ChildProcess {
				kind: "GPU".to_string(),
			},
			reason: "crashed".to_string(),
			exit_code: -1,
		};
		assert!(crash_message(&event, BuildArch::Other)
			.starts_with("GPU child process crashed: crashed (-1)\n\n"));
	}

	#[test]
	fn dialog_is_titled_error() {
		let dialog = FailureReporter::new(BuildArch::Other).dialog(&renderer_oom());
		assert_eq!(dialog.title, "Error");
		assert!(dialog.message.contains(GENERIC_MEMORY_HINT));
	}
}
