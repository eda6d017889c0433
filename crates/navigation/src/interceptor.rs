use crate::{
	classify::{Category, ClassifiedUrl},
	dispatch::{LinkSender, PendingLink},
	gate::GateVerdict,
	host::Host,
	keys::{key_action, KeyAction, KeyInput, KeyState},
	shell::{Inner, Shell},
	surface::SurfaceId,
};

use std::{fmt, sync::Weak};

use tracing::{debug, error, warn};
use url::Url;

/// What to do with a URL that content tried to reach outside of an allowed in-place navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
	OpenProjectSurface(Url),
	OpenDataSurface(Url),
	OpenExternal(Url),
	Discard,
}

#[must_use]
pub fn decide_link(classified: &ClassifiedUrl) -> LinkAction {
	match (classified.category(), classified.url()) {
		(Category::Data, Some(url)) => LinkAction::OpenDataSurface(url.clone()),
		(Category::Resource, Some(url)) => LinkAction::OpenProjectSurface(url.clone()),
		(Category::SafeExternal, Some(url)) => LinkAction::OpenExternal(url.clone()),
		_ => LinkAction::Discard,
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationVerdict {
	Allow,
	Cancel,
}

/// Only resources may replace what a surface is showing.
#[must_use]
pub fn decide_navigation(classified: &ClassifiedUrl) -> NavigationVerdict {
	if classified.category() == Category::Resource {
		NavigationVerdict::Allow
	} else {
		NavigationVerdict::Cancel
	}
}

/// Answer to a content-initiated new-window request. The runtime never creates the window itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOpenResponse {
	Deny,
}

/// Navigation and input binding of one surface, handed to the host when the surface is created.
pub struct NavigationInterceptor<H> {
	surface: SurfaceId,
	shell: Weak<Inner<H>>,
	links: LinkSender,
}

impl<H> Clone for NavigationInterceptor<H> {
	fn clone(&self) -> Self {
		Self {
			surface: self.surface,
			shell: Weak::clone(&self.shell),
			links: self.links.clone(),
		}
	}
}

impl<H> fmt::Debug for NavigationInterceptor<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavigationInterceptor")
			.field("surface", &self.surface)
			.finish_non_exhaustive()
	}
}

impl<H: Host> NavigationInterceptor<H> {
	pub(crate) const fn new(surface: SurfaceId, shell: Weak<Inner<H>>, links: LinkSender) -> Self {
		Self {
			surface,
			shell,
			links,
		}
	}

	#[must_use]
	pub const fn surface(&self) -> SurfaceId {
		self.surface
	}

	/// Content asked for a new top-level window (`target="_blank"`, `window.open`).
	///
	/// Always denied. The URL is queued and dispatched on the next turn of the event loop, outside
	/// of the callback that is vetoing the runtime's default.
	pub fn on_new_window(&self, url: &str) -> WindowOpenResponse {
		debug!(surface = %self.surface, %url, "Deferring new window request");

		self.links.defer(PendingLink {
			source: self.surface,
			url: url.to_string(),
		});

		WindowOpenResponse::Deny
	}

	/// Content is about to navigate this surface to `url`. Anything but a resource is cancelled on
	/// the spot, so the surface keeps showing trusted content, and queued for dispatch like a
	/// new-window request. Nothing is opened from inside the runtime's navigation callback.
	pub fn on_will_navigate(&self, url: &str) -> NavigationVerdict {
		let Some(shell) = self.shell() else {
			return NavigationVerdict::Cancel;
		};

		let classified = ClassifiedUrl::new(shell.trust_root(), url);
		let verdict = decide_navigation(&classified);

		debug!(
			surface = %self.surface,
			%url,
			category = %classified.category(),
			?verdict,
			"Navigation attempt"
		);

		if verdict == NavigationVerdict::Cancel {
			self.links.defer(PendingLink {
				source: self.surface,
				url: url.to_string(),
			});
		}

		verdict
	}

	/// Runs a `file:` request made from this surface through the shell's network gate. Requests
	/// from surfaces whose shell is gone are cancelled.
	pub fn filter_request(&self, url: &str) -> GateVerdict {
		self.shell()
			.map_or(GateVerdict::Cancel, |shell| shell.filter_request(url))
	}

	/// Fullscreen and close shortcuts, independent of any URL policy.
	pub fn on_key_input(&self, input: &KeyInput) {
		if input.state != KeyState::Down {
			return;
		}

		let Some(shell) = self.shell() else {
			return;
		};
		let host = shell.host();

		let fullscreen = match host.is_fullscreen(self.surface) {
			Ok(fullscreen) => fullscreen,
			Err(e) => {
				debug!(surface = %self.surface, ?e, "Ignoring key input for unknown surface");
				return;
			}
		};

		let result = match key_action(input, fullscreen, shell.config().escape_behavior) {
			KeyAction::ToggleFullscreen => host.set_fullscreen(self.surface, !fullscreen),
			KeyAction::ExitFullscreen => host.set_fullscreen(self.surface, false),
			KeyAction::Close => host.close(self.surface),
			KeyAction::Ignore => Ok(()),
		};

		if let Err(e) = result {
			error!(surface = %self.surface, key = %input.key, ?e, "Failed to handle key input");
		}
	}

	fn shell(&self) -> Option<Shell<H>> {
		let shell = self.shell.upgrade().map(Shell::from_inner);
		if shell.is_none() {
			warn!(surface = %self.surface, "Surface outlived its shell");
		}
		shell
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::trust_root::TrustRoot;

	fn classified(raw: &str) -> ClassifiedUrl {
		ClassifiedUrl::new(&TrustRoot::from_dir("/app").unwrap(), raw)
	}

	#[test]
	fn only_resources_navigate_in_place() {
		assert_eq!(
			decide_navigation(&classified("file:///app/level2.html")),
			NavigationVerdict::Allow
		);
		for raw in [
			"https://example.com",
			"data:,x",
			"file:///etc/passwd",
			"javascript:void(0)",
			"%%%",
		] {
			assert_eq!(
				decide_navigation(&classified(raw)),
				NavigationVerdict::Cancel,
				"{raw}"
			);
		}
	}

	#[test]
	fn link_actions_follow_category() {
		assert!(matches!(
			decide_link(&classified("file:///app/index.html")),
			LinkAction::OpenProjectSurface(url) if url.as_str() == "file:///app/index.html"
		));
		assert!(matches!(
			decide_link(&classified("data:text/plain,hi")),
			LinkAction::OpenDataSurface(_)
		));
		assert!(matches!(
			decide_link(&classified("mailto:someone@example.com")),
			LinkAction::OpenExternal(_)
		));
		assert_eq!(decide_link(&classified("ftp://example.com")), LinkAction::Discard);
		assert_eq!(decide_link(&classified("file:///app/../x")), LinkAction::Discard);
	}
}
