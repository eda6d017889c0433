use crate::{config::ShellConfig, host::Host};

use std::{
	fmt,
	sync::atomic::{AtomicU64, Ordering},
};

use serde::Serialize;

/// File name of the preload bridge, resolved by the host next to the project resources. It is the
/// only channel through which content can reach privileged functionality.
pub const PRELOAD_BRIDGE: &str = "preload.js";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	#[must_use]
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	#[must_use]
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}
}

/// Identifier of one content surface, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SurfaceId(u64);

impl SurfaceId {
	#[must_use]
	pub const fn new(id: u64) -> Self {
		Self(id)
	}

	/// Window label used by the host runtime.
	#[must_use]
	pub fn label(self) -> String {
		self.to_string()
	}
}

impl fmt::Display for SurfaceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "surface-{}", self.0)
	}
}

/// Security settings applied to every surface. Not part of [`SurfaceOptions`], so callers have no
/// way to weaken them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityConfig {
	pub sandbox: bool,
	pub context_isolation: bool,
	pub host_api_exposed: bool,
	pub preload: &'static str,
}

impl SecurityConfig {
	pub const LOCKED: Self = Self {
		sandbox: true,
		context_isolation: true,
		host_api_exposed: false,
		preload: PRELOAD_BRIDGE,
	};
}

/// What a caller may choose about a new surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
	pub width: f64,
	pub height: f64,
	pub min_size: Option<(f64, f64)>,
	pub background_color: Option<String>,
	pub visible: bool,
	pub fullscreen: bool,
}

impl SurfaceOptions {
	#[must_use]
	pub fn from_config(config: &ShellConfig) -> Self {
		Self {
			width: config.width,
			height: config.height,
			min_size: None,
			background_color: None,
			visible: true,
			fullscreen: false,
		}
	}
}

/// Fully resolved description of a surface, handed to [`Host::create_surface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceSpec {
	pub id: SurfaceId,
	pub title: String,
	pub bounds: Rect,
	pub min_size: Option<(f64, f64)>,
	pub background_color: Option<String>,
	pub visible: bool,
	pub fullscreen: bool,
	pub security: SecurityConfig,
}

/// Top-left position that centers a `width` x `height` surface in `work_area`.
#[must_use]
pub fn centered_position(work_area: Rect, width: f64, height: f64) -> Point {
	Point::new(
		work_area.x + (work_area.width - width) / 2.0,
		work_area.y + (work_area.height - height) / 2.0,
	)
}

/// Turns caller options into a [`SurfaceSpec`]: allocates the id, centers on the display under the
/// pointer and pins the security configuration.
#[derive(Debug)]
pub struct SurfaceFactory {
	title: String,
	next_id: AtomicU64,
}

impl SurfaceFactory {
	#[must_use]
	pub fn new(config: &ShellConfig) -> Self {
		Self {
			title: config.title.clone(),
			next_id: AtomicU64::new(1),
		}
	}

	pub fn spec(&self, host: &impl Host, options: SurfaceOptions) -> SurfaceSpec {
		let work_area = host.work_area_near(host.cursor_position());
		let Point { x, y } = centered_position(work_area, options.width, options.height);

		SurfaceSpec {
			id: SurfaceId(self.next_id.fetch_add(1, Ordering::Relaxed)),
			title: self.title.clone(),
			bounds: Rect::new(x, y, options.width, options.height),
			min_size: options.min_size,
			background_color: options.background_color,
			visible: options.visible,
			fullscreen: options.fullscreen,
			security: SecurityConfig::LOCKED,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn centers_in_work_area_with_offset_origin() {
		let work_area = Rect::new(1920.0, 40.0, 1280.0, 984.0);
		assert_eq!(
			centered_position(work_area, 480.0, 360.0),
			Point::new(2320.0, 352.0)
		);
	}

	#[test]
	fn oversized_surface_is_centered_with_negative_offset() {
		let work_area = Rect::new(0.0, 0.0, 400.0, 300.0);
		assert_eq!(
			centered_position(work_area, 480.0, 360.0),
			Point::new(-40.0, -30.0)
		);
	}

	#[test]
	fn surface_ids_label_their_windows() {
		assert_eq!(SurfaceId::new(3).label(), "surface-3");
	}

	#[test]
	fn locked_security_config() {
		let security = SecurityConfig::LOCKED;
		assert!(security.sandbox);
		assert!(security.context_isolation);
		assert!(!security.host_api_exposed);
		assert_eq!(security.preload, PRELOAD_BRIDGE);
	}
}
