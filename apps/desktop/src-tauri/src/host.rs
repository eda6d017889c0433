use ss_navigation::{
	ErrorDialog, GateVerdict, Host, HostError, NavigationInterceptor, NavigationVerdict, Point,
	Rect, SurfaceId, SurfaceSpec, WindowOpenResponse,
};

use std::{
	collections::HashMap,
	ops::Range,
	sync::{Arc, Mutex, PoisonError},
};

use tauri::{
	webview::NewWindowResponse, window::Color, AppHandle, Manager, Url, WebviewUrl, WebviewWindow,
	WebviewWindowBuilder,
};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tauri_plugin_opener::OpenerExt;
use tracing::{debug, warn};

/// Injected into every surface before any page script runs. This is the preload bridge; it reaches
/// the shell through [`crate::bridge::surface_key_input`] and nothing else.
const PRELOAD_SCRIPT: &str = include_str!("preload.js");

type Bindings = HashMap<String, NavigationInterceptor<TauriHost>>;

/// [`Host`] backed by Tauri webview windows, one window per surface, labelled by [`SurfaceId`].
pub struct TauriHost {
	app: AppHandle,
	/// Loads started through [`Host::load_url`], keyed by window label. The webview reports these as
	/// navigations too, and they must not go through the interceptor.
	host_loads: Arc<Mutex<HashMap<String, Url>>>,
	bindings: Mutex<Bindings>,
}

impl TauriHost {
	pub fn new(app: AppHandle) -> Self {
		Self {
			app,
			host_loads: Arc::default(),
			bindings: Mutex::default(),
		}
	}

	/// Interceptor bound to the window labelled `label`, while that window lives.
	pub fn binding(&self, label: &str) -> Option<NavigationInterceptor<Self>> {
		self.bindings
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.get(label)
			.cloned()
	}

	/// Drops the binding of a destroyed window.
	pub fn unbind(&self, label: &str) {
		self.bindings
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.remove(label);
		self.host_loads
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.remove(label);
	}

	fn expect_load(&self, label: &str, url: Url) {
		self.host_loads
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(label.to_string(), url);
	}

	fn window(&self, surface: SurfaceId) -> Result<WebviewWindow, HostError> {
		self.app
			.get_webview_window(&surface.label())
			.ok_or_else(|| HostError::new(format!("no window for {surface}")))
	}
}

fn take_host_load(loads: &Mutex<HashMap<String, Url>>, label: &str, url: &Url) -> bool {
	let mut loads = loads.lock().unwrap_or_else(PoisonError::into_inner);
	if loads.get(label) == Some(url) {
		loads.remove(label);
		true
	} else {
		false
	}
}

/// Parses `#rrggbb` into an opaque color.
fn parse_hex_color(color: &str) -> Option<Color> {
	let hex = color.strip_prefix('#')?;
	if hex.len() != 6 {
		return None;
	}

	let channel = |range: Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();

	Some(Color(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255))
}

fn host_error(context: &str) -> impl FnOnce(tauri::Error) -> HostError + '_ {
	move |e| HostError::new(format!("{context}: {e}"))
}

impl Host for TauriHost {
	fn cursor_position(&self) -> Point {
		match self.app.cursor_position() {
			Ok(position) => Point::new(position.x, position.y),
			Err(e) => {
				debug!(?e, "Cursor position unavailable");
				Point::default()
			}
		}
	}

	/// `point` is in physical pixels, the returned area in logical ones.
	fn work_area_near(&self, point: Point) -> Rect {
		let monitor = match self.app.monitor_from_point(point.x, point.y) {
			Ok(Some(monitor)) => Some(monitor),
			_ => self.app.primary_monitor().ok().flatten(),
		};

		let Some(monitor) = monitor else {
			warn!("No display found, centering on a default work area");
			return Rect::new(0.0, 0.0, 1280.0, 720.0);
		};

		let scale = monitor.scale_factor();
		let area = monitor.work_area();

		Rect::new(
			f64::from(area.position.x) / scale,
			f64::from(area.position.y) / scale,
			f64::from(area.size.width) / scale,
			f64::from(area.size.height) / scale,
		)
	}

	fn create_surface(
		&self,
		spec: &SurfaceSpec,
		interceptor: NavigationInterceptor<Self>,
	) -> Result<(), HostError> {
		let security = &spec.security;
		if !security.sandbox || !security.context_isolation || security.host_api_exposed {
			return Err(HostError::new(format!(
				"refusing to create {} with weakened security",
				spec.id
			)));
		}

		let label = spec.id.label();
		let blank = Url::parse("about:blank").map_err(|e| HostError::new(e.to_string()))?;
		self.expect_load(&label, blank.clone());

		let loads = Arc::clone(&self.host_loads);
		let navigation = interceptor.clone();
		let navigation_label = label.clone();
		let new_window = interceptor.clone();

		let mut builder = WebviewWindowBuilder::new(&self.app, &label, WebviewUrl::External(blank))
			.title(&spec.title)
			.inner_size(spec.bounds.width, spec.bounds.height)
			.position(spec.bounds.x, spec.bounds.y)
			.visible(spec.visible)
			.fullscreen(spec.fullscreen)
			.initialization_script(PRELOAD_SCRIPT)
			.on_navigation(move |url| {
				if take_host_load(&loads, &navigation_label, url) {
					return true;
				}

				if navigation.filter_request(url.as_str()) == GateVerdict::Cancel {
					return false;
				}

				navigation.on_will_navigate(url.as_str()) == NavigationVerdict::Allow
			})
			.on_new_window(move |url, _features| {
				match new_window.on_new_window(url.as_str()) {
					WindowOpenResponse::Deny => NewWindowResponse::Deny,
				}
			});

		if let Some((width, height)) = spec.min_size {
			builder = builder.min_inner_size(width, height);
		}

		if let Some(color) = spec.background_color.as_deref().and_then(parse_hex_color) {
			builder = builder.background_color(color);
		}

		builder
			.build()
			.map_err(host_error("failed to create surface"))?;

		debug!(surface = %spec.id, preload = security.preload, "Bound interceptor to surface");

		self.bindings
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(label, interceptor);

		Ok(())
	}

	fn load_url(&self, surface: SurfaceId, url: &Url) -> Result<(), HostError> {
		let window = self.window(surface)?;
		self.expect_load(window.label(), url.clone());

		window
			.navigate(url.clone())
			.map_err(host_error("failed to load url"))
	}

	fn show(&self, surface: SurfaceId) -> Result<(), HostError> {
		self.window(surface)?
			.show()
			.map_err(host_error("failed to show surface"))
	}

	fn maximize(&self, surface: SurfaceId) -> Result<(), HostError> {
		self.window(surface)?
			.maximize()
			.map_err(host_error("failed to maximize surface"))
	}

	fn is_fullscreen(&self, surface: SurfaceId) -> Result<bool, HostError> {
		self.window(surface)?
			.is_fullscreen()
			.map_err(host_error("failed to query fullscreen"))
	}

	fn set_fullscreen(&self, surface: SurfaceId, fullscreen: bool) -> Result<(), HostError> {
		self.window(surface)?
			.set_fullscreen(fullscreen)
			.map_err(host_error("failed to set fullscreen"))
	}

	fn close(&self, surface: SurfaceId) -> Result<(), HostError> {
		self.window(surface)?
			.close()
			.map_err(host_error("failed to close surface"))
	}

	fn open_external(&self, url: &Url) -> Result<(), HostError> {
		self.app
			.opener()
			.open_url(url.as_str(), None::<&str>)
			.map_err(|e| HostError::new(format!("failed to open {url}: {e}")))
	}

	fn show_error_dialog(&self, parent: Option<SurfaceId>, dialog: &ErrorDialog) {
		let mut message = self
			.app
			.dialog()
			.message(dialog.message.clone())
			.title(dialog.title.clone())
			.kind(MessageDialogKind::Error);

		if let Some(window) = parent.and_then(|surface| self.window(surface).ok()) {
			message = message.parent(&window);
		}

		message.blocking_show();
	}

	fn quit(&self) {
		self.app.exit(0);
	}
}
