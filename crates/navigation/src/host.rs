use crate::{
	crash::ErrorDialog,
	error::HostError,
	interceptor::NavigationInterceptor,
	surface::{Point, Rect, SurfaceId, SurfaceSpec},
};

use url::Url;

/// Everything the shell needs from the windowing runtime.
///
/// Implementations are expected to be thin: no policy lives here. Failures are reported as
/// [`HostError`] and are never retried by the shell.
pub trait Host: Sized {
	/// Current pointer location in desktop coordinates.
	fn cursor_position(&self) -> Point;

	/// Usable work area (excluding task bars and docks) of the display nearest to `point`.
	fn work_area_near(&self, point: Point) -> Rect;

	/// Opens a new OS window for `spec`.
	///
	/// `interceptor` must be bound to the new surface before any content can load in it: its
	/// [`on_new_window`](NavigationInterceptor::on_new_window) and
	/// [`on_will_navigate`](NavigationInterceptor::on_will_navigate) decide every navigation
	/// and [`on_key_input`](NavigationInterceptor::on_key_input) receives every key event.
	fn create_surface(
		&self,
		spec: &SurfaceSpec,
		interceptor: NavigationInterceptor<Self>,
	) -> Result<(), HostError>;

	/// Loads `url` in `surface`. Loads started by the host are not reported back as navigations.
	fn load_url(&self, surface: SurfaceId, url: &Url) -> Result<(), HostError>;

	fn show(&self, surface: SurfaceId) -> Result<(), HostError>;

	fn maximize(&self, surface: SurfaceId) -> Result<(), HostError>;

	fn is_fullscreen(&self, surface: SurfaceId) -> Result<bool, HostError>;

	fn set_fullscreen(&self, surface: SurfaceId, fullscreen: bool) -> Result<(), HostError>;

	fn close(&self, surface: SurfaceId) -> Result<(), HostError>;

	/// Hands `url` to the operating system's default handler.
	fn open_external(&self, url: &Url) -> Result<(), HostError>;

	/// Shows a modal error dialog and blocks until the user dismisses it. With no parent the dialog
	/// is application-global.
	fn show_error_dialog(&self, parent: Option<SurfaceId>, dialog: &ErrorDialog);

	fn quit(&self);
}
