#![allow(dead_code)]

use ss_navigation::{
	BuildArch, ErrorDialog, FailureReporter, Host, HostError, NavigationInterceptor, PendingLinks,
	Point, Rect, Shell, ShellConfig, SurfaceId, SurfaceSpec, TrustRoot,
};

use std::{cell::RefCell, collections::BTreeMap};

use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
	CreateSurface(SurfaceId),
	LoadUrl(SurfaceId, String),
	Show(SurfaceId),
	Maximize(SurfaceId),
	SetFullscreen(SurfaceId, bool),
	Close(SurfaceId),
	OpenExternal(String),
	ErrorDialog(Option<SurfaceId>, ErrorDialog),
	Quit,
}

#[derive(Debug)]
pub struct FakeSurface {
	pub spec: SurfaceSpec,
	pub interceptor: NavigationInterceptor<RecordingHost>,
	pub location: Option<String>,
	pub fullscreen: bool,
	pub maximized: bool,
	pub visible: bool,
	pub closed: bool,
}

/// In-memory host that records every call the shell makes.
#[derive(Debug, Default)]
pub struct RecordingHost {
	pub cursor: Point,
	pub displays: Vec<Rect>,
	calls: RefCell<Vec<HostCall>>,
	surfaces: RefCell<BTreeMap<SurfaceId, FakeSurface>>,
}

impl RecordingHost {
	pub fn with_displays(cursor: Point, displays: Vec<Rect>) -> Self {
		Self {
			cursor,
			displays,
			..Self::default()
		}
	}

	pub fn calls(&self) -> Vec<HostCall> {
		self.calls.borrow().clone()
	}

	pub fn clear_calls(&self) {
		self.calls.borrow_mut().clear();
	}

	pub fn surface_ids(&self) -> Vec<SurfaceId> {
		self.surfaces.borrow().keys().copied().collect()
	}

	pub fn interceptor(&self, surface: SurfaceId) -> NavigationInterceptor<RecordingHost> {
		self.surfaces.borrow()[&surface].interceptor.clone()
	}

	pub fn spec(&self, surface: SurfaceId) -> SurfaceSpec {
		self.surfaces.borrow()[&surface].spec.clone()
	}

	pub fn location(&self, surface: SurfaceId) -> Option<String> {
		self.surfaces.borrow()[&surface].location.clone()
	}

	pub fn fullscreen(&self, surface: SurfaceId) -> bool {
		self.surfaces.borrow()[&surface].fullscreen
	}

	pub fn maximized(&self, surface: SurfaceId) -> bool {
		self.surfaces.borrow()[&surface].maximized
	}

	pub fn visible(&self, surface: SurfaceId) -> bool {
		self.surfaces.borrow()[&surface].visible
	}

	pub fn closed(&self, surface: SurfaceId) -> bool {
		self.surfaces.borrow()[&surface].closed
	}

	fn record(&self, call: HostCall) {
		self.calls.borrow_mut().push(call);
	}

	fn with_open_surface<T>(
		&self,
		surface: SurfaceId,
		f: impl FnOnce(&mut FakeSurface) -> T,
	) -> Result<T, HostError> {
		match self.surfaces.borrow_mut().get_mut(&surface) {
			Some(fake) if !fake.closed => Ok(f(fake)),
			_ => Err(HostError::new(format!("no open surface {surface}"))),
		}
	}
}

impl Host for RecordingHost {
	fn cursor_position(&self) -> Point {
		self.cursor
	}

	fn work_area_near(&self, point: Point) -> Rect {
		self.displays
			.iter()
			.find(|area| {
				point.x >= area.x
					&& point.x < area.x + area.width
					&& point.y >= area.y
					&& point.y < area.y + area.height
			})
			.or_else(|| self.displays.first())
			.copied()
			.unwrap_or(Rect::new(0.0, 0.0, 1920.0, 1080.0))
	}

	fn create_surface(
		&self,
		spec: &SurfaceSpec,
		interceptor: NavigationInterceptor<Self>,
	) -> Result<(), HostError> {
		self.record(HostCall::CreateSurface(spec.id));
		self.surfaces.borrow_mut().insert(
			spec.id,
			FakeSurface {
				spec: spec.clone(),
				interceptor,
				location: None,
				fullscreen: spec.fullscreen,
				maximized: false,
				visible: spec.visible,
				closed: false,
			},
		);
		Ok(())
	}

	fn load_url(&self, surface: SurfaceId, url: &Url) -> Result<(), HostError> {
		self.record(HostCall::LoadUrl(surface, url.to_string()));
		self.with_open_surface(surface, |fake| fake.location = Some(url.to_string()))
	}

	fn show(&self, surface: SurfaceId) -> Result<(), HostError> {
		self.record(HostCall::Show(surface));
		self.with_open_surface(surface, |fake| fake.visible = true)
	}

	fn maximize(&self, surface: SurfaceId) -> Result<(), HostError> {
		self.record(HostCall::Maximize(surface));
		self.with_open_surface(surface, |fake| fake.maximized = true)
	}

	fn is_fullscreen(&self, surface: SurfaceId) -> Result<bool, HostError> {
		self.with_open_surface(surface, |fake| fake.fullscreen)
	}

	fn set_fullscreen(&self, surface: SurfaceId, fullscreen: bool) -> Result<(), HostError> {
		self.record(HostCall::SetFullscreen(surface, fullscreen));
		self.with_open_surface(surface, |fake| fake.fullscreen = fullscreen)
	}

	fn close(&self, surface: SurfaceId) -> Result<(), HostError> {
		self.record(HostCall::Close(surface));
		self.with_open_surface(surface, |fake| fake.closed = true)
	}

	fn open_external(&self, url: &Url) -> Result<(), HostError> {
		self.record(HostCall::OpenExternal(url.to_string()));
		Ok(())
	}

	fn show_error_dialog(&self, parent: Option<SurfaceId>, dialog: &ErrorDialog) {
		self.record(HostCall::ErrorDialog(parent, dialog.clone()));
	}

	fn quit(&self) {
		self.record(HostCall::Quit);
	}
}

pub fn root() -> TrustRoot {
	TrustRoot::from_dir("/app").unwrap()
}

pub fn shell_with(host: RecordingHost, config: ShellConfig) -> (Shell<RecordingHost>, PendingLinks) {
	Shell::with_failure_reporter(host, root(), config, FailureReporter::new(BuildArch::Other))
}

pub fn shell() -> (Shell<RecordingHost>, PendingLinks) {
	shell_with(RecordingHost::default(), ShellConfig::default())
}

/// Shell with the project surface already open and the startup calls cleared.
pub fn started() -> (Shell<RecordingHost>, PendingLinks, SurfaceId) {
	let (shell, pending) = shell();
	let project = shell.start().unwrap();
	shell.host().clear_calls();
	(shell, pending, project)
}
