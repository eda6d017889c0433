use crate::{
	classify::ClassifiedUrl,
	config::{ShellConfig, WindowMode},
	crash::{CrashEvent, FailureReporter},
	dispatch::{link_queue, LinkSender, PendingLinks},
	error::{HostError, ShellError},
	gate::{GateVerdict, NetworkGate},
	host::Host,
	interceptor::{decide_link, LinkAction, NavigationInterceptor},
	surface::{SurfaceFactory, SurfaceId, SurfaceOptions},
	trust_root::TrustRoot,
};

use std::{fmt, sync::Arc};

use tracing::{debug, error, info, warn};
use url::Url;

pub(crate) struct Inner<H> {
	host: H,
	root: TrustRoot,
	config: ShellConfig,
	factory: SurfaceFactory,
	gate: NetworkGate,
	reporter: FailureReporter,
	links: LinkSender,
}

/// Root context of the application: owns the host, the process-wide listeners (network gate and
/// failure reporter) and creates every surface. Cheap to clone.
pub struct Shell<H> {
	inner: Arc<Inner<H>>,
}

impl<H> Clone for Shell<H> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<H> fmt::Debug for Shell<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Shell")
			.field("root", &self.inner.root)
			.field("config", &self.inner.config)
			.finish_non_exhaustive()
	}
}

impl<H: Host> Shell<H> {
	/// Returns the shell together with the queue of deferred new-window requests, which the caller
	/// must drain from its event loop.
	pub fn new(host: H, root: TrustRoot, config: ShellConfig) -> (Self, PendingLinks) {
		Self::with_failure_reporter(host, root, config, FailureReporter::default())
	}

	pub fn with_failure_reporter(
		host: H,
		root: TrustRoot,
		config: ShellConfig,
		reporter: FailureReporter,
	) -> (Self, PendingLinks) {
		let (links, pending) = link_queue();

		let shell = Self {
			inner: Arc::new(Inner {
				host,
				factory: SurfaceFactory::new(&config),
				gate: NetworkGate::new(root.clone()),
				root,
				config,
				reporter,
				links,
			}),
		};

		(shell, pending)
	}

	pub(crate) const fn from_inner(inner: Arc<Inner<H>>) -> Self {
		Self { inner }
	}

	#[must_use]
	pub fn host(&self) -> &H {
		&self.inner.host
	}

	#[must_use]
	pub fn trust_root(&self) -> &TrustRoot {
		&self.inner.root
	}

	#[must_use]
	pub fn config(&self) -> &ShellConfig {
		&self.inner.config
	}

	#[must_use]
	pub fn network_gate(&self) -> &NetworkGate {
		&self.inner.gate
	}

	/// Opens the project's index document. Called once, when the runtime is ready.
	pub fn start(&self) -> Result<SurfaceId, ShellError> {
		let index = &self.inner.config.index_document;
		let url = self
			.inner
			.root
			.join(index)
			.map_err(|source| ShellError::IndexDocument {
				path: index.clone(),
				source,
			})?;

		info!(root = %self.inner.root, %url, "Starting shell");

		Ok(self.create_project_surface(&url)?)
	}

	/// Creates a surface with the locked security configuration and its interceptor attached.
	pub fn create_surface(&self, options: SurfaceOptions) -> Result<SurfaceId, HostError> {
		let spec = self.inner.factory.spec(&self.inner.host, options);
		let interceptor = NavigationInterceptor::new(
			spec.id,
			Arc::downgrade(&self.inner),
			self.inner.links.clone(),
		);

		self.inner.host.create_surface(&spec, interceptor)?;

		info!(
			surface = %spec.id,
			x = spec.bounds.x,
			y = spec.bounds.y,
			width = spec.bounds.width,
			height = spec.bounds.height,
			"Created surface"
		);

		Ok(spec.id)
	}

	/// Long lived surface for trusted content: hidden until loaded, then shown in the configured
	/// window mode.
	pub fn create_project_surface(&self, url: &Url) -> Result<SurfaceId, HostError> {
		let config = &self.inner.config;
		let host = &self.inner.host;

		let surface = self.create_surface(SurfaceOptions {
			min_size: Some((config.min_width, config.min_height)),
			background_color: Some(config.background_color.clone()),
			visible: false,
			fullscreen: config.window_mode == WindowMode::Fullscreen,
			..SurfaceOptions::from_config(config)
		})?;

		if config.window_mode == WindowMode::Maximize {
			host.maximize(surface)?;
		}
		host.load_url(surface, url)?;
		host.show(surface)?;

		Ok(surface)
	}

	/// Transient, un-maximized surface showing a `data:` URL.
	pub fn create_data_surface(&self, url: &Url) -> Result<SurfaceId, HostError> {
		let surface = self.create_surface(SurfaceOptions::from_config(&self.inner.config))?;
		self.inner.host.load_url(surface, url)?;

		Ok(surface)
	}

	/// Classifies `url` afresh and acts on it.
	pub fn open_link(&self, url: &str) {
		let classified = ClassifiedUrl::new(&self.inner.root, url);
		debug!(%url, category = %classified.category(), "Opening link");

		self.perform(decide_link(&classified));
	}

	fn perform(&self, action: LinkAction) {
		let result = match action {
			LinkAction::OpenProjectSurface(url) => self.create_project_surface(&url).map(drop),
			LinkAction::OpenDataSurface(url) => self.create_data_surface(&url).map(drop),
			LinkAction::OpenExternal(url) => {
				info!(%url, "Handing link to the system");
				self.inner.host.open_external(&url)
			}
			LinkAction::Discard => {
				warn!("Discarded link outside of navigation policy");
				Ok(())
			}
		};

		if let Err(e) = result {
			error!(?e, "Failed to dispatch link");
		}
	}

	/// Network gate entry point for the host's request interception.
	#[must_use]
	pub fn filter_request(&self, url: &str) -> GateVerdict {
		self.inner.gate.filter(url)
	}

	pub fn renderer_gone(&self, surface: Option<SurfaceId>, event: &CrashEvent) {
		self.inner
			.reporter
			.renderer_gone(&self.inner.host, surface, event);
	}

	pub fn child_process_gone(&self, event: &CrashEvent) {
		self.inner
			.reporter
			.child_process_gone(&self.inner.host, event);
	}

	/// Closing the last surface ends the application.
	pub fn all_surfaces_closed(&self) {
		info!("All surfaces closed, quitting");
		self.inner.host.quit();
	}
}
