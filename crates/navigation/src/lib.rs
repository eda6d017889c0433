//!
//! # Navigation
//!
//! The policy engine behind the School Stars desktop shell. The shell renders a local project inside
//! sandboxed webview surfaces, and every URL the project tries to reach goes through this crate first.
//!
//! Each URL is classified against the [`TrustRoot`] (the installation's own resource directory) into
//! one of four [`Category`] values, and the category alone decides what happens:
//! - [`Category::Resource`] loads in a trusted project surface;
//! - [`Category::Data`] opens in a short lived data surface;
//! - [`Category::SafeExternal`] is handed to the operating system's default handler;
//! - [`Category::Blocked`] is silently dropped.
//!
//! The crate never talks to a windowing runtime directly. Everything it needs from one is described by
//! the [`Host`] trait, so the whole policy can be driven from tests without a webview.
//!
//! ## Basic example
//!
//! ```
//! use ss_navigation::{classify, Category, TrustRoot};
//!
//! let root = TrustRoot::from_dir("/opt/school-stars/project").unwrap();
//!
//! assert_eq!(classify(&root, "file:///opt/school-stars/project/index.html"), Category::Resource);
//! assert_eq!(classify(&root, "file:///opt/school-stars/project/../secrets"), Category::Blocked);
//! assert_eq!(classify(&root, "https://example.com"), Category::SafeExternal);
//! assert_eq!(classify(&root, "data:text/plain,hello"), Category::Data);
//! assert_eq!(classify(&root, "javascript:alert(1)"), Category::Blocked);
//! ```

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod classify;
mod config;
mod crash;
mod dispatch;
mod error;
mod gate;
mod host;
mod interceptor;
mod keys;
mod shell;
mod surface;
mod trust_root;

pub use classify::{classify, Category, ClassifiedUrl, SAFE_EXTERNAL_SCHEMES};
pub use config::{ShellConfig, WindowMode, CONFIG_FILE_NAME};
pub use crash::{
	crash_message, BuildArch, CrashEvent, CrashOrigin, ErrorDialog, FailureReporter,
	GENERIC_MEMORY_HINT, X86_32_MEMORY_HINT,
};
pub use dispatch::{PendingLink, PendingLinks};
pub use error::{ConfigError, HostError, ShellError, TrustRootError};
pub use gate::{GateVerdict, NetworkGate};
pub use host::Host;
pub use interceptor::{
	decide_link, decide_navigation, LinkAction, NavigationInterceptor, NavigationVerdict,
	WindowOpenResponse,
};
pub use keys::{key_action, EscapeBehavior, KeyAction, KeyInput, KeyState};
pub use shell::Shell;
pub use surface::{
	centered_position, Point, Rect, SecurityConfig, SurfaceFactory, SurfaceId, SurfaceOptions,
	SurfaceSpec, PRELOAD_BRIDGE,
};
pub use trust_root::TrustRoot;
