// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod bridge;
mod host;

use host::TauriHost;

use ss_navigation::{Shell, ShellConfig, TrustRoot};

use tauri::{Manager, RunEvent, WindowEvent};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Directory inside the app resources that holds the bundled project.
const PROJECT_DIR: &str = "project";

fn main() {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info".into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	let app = tauri::Builder::default()
		.plugin(tauri_plugin_dialog::init())
		.plugin(tauri_plugin_opener::init())
		.invoke_handler(tauri::generate_handler![bridge::surface_key_input])
		.setup(|app| {
			let project_dir = app.path().resource_dir()?.join(PROJECT_DIR);
			info!(project_dir = %project_dir.display(), "School Stars starting...");

			let config = ShellConfig::load(&project_dir)?;
			let root = TrustRoot::from_dir(&project_dir)?;

			let (shell, pending) = Shell::new(TauriHost::new(app.handle().clone()), root, config);

			// Links content tried to open are dispatched from here, never from inside a webview callback
			tauri::async_runtime::spawn(pending.run(shell.clone()));

			shell.start()?;
			app.manage(shell);

			Ok(())
		})
		.build(tauri::generate_context!());

	let app = match app {
		Ok(app) => app,
		Err(e) => {
			error!(?e, "Failed to build application");
			return;
		}
	};

	app.run(|app, event| {
		if let RunEvent::WindowEvent {
			label,
			event: WindowEvent::Destroyed,
			..
		} = event
		{
			let Some(shell) = app.try_state::<Shell<TauriHost>>() else {
				return;
			};
			shell.host().unbind(&label);

			if app.webview_windows().is_empty() {
				shell.all_surfaces_closed();
			}
		}
	});
}
