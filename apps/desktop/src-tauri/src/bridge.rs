use crate::host::TauriHost;

use ss_navigation::{KeyInput, Shell};

use tauri::{State, WebviewWindow};
use tracing::debug;

/// Key events forwarded by the preload bridge of a surface.
///
/// The IPC handle the bridge uses lives in the page's own world, so content can call this command
/// directly. It only ever acts on the calling window, through the same key handling the user
/// already has, and is the only command registered. New commands must hold to that.
#[tauri::command]
pub fn surface_key_input(
	window: WebviewWindow,
	shell: State<'_, Shell<TauriHost>>,
	input: KeyInput,
) {
	match shell.host().binding(window.label()) {
		Some(interceptor) => interceptor.on_key_input(&input),
		None => debug!(label = window.label(), "Key input from unbound window"),
	}
}
