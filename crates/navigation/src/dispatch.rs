use crate::{host::Host, shell::Shell, surface::SurfaceId};

use tokio::sync::mpsc;
use tracing::{debug, trace};

/// A link content tried to open, by new-window request or cancelled navigation, waiting for the
/// next turn of the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLink {
	pub source: SurfaceId,
	pub url: String,
}

#[derive(Debug, Clone)]
pub(crate) struct LinkSender(mpsc::UnboundedSender<PendingLink>);

impl LinkSender {
	pub(crate) fn defer(&self, link: PendingLink) {
		if let Err(mpsc::error::SendError(link)) = self.0.send(link) {
			debug!(source = %link.source, url = %link.url, "Dropped link, dispatch queue is gone");
		}
	}
}

/// Receiving end of the deferred link queue, owned by whoever drives the event loop.
///
/// Links are dispatched strictly in the order they were requested, and each dispatch finishes
/// before the next one starts.
#[derive(Debug)]
pub struct PendingLinks {
	rx: mpsc::UnboundedReceiver<PendingLink>,
}

pub(crate) fn link_queue() -> (LinkSender, PendingLinks) {
	let (tx, rx) = mpsc::unbounded_channel();
	(LinkSender(tx), PendingLinks { rx })
}

impl PendingLinks {
	/// Dispatches every link queued so far and returns how many there were.
	pub fn drain<H: Host>(&mut self, shell: &Shell<H>) -> usize {
		let mut dispatched = 0;
		while let Ok(link) = self.rx.try_recv() {
			trace!(source = %link.source, url = %link.url, "Dispatching deferred link");
			shell.open_link(&link.url);
			dispatched += 1;
		}
		dispatched
	}

	/// Waits for the next queued link.
	pub async fn next(&mut self) -> Option<PendingLink> {
		self.rx.recv().await
	}

	/// Dispatches links as they arrive, for as long as the shell lives.
	pub async fn run<H: Host>(mut self, shell: Shell<H>) {
		while let Some(link) = self.next().await {
			trace!(source = %link.source, url = %link.url, "Dispatching deferred link");
			shell.open_link(&link.url);
		}
	}
}
