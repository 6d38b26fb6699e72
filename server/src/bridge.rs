//! Seam for external messaging bridges (e.g. a chat-platform bot).
//!
//! A bridge is a distinguished non-socket participant: it receives every
//! broadcast that did not originate from itself, and any text it injects
//! is re-broadcast to all socket participants verbatim. The adapter that
//! actually talks to the external platform lives outside this crate; it
//! only needs a [`BridgeHandle`].

use crate::server::ServerEvent;
use tokio::sync::mpsc;

/// Registry-side end of a bridge: broadcasts are pushed into `outbox`.
#[derive(Debug)]
pub struct BridgeLink {
    pub name: String,
    pub outbox: mpsc::UnboundedSender<String>,
}

/// Handle given to an external bridge adapter.
pub struct BridgeHandle {
    name: String,
    event_tx: mpsc::UnboundedSender<ServerEvent>,
    outbox_rx: mpsc::UnboundedReceiver<String>,
}

impl BridgeHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Injects `text` into the chat as a public broadcast from this
    /// bridge. The text is delivered through the serialized event loop,
    /// never by mutating server state from the adapter's context.
    pub fn publish(&self, text: &str) {
        let _ = self.event_tx.send(ServerEvent::BridgeInbound {
            from: self.name.clone(),
            text: text.to_string(),
        });
    }

    /// Next broadcast destined for this bridge, or `None` once the
    /// server is gone.
    pub async fn recv(&mut self) -> Option<String> {
        self.outbox_rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<String> {
        self.outbox_rx.try_recv().ok()
    }
}

pub(crate) fn create(
    name: &str,
    event_tx: mpsc::UnboundedSender<ServerEvent>,
) -> (BridgeLink, BridgeHandle) {
    let (outbox, outbox_rx) = mpsc::unbounded_channel();
    let link = BridgeLink {
        name: name.to_string(),
        outbox,
    };
    let handle = BridgeHandle {
        name: name.to_string(),
        event_tx,
        outbox_rx,
    };
    (link, handle)
}
