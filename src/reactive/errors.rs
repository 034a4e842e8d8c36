use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::error::FetchError;

const ERROR_CHANNEL_SIZE: usize = 32;

/// Per-view channel of user-facing error messages.
///
/// Messages are broadcast to current subscribers; the most recent one is
/// also kept for views that attach later.
#[derive(Clone)]
pub struct ErrorChannel {
    tx: broadcast::Sender<String>,
    latest: Arc<Mutex<Option<String>>>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(ERROR_CHANNEL_SIZE);
        Self {
            tx,
            latest: Arc::new(Mutex::new(None)),
        }
    }

    pub fn push(&self, error: &FetchError) {
        let message = error.user_message();
        tracing::debug!(url = %error.url(), %message, "Error routed to view");
        *self.latest.lock() = Some(message.clone());
        // No subscribers is fine; `latest` still holds the message.
        let _ = self.tx.send(message);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> Option<String> {
        self.latest.lock().clone()
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}
