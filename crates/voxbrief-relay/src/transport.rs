//! The chat-platform side of a relay: downloading files and showing activity.

use std::path::Path;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::error::RelayError;

/// Operations the relay needs from the chat platform.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Resolve `file_id` and write its bytes to `dest`.
    async fn download(&self, file_id: &str, dest: &Path) -> Result<(), RelayError>;

    /// Start a best-effort "working" indicator in `chat_id`.
    ///
    /// The indicator stays up until the returned handle is dropped. Failures to
    /// show it must never fail the relay.
    fn working(&self, chat_id: i64) -> WorkingIndicator;
}

/// Handle to a background activity indicator. Aborts the task on drop.
#[derive(Debug, Default)]
pub struct WorkingIndicator(Option<JoinHandle<()>>);

impl WorkingIndicator {
    pub fn from_task(handle: JoinHandle<()>) -> Self {
        Self(Some(handle))
    }

    /// An indicator that shows nothing.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn stop(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
        }
    }
}

impl Drop for WorkingIndicator {
    fn drop(&mut self) {
        self.abort();
    }
}
