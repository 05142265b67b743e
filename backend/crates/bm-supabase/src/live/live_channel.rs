use crate::Result;

use async_trait::async_trait;
use bm_core::LiveEvent;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// Push notifications for one owner's bookmark rows.
#[async_trait]
pub trait LiveChannel: Send + Sync {
    /// Start listening. The first event is `Status(Connecting)`; dropping the
    /// returned subscription unsubscribes.
    async fn subscribe(&self, access_token: &str, owner: Uuid) -> Result<LiveSubscription>;
}

/// Receiving end of a live subscription.
pub struct LiveSubscription {
    events: mpsc::Receiver<LiveEvent>,
    task: Option<AbortHandle>,
}

impl LiveSubscription {
    /// Subscription driven by a background task, aborted on drop.
    pub fn new(events: mpsc::Receiver<LiveEvent>, task: AbortHandle) -> Self {
        Self {
            events,
            task: Some(task),
        }
    }

    /// Subscription fed directly by the holder of the sender.
    pub fn from_receiver(events: mpsc::Receiver<LiveEvent>) -> Self {
        Self { events, task: None }
    }

    /// Next event; `None` once the channel has ended.
    pub async fn next(&mut self) -> Option<LiveEvent> {
        self.events.recv().await
    }
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
