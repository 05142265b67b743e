use crate::{BroadcastConfig, BroadcastMessage};

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

/// Per-owner broadcast channels: every open tab of an owner receives the same
/// snapshots.
pub struct OwnerBroadcaster {
    inner: Arc<RwLock<BroadcasterInner>>,
    config: BroadcastConfig,
}

struct BroadcasterInner {
    channels: HashMap<Uuid, OwnerChannel>,
}

struct OwnerChannel {
    sender: broadcast::Sender<BroadcastMessage>,
    subscriber_count: usize,
}

impl OwnerBroadcaster {
    pub fn new(config: BroadcastConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BroadcasterInner {
                channels: HashMap::new(),
            })),
            config,
        }
    }

    pub async fn subscribe(&self, owner: Uuid) -> broadcast::Receiver<BroadcastMessage> {
        let mut inner = self.inner.write().await;

        let channel = inner.channels.entry(owner).or_insert_with(|| {
            let (sender, _) = broadcast::channel(self.config.channel_capacity);
            log::info!("Created broadcast channel for owner {owner}");
            OwnerChannel {
                sender,
                subscriber_count: 0,
            }
        });

        channel.subscriber_count += 1;
        log::debug!(
            "Tab subscribed to {owner} ({} total subscribers)",
            channel.subscriber_count
        );

        channel.sender.subscribe()
    }

    /// Returns the remaining subscriber count; the channel is dropped at zero.
    pub async fn unsubscribe(&self, owner: Uuid) -> usize {
        let mut inner = self.inner.write().await;

        let Some(channel) = inner.channels.get_mut(&owner) else {
            return 0;
        };
        channel.subscriber_count = channel.subscriber_count.saturating_sub(1);
        let remaining = channel.subscriber_count;
        log::debug!("Tab unsubscribed from {owner} ({remaining} remaining subscribers)");

        if remaining == 0 {
            inner.channels.remove(&owner);
            log::info!("Removed empty broadcast channel for owner {owner}");
        }

        remaining
    }

    /// Drop the owner's channel. Every tab's receiver sees it closed. Returns
    /// how many tabs were subscribed.
    pub async fn close(&self, owner: Uuid) -> usize {
        let mut inner = self.inner.write().await;

        match inner.channels.remove(&owner) {
            Some(channel) => {
                log::info!(
                    "Closed broadcast channel for owner {owner} ({} subscribers)",
                    channel.subscriber_count
                );
                channel.subscriber_count
            }
            None => 0,
        }
    }

    /// Send to every tab of `owner`. Returns the number of receivers reached.
    pub async fn broadcast(&self, owner: Uuid, message: BroadcastMessage) -> usize {
        let inner = self.inner.read().await;

        match inner.channels.get(&owner) {
            Some(channel) => match channel.sender.send(message) {
                Ok(receiver_count) => {
                    log::debug!("Broadcast to {owner} ({receiver_count} receivers)");
                    receiver_count
                }
                Err(_) => {
                    log::debug!("Broadcast to {owner} had no active receivers");
                    0
                }
            },
            None => {
                log::debug!("No broadcast channel exists for owner {owner}");
                0
            }
        }
    }

    pub async fn subscriber_count(&self, owner: Uuid) -> usize {
        let inner = self.inner.read().await;
        inner
            .channels
            .get(&owner)
            .map(|c| c.subscriber_count)
            .unwrap_or(0)
    }

    pub async fn channel_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.channels.len()
    }
}

impl Clone for OwnerBroadcaster {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
        }
    }
}
