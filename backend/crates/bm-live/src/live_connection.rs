use crate::{
    BroadcastMessage, ConnectionConfig, ConnectionId, LiveError, Metrics, OwnerBroadcaster,
    Result as LiveErrorResult, ShutdownGuard,
};

use std::panic::Location;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

/// One open dashboard tab. Pushes the owner's snapshots until the browser
/// goes away or the server shuts down. The tab only listens; anything it
/// sends besides control frames is ignored.
pub struct LiveConnection {
    connection_id: ConnectionId,
    owner: Uuid,
    config: ConnectionConfig,
    metrics: Metrics,
    broadcaster: OwnerBroadcaster,
}

impl LiveConnection {
    pub fn new(
        connection_id: ConnectionId,
        owner: Uuid,
        config: ConnectionConfig,
        metrics: Metrics,
        broadcaster: OwnerBroadcaster,
    ) -> Self {
        Self {
            connection_id,
            owner,
            config,
            metrics,
            broadcaster,
        }
    }

    /// Run the connection. `updates` must have been subscribed before
    /// `initial` was rendered so no change falls in between; the subscription
    /// is released on return.
    pub async fn handle(
        self,
        socket: WebSocket,
        mut updates: broadcast::Receiver<BroadcastMessage>,
        initial: BroadcastMessage,
        mut shutdown_guard: ShutdownGuard,
    ) -> LiveErrorResult<()> {
        log::info!(
            "Live connection {} established for {}",
            self.connection_id,
            self.owner
        );
        self.metrics.connection_established();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded outgoing queue
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
            let _ = ws_sender.close().await;
        });

        let mut heartbeat = tokio::time::interval(self.config.heartbeat_interval());
        heartbeat.tick().await;

        let result = match self.forward(initial, &tx).await {
            Err(e) => Err(e),
            Ok(()) => loop {
                tokio::select! {
                    msg = ws_receiver.next() => {
                        match msg {
                            Some(Ok(Message::Close(_))) | None => {
                                log::info!("Connection {} closed by client", self.connection_id);
                                break Ok(());
                            }
                            Some(Ok(Message::Ping(data))) => {
                                if let Err(e) = Self::queue(&tx, Message::Pong(data)) {
                                    break Err(e);
                                }
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                log::warn!("WebSocket error on connection {}: {e}", self.connection_id);
                                break Err(LiveError::ConnectionClosed {
                                    reason: format!("WebSocket error: {e}"),
                                    location: ErrorLocation::from(Location::caller()),
                                });
                            }
                        }
                    }

                    update = updates.recv() => {
                        match update {
                            Ok(msg) => {
                                if let Err(e) = self.forward(msg, &tx).await {
                                    break Err(e);
                                }
                            }
                            // Snapshots are full state, so skipping ahead loses nothing
                            Err(RecvError::Lagged(missed)) => {
                                log::warn!(
                                    "Connection {} lagged, skipped {missed} snapshots",
                                    self.connection_id
                                );
                                self.metrics.error_occurred("broadcast_lagged");
                            }
                            Err(RecvError::Closed) => {
                                log::info!("Broadcast channel closed for connection {}", self.connection_id);
                                break Ok(());
                            }
                        }
                    }

                    _ = heartbeat.tick() => {
                        if let Err(e) = Self::queue(&tx, Message::Ping(Bytes::new())) {
                            break Err(e);
                        }
                    }

                    _ = shutdown_guard.wait() => {
                        log::info!("Shutting down connection {} gracefully", self.connection_id);
                        let _ = Self::queue(&tx, Message::Close(None));
                        break Ok(());
                    }
                }
            },
        };

        self.broadcaster.unsubscribe(self.owner).await;
        drop(tx);
        let _ = send_task.await;

        match &result {
            Ok(()) => self.metrics.connection_closed("normal"),
            Err(e) => {
                self.metrics.error_occurred(e.kind());
                self.metrics.connection_closed("error");
            }
        }
        log::info!(
            "Live connection {} closed for {}",
            self.connection_id,
            self.owner
        );

        result
    }

    async fn forward(
        &self,
        msg: BroadcastMessage,
        tx: &mpsc::Sender<Message>,
    ) -> LiveErrorResult<()> {
        tx.send(Message::Text(msg.payload.into()))
            .await
            .map_err(|_| LiveError::ConnectionClosed {
                reason: String::from("send task ended"),
                location: ErrorLocation::from(Location::caller()),
            })?;
        self.metrics.message_sent(&msg.message_type);
        Ok(())
    }

    /// Control frames never wait on a full queue.
    fn queue(tx: &mpsc::Sender<Message>, msg: Message) -> LiveErrorResult<()> {
        tx.try_send(msg).map_err(|e| match e {
            TrySendError::Full(_) => LiveError::SendBufferFull {
                location: ErrorLocation::from(Location::caller()),
            },
            TrySendError::Closed(_) => LiveError::ConnectionClosed {
                reason: String::from("send task ended"),
                location: ErrorLocation::from(Location::caller()),
            },
        })
    }
}
