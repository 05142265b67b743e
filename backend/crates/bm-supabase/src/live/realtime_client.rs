use crate::live::phoenix::{self, PROTOCOL_VERSION, PhoenixFrame};
use crate::{BackendClient, BackendError, LiveChannel, LiveSubscription, Result};

use std::time::Duration;

use async_trait::async_trait;
use bm_config::RealtimeConfig;
use bm_core::{LiveEvent, SubscriptionStatus};
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;
use uuid::Uuid;

const SOCKET_PATH: &str = "realtime/v1/websocket";
const JOIN_REF: &str = "1";

/// Realtime (Phoenix) client. Each subscription owns its own socket.
#[derive(Clone)]
pub struct RealtimeClient {
    socket_url: Url,
    topic: String,
    table: String,
    heartbeat: Duration,
    buffer: usize,
}

impl RealtimeClient {
    pub fn new(client: &BackendClient, config: &RealtimeConfig, table: &str) -> Result<Self> {
        Ok(Self {
            socket_url: Self::socket_url(client.base_url(), client.anon_key())?,
            topic: phoenix::topic(&config.channel),
            table: table.to_string(),
            heartbeat: Duration::from_secs(config.heartbeat_interval_secs),
            buffer: config.event_buffer_size,
        })
    }

    /// `ws(s)://host/realtime/v1/websocket?apikey=…&vsn=1.0.0`
    pub fn socket_url(base_url: &Url, anon_key: &str) -> Result<Url> {
        let mut url = base_url
            .join(SOCKET_PATH)
            .map_err(|e| BackendError::url(e.to_string()))?;

        let scheme = match url.scheme() {
            "https" => "wss",
            "http" => "ws",
            other => return Err(BackendError::url(format!("unsupported scheme {other}"))),
        };
        url.set_scheme(scheme)
            .map_err(|_| BackendError::url(format!("cannot switch {url} to {scheme}")))?;

        url.query_pairs_mut()
            .append_pair("apikey", anon_key)
            .append_pair("vsn", PROTOCOL_VERSION);

        Ok(url)
    }
}

#[async_trait]
impl LiveChannel for RealtimeClient {
    async fn subscribe(&self, access_token: &str, owner: Uuid) -> Result<LiveSubscription> {
        let (tx, rx) = mpsc::channel(self.buffer);
        let join = PhoenixFrame::join(&self.topic, &self.table, owner, access_token, JOIN_REF);

        let task = tokio::spawn(run_channel(
            self.socket_url.clone(),
            self.topic.clone(),
            join,
            self.heartbeat,
            tx,
        ));

        Ok(LiveSubscription::new(rx, task.abort_handle()))
    }
}

fn encode(frame: &PhoenixFrame) -> Result<Message> {
    Ok(Message::Text(serde_json::to_string(frame)?.into()))
}

/// Owns the socket for one subscription until the receiver goes away or the
/// channel reaches a terminal state.
async fn run_channel(
    socket_url: Url,
    topic: String,
    join: PhoenixFrame,
    heartbeat: Duration,
    tx: mpsc::Sender<LiveEvent>,
) {
    if tx
        .send(LiveEvent::Status(SubscriptionStatus::Connecting))
        .await
        .is_err()
    {
        return;
    }

    let socket = match connect_async(socket_url.as_str()).await {
        Ok((socket, _response)) => socket,
        Err(e) => {
            warn!("realtime connect failed: {e}");
            let _ = tx
                .send(LiveEvent::Status(SubscriptionStatus::Errored))
                .await;
            return;
        }
    };
    let (mut sink, mut stream) = socket.split();

    let sent = match encode(&join) {
        Ok(message) => sink.send(message).await.map_err(|e| BackendError::ws(e.to_string())),
        Err(e) => Err(e),
    };
    if let Err(e) = sent {
        warn!("realtime join failed: {e}");
        let _ = tx
            .send(LiveEvent::Status(SubscriptionStatus::Errored))
            .await;
        return;
    }
    debug!("joining {topic}");

    let mut ticker = tokio::time::interval(heartbeat);
    ticker.tick().await;
    let mut next_ref: u64 = 2;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = PhoenixFrame::heartbeat(&next_ref.to_string());
                next_ref += 1;
                let sent = match encode(&frame) {
                    Ok(message) => sink.send(message).await.is_ok(),
                    Err(_) => false,
                };
                if !sent {
                    let _ = tx.send(LiveEvent::Status(SubscriptionStatus::Closed)).await;
                    break;
                }
            }

            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let frame: PhoenixFrame = match serde_json::from_str(&text) {
                            Ok(frame) => frame,
                            Err(e) => {
                                debug!("ignoring unreadable frame: {e}");
                                continue;
                            }
                        };
                        let Some(event) = phoenix::decode_event(&frame, &topic, JOIN_REF) else {
                            continue;
                        };
                        let terminal = matches!(event, LiveEvent::Status(status) if status.is_terminal());
                        if let LiveEvent::Status(status) = event {
                            info!("{topic} is {status}");
                        }
                        if tx.send(event).await.is_err() || terminal {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        let _ = tx.send(LiveEvent::Status(SubscriptionStatus::Closed)).await;
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("realtime socket error: {e}");
                        let _ = tx.send(LiveEvent::Status(SubscriptionStatus::Errored)).await;
                        break;
                    }
                }
            }

            _ = tx.closed() => {
                debug!("subscriber for {topic} went away");
                if let Ok(message) = encode(&PhoenixFrame::leave(&topic, &next_ref.to_string())) {
                    let _ = sink.send(message).await;
                }
                break;
            }
        }
    }

    let _ = sink.close().await;
}
