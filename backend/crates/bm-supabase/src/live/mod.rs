mod live_channel;
pub(crate) mod phoenix;
mod realtime_client;

pub use live_channel::{LiveChannel, LiveSubscription};
pub use phoenix::PhoenixFrame;
pub use realtime_client::RealtimeClient;
