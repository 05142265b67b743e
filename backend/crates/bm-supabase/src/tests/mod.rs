mod client;
mod realtime_client;
mod wire;
