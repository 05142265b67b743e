pub mod auth_session;
pub mod bookmark;
pub mod live_event;
pub mod new_bookmark;
pub mod subscription_status;
pub mod timestamp;
pub mod user;
