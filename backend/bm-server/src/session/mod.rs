mod authenticated;
pub mod cookies;
mod session_id;
mod session_store;

pub use authenticated::{Authenticated, owner_access_token, resolve_session};
pub use session_id::SessionId;
pub use session_store::SessionStore;
