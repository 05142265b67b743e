mod bookmark_store;
mod rest_client;

pub use bookmark_store::BookmarkStore;
pub use rest_client::RestClient;
