use crate::{Bookmark, SubscriptionStatus};

use uuid::Uuid;

/// A change pushed by the live-update channel for one owner's rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    Inserted(Bookmark),
    Deleted(Uuid),
    Status(SubscriptionStatus),
}
