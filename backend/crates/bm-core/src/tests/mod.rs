mod delete_confirmation;
mod display;
mod subscription_status;

use crate::Bookmark;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

pub(crate) fn bookmark(title: &str, owner: Uuid, minute: u32) -> Bookmark {
    Bookmark {
        id: Uuid::new_v4(),
        title: title.to_string(),
        url: format!("https://{}.example.com", title.to_lowercase()),
        user_id: owner,
        created_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, minute, 0).unwrap(),
    }
}
