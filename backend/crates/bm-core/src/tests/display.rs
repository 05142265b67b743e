use crate::display::{display_host, favicon_url, format_date};

use chrono::{TimeZone, Utc};

#[test]
fn test_display_host_strips_www() {
    assert_eq!(display_host("https://www.rust-lang.org/learn"), "rust-lang.org");
    assert_eq!(display_host("https://docs.rs"), "docs.rs");
}

#[test]
fn test_display_host_falls_back_to_raw_value() {
    assert_eq!(display_host("not a url"), "not a url");
}

#[test]
fn test_favicon_url_uses_host() {
    assert_eq!(
        favicon_url("https://www.rust-lang.org/learn").as_deref(),
        Some("https://www.google.com/s2/favicons?domain=www.rust-lang.org&sz=32")
    );
    assert_eq!(favicon_url("garbage"), None);
}

#[test]
fn test_format_date() {
    let ts = Utc.with_ymd_and_hms(2026, 10, 8, 23, 59, 0).unwrap();
    assert_eq!(format_date(&ts), "Oct 8, 2026");
}
