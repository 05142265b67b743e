//! Presentation helpers for a bookmark row.

use chrono::{DateTime, Utc};
use url::Url;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
const FAVICON_SIZE: u32 = 32;

/// Favicon image for the bookmark's host, or `None` when the URL has no host.
pub fn favicon_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{FAVICON_SERVICE}?domain={host}&sz={FAVICON_SIZE}"))
}

/// Host shown under the title, without a leading `www.`.
/// Unparsable URLs are shown verbatim.
pub fn display_host(url: &str) -> String {
    match Url::parse(url).ok().as_ref().and_then(Url::host_str) {
        Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
        None => url.to_string(),
    }
}

/// e.g. "Oct 18, 2026"
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}
