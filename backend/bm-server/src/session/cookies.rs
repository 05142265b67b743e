use crate::app_state::AppSettings;
use crate::session::SessionId;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// HttpOnly, SameSite=Lax cookie carrying the session key.
pub fn session_cookie(settings: &AppSettings, id: &SessionId) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), id.as_str().to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookies)
        .path("/")
        .build()
}

/// Name and path of the session cookie, for `CookieJar::remove`.
pub fn removal_cookie(settings: &AppSettings) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), "")).path("/").build()
}

pub fn session_id(jar: &CookieJar, settings: &AppSettings) -> Option<SessionId> {
    jar.get(&settings.cookie_name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .map(SessionId::from)
}
