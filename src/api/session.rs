use axum::http::{header, HeaderMap, HeaderValue};

pub const SESSION_COOKIE: &str = "moodmovie_session";

/// Returns the session id carried by the `moodmovie_session` cookie, if any.
pub fn session_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Picks the session id: an explicit one wins, then the cookie. When
/// neither is present a new id is minted and `true` is returned so the
/// caller can set the cookie.
pub fn resolve_session(explicit: Option<&str>, headers: &HeaderMap) -> (String, bool) {
    if let Some(id) = explicit.filter(|s| !s.is_empty()) {
        return (id.to_string(), false);
    }
    if let Some(id) = session_from_cookies(headers) {
        return (id, false);
    }
    (uuid::Uuid::new_v4().simple().to_string(), true)
}

pub fn session_cookie(session_id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=1209600",
        SESSION_COOKIE, session_id
    ))
    .ok()
}
