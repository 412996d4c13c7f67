// src/auth/gate.rs
use astra::Request;

pub const SESSION_COOKIE: &str = "session";

/// Where a request should land given whether it carries a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Pass,
    ToLogin,
    ToDashboard,
}

/// `/`, `/login` and static assets are public; everything else needs a session.
pub fn gate(path: &str, signed_in: bool) -> Gate {
    let at_login = matches!(path, "/" | "/login");
    let public = at_login || path.starts_with("/static/");

    match (signed_in, at_login, public) {
        (true, true, _) => Gate::ToDashboard,
        (false, false, false) => Gate::ToLogin,
        (false, true, _) if path == "/" => Gate::ToLogin,
        _ => Gate::Pass,
    }
}

/// Raw token from the `session` cookie, if present.
pub fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// First letters of the first and last names, or the first two letters of a
/// single name, upper-cased.
pub fn avatar_initials(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();

    let initials: String = match parts.as_slice() {
        [] => "U".to_string(),
        [only] => only.chars().take(2).collect(),
        [first, .., last] => first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .collect(),
    };

    initials.to_uppercase()
}
