//! Flash messages: one-shot notifications queued for the next page load.
//!
//! Route handlers queue `(severity, message)` pairs in a private cookie
//! before redirecting. The flash middleware, registered once when the router
//! is built, pops the cookie on the next request and replays the entries
//! through the notification stack. A malformed payload is logged and
//! dropped; it never fails the request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::Cookie,
};

use crate::{AppState, Severity};

const FLASH_COOKIE: &str = "flash_messages";

/// Queue a flash message for the next page load.
///
/// The returned jar must be included in the response for the cookie to be
/// set. Repeated calls append to the same cookie in order.
pub fn push_flash(jar: PrivateCookieJar, severity: Severity, message: &str) -> PrivateCookieJar {
    let mut entries = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| serde_json::from_str::<serde_json::Value>(cookie.value()).ok())
        .and_then(|value| value.as_array().cloned())
        .unwrap_or_default();

    entries.push(serde_json::json!([severity.as_label(), message]));

    match serde_json::to_string(&entries) {
        Ok(payload) => jar.add(
            Cookie::build((FLASH_COOKIE, payload))
                .path("/")
                .http_only(true),
        ),
        Err(error) => {
            tracing::error!("could not serialize flash messages: {error}");
            jar
        }
    }
}

/// Take the flashed messages out of the cookie jar.
///
/// Returns the jar with the flash cookie removed and the raw JSON payload,
/// if any. The payload is handed to
/// [notify_all](crate::NotificationManager::notify_all) as-is, which guards
/// against malformed content.
fn take_flashed_messages(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<serde_json::Value>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let entries = match serde_json::from_str(cookie.value()) {
        Ok(entries) => Some(entries),
        Err(error) => {
            tracing::error!("could not parse flashed messages: {error}");
            None
        }
    };

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));

    (jar, entries)
}

/// Middleware that replays flashed messages into the notification stack.
///
/// This replaces an implicit global bridge between the page and the
/// notification code: the registration happens exactly once, when the router
/// is built.
pub async fn flash_middleware(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    request: Request,
    next: Next,
) -> Response {
    let (jar, entries) = take_flashed_messages(jar);

    if let Some(entries) = entries {
        state.notifications.notify_all(Some(&entries));
    }

    let response = next.run(request).await;

    (jar, response).into_response()
}
