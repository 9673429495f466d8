//! Route handlers for the toast notification stack.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    notification::{NotificationId, NotificationManager, toast_stack_view},
};

/// The state needed for the notification endpoints.
#[derive(Debug, Clone)]
pub struct NotificationEndpointState {
    /// The shared notification stack.
    pub notifications: NotificationManager,
}

impl FromRef<AppState> for NotificationEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            notifications: state.notifications.clone(),
        }
    }
}

/// A route handler returning the current toast stack as an HTML fragment.
///
/// The toast container polls this endpoint so that entry transitions,
/// auto-dismissals and flash-message replays show up in the page.
pub async fn get_notifications_fragment(
    State(state): State<NotificationEndpointState>,
) -> Response {
    toast_stack_view(&state.notifications.views()).into_response()
}

/// A route handler for manually dismissing a notification.
///
/// Always responds 200 with an empty body: dismissing a notification that is
/// already gone is a no-op, not an error.
pub async fn dismiss_notification_endpoint(
    Path(notification_id): Path<NotificationId>,
    State(state): State<NotificationEndpointState>,
) -> Response {
    state.notifications.dismiss(notification_id);

    StatusCode::OK.into_response()
}
