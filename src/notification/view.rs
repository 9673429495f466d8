//! Maud views for the toast notification stack.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    endpoints,
    notification::{NotificationManager, NotificationState, NotificationView, Severity},
};

/// The ID of the element that toasts are appended to.
///
/// The container is rendered once per page by the base layout and polls the
/// notifications fragment so server-side state transitions show up without a
/// full page reload.
pub const TOAST_CONTAINER_ID: &str = "toast-container";

const TOAST_BASE_STYLE: &str = "flex items-center gap-3 w-full max-w-sm px-4 \
    py-3 rounded border shadow-lg text-sm transition-all duration-300";

const TOAST_INFO_STYLE: &str = "text-blue-800 border-blue-300 bg-blue-50 \
    dark:bg-gray-800 dark:text-blue-400 dark:border-blue-800";

const TOAST_SUCCESS_STYLE: &str = "text-green-800 border-green-300 bg-green-50 \
    dark:bg-gray-800 dark:text-green-400 dark:border-green-800";

const TOAST_ERROR_STYLE: &str = "text-red-800 border-red-300 bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

const TOAST_CLOSE_STYLE: &str = "ms-auto -mx-1.5 -my-1.5 rounded p-1.5 \
    inline-flex items-center justify-center h-8 w-8 cursor-pointer \
    hover:bg-gray-100 dark:hover:bg-gray-700";

fn severity_style(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => TOAST_INFO_STYLE,
        Severity::Success => TOAST_SUCCESS_STYLE,
        Severity::Error => TOAST_ERROR_STYLE,
    }
}

// The state class pairs with the transition styles in the base layout: a
// toast is inserted transparent, fades in once shown and fades back out
// while dismissing.
fn state_class(state: NotificationState) -> &'static str {
    match state {
        NotificationState::Entering => "opacity-0 translate-y-2",
        NotificationState::Shown => "opacity-100 translate-y-0",
        NotificationState::Dismissing => "opacity-0 translate-y-2",
    }
}

/// Render a single toast.
pub fn toast_view(notification: &NotificationView) -> Markup {
    toast_view_inner(notification, false)
}

fn toast_view_inner(notification: &NotificationView, out_of_band: bool) -> Markup {
    let element_id = format!("toast-{}", notification.id);
    let dismiss_endpoint =
        endpoints::format_endpoint(endpoints::DISMISS_NOTIFICATION, notification.id);
    let class = format!(
        "toast toast-{} {} {} {}",
        notification.severity.as_label(),
        TOAST_BASE_STYLE,
        severity_style(notification.severity),
        state_class(notification.state),
    );

    html! {
        div
            id=(element_id)
            class=(class)
            role="status"
            data-visible-since=(notification.visible_since)
            hx-swap-oob=[out_of_band.then(|| format!("beforeend:#{TOAST_CONTAINER_ID}"))]
        {
            span class="toast-message" { (notification.message) }

            button
                type="button"
                class=(format!("toast-close {TOAST_CLOSE_STYLE}"))
                aria-label="Dismiss notification"
                hx-delete=(dismiss_endpoint)
                hx-target=(format!("#toast-{}", notification.id))
                hx-swap="delete"
            {
                (PreEscaped("&times;"))
            }
        }
    }
}

/// Render the contents of the toast container: every live toast in
/// insertion order.
pub fn toast_stack_view(notifications: &[NotificationView]) -> Markup {
    html! {
        @for notification in notifications {
            (toast_view(notification))
        }
    }
}

/// The toast container rendered by the base layout.
///
/// Loads the current stack immediately and then polls so auto-dismissed
/// toasts disappear without user interaction.
pub fn toast_container() -> Markup {
    html! {
        div
            id=(TOAST_CONTAINER_ID)
            class="fixed bottom-4 right-4 z-50 flex flex-col gap-2 items-end"
            hx-get=(endpoints::NOTIFICATIONS)
            hx-trigger="load, every 2s"
        {}
    }
}

/// Register a toast with `notifications` and respond with its fragment.
///
/// Used by HTMX endpoints that surface feedback directly in the response
/// body (via the response-targets extension for errors).
pub(crate) fn toast_fragment_response(
    notifications: &NotificationManager,
    status_code: StatusCode,
    severity: Severity,
    message: &str,
) -> Response {
    let id = notifications.notify(message, severity);

    match notifications.view(id) {
        Some(view) => (status_code, toast_view(&view)).into_response(),
        // The stack is unavailable, so there is nothing to render.
        None => status_code.into_response(),
    }
}

/// Register a success toast and render it as an out-of-band append to the
/// toast container.
///
/// Used by delete endpoints whose primary swap removes the deleted row: the
/// toast rides along in the same response.
pub(crate) fn success_toast_oob(notifications: &NotificationManager, message: &str) -> Markup {
    let id = notifications.notify(message, Severity::Success);

    match notifications.view(id) {
        Some(view) => toast_view_inner(&view, true),
        None => html! {},
    }
}
