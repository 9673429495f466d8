//! Toast notifications: transient, auto-expiring status messages.
//!
//! Notifications are owned by a [NotificationManager] that lives in the
//! application state. Each notification walks an explicit state machine
//! (entering, shown, dismissing) driven by its own timers, and is removed
//! from the stack exactly once.

mod core;
mod endpoint;
mod view;

pub use core::{
    NotificationId, NotificationManager, NotificationState, NotificationView, Severity,
};
pub use endpoint::{dismiss_notification_endpoint, get_notifications_fragment};
pub use view::{TOAST_CONTAINER_ID, toast_container, toast_stack_view, toast_view};

pub(crate) use view::{success_toast_oob, toast_fragment_response};
