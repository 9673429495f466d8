//! The notification stack and its lifecycle.

use std::{
    fmt::Display,
    sync::{
        Arc, Mutex,
        atomic::{AtomicI64, Ordering},
    },
    time::Duration,
};

use time::OffsetDateTime;
use tokio::{task::AbortHandle, time::sleep};

/// How long a notification stays on screen before it dismisses itself.
pub(crate) const AUTO_DISMISS_INTERVAL: Duration = Duration::from_millis(5000);

/// The delay between inserting a notification and flagging it as shown.
///
/// The entry transition must start after the insertion frame, otherwise the
/// CSS transition never plays.
pub(crate) const ENTRY_DELAY: Duration = Duration::from_millis(10);

/// How long the exit transition plays before the notification is removed
/// from the stack.
pub(crate) const EXIT_TRANSITION: Duration = Duration::from_millis(300);

/// Alias for the integer type used to identify notifications.
pub type NotificationId = i64;

/// The category of a notification, controls its visual styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    /// A neutral status message. This is the default for unrecognized labels.
    #[default]
    Info,
    /// An action completed successfully.
    Success,
    /// An action failed.
    Error,
}

impl Severity {
    /// Parse a severity label from caller data.
    ///
    /// Unrecognized labels (e.g. "warning") degrade to [Severity::Info]
    /// rather than being rejected, since the label often originates from
    /// data outside this crate's control.
    pub fn from_label(label: &str) -> Self {
        match label {
            "info" => Self::Info,
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    /// The canonical lowercase label for the severity.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// Where a notification is in its lifecycle.
///
/// The state drives the CSS class on the rendered toast, so the entry and
/// exit transitions are visible in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationState {
    /// Inserted into the stack, entry transition not started yet.
    Entering,
    /// Fully visible, waiting for dismissal.
    Shown,
    /// Dismissal requested, exit transition playing.
    Dismissing,
}

/// A live notification owned by the [NotificationManager].
#[derive(Debug)]
struct Notification {
    id: NotificationId,
    message: String,
    severity: Severity,
    state: NotificationState,
    visible_since: OffsetDateTime,
    /// The handle to the pending auto-dismiss task.
    ///
    /// Taken and aborted on manual dismissal so an already-dismissed
    /// notification is never dismissed a second time.
    dismiss_task: Option<AbortHandle>,
}

/// A read-only snapshot of a notification for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationView {
    /// The ID of the notification, used for manual dismissal.
    pub id: NotificationId,
    /// The display text.
    pub message: String,
    /// The category controlling the visual styling.
    pub severity: Severity,
    /// Where the notification is in its lifecycle.
    pub state: NotificationState,
    /// When the notification was created.
    pub visible_since: OffsetDateTime,
}

/// Owns the stack of live notifications and guarantees each is removed
/// exactly once, either by its auto-dismiss timer or by manual dismissal.
///
/// The manager is cheap to clone and all clones share the same stack.
#[derive(Debug, Clone)]
pub struct NotificationManager {
    notifications: Arc<Mutex<Vec<Notification>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create a manager with an empty notification stack.
    pub fn new() -> Self {
        Self {
            notifications: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Display a message.
    ///
    /// The notification is appended to the stack in insertion order and two
    /// tasks are scheduled: one flips the notification to shown after
    /// [ENTRY_DELAY], the other dismisses it after [AUTO_DISMISS_INTERVAL].
    ///
    /// The returned ID can be passed to [NotificationManager::dismiss] to
    /// dismiss the notification early.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let notification = Notification {
            id,
            message: message.into(),
            severity,
            state: NotificationState::Entering,
            visible_since: OffsetDateTime::now_utc(),
            dismiss_task: None,
        };

        match self.notifications.lock() {
            Ok(mut notifications) => notifications.push(notification),
            Err(error) => {
                tracing::error!("could not lock the notification stack: {error}");
                return id;
            }
        }

        let manager = self.clone();
        tokio::spawn(async move {
            sleep(ENTRY_DELAY).await;
            manager.mark_shown(id);
        });

        let manager = self.clone();
        let auto_dismiss = tokio::spawn(async move {
            sleep(AUTO_DISMISS_INTERVAL).await;
            manager.dismiss(id);
        });

        if let Ok(mut notifications) = self.notifications.lock()
            && let Some(notification) = notifications
                .iter_mut()
                .find(|notification| notification.id == id)
        {
            notification.dismiss_task = Some(auto_dismiss.abort_handle());
        }

        id
    }

    /// Dismiss a notification.
    ///
    /// Cancels the pending auto-dismiss task if one is still pending, flags
    /// the notification for its exit transition and removes it from the
    /// stack after [EXIT_TRANSITION].
    ///
    /// Dismissing a notification that is already gone, or already mid
    /// dismissal, is a no-op.
    pub fn dismiss(&self, id: NotificationId) {
        let mut notifications = match self.notifications.lock() {
            Ok(notifications) => notifications,
            Err(error) => {
                tracing::error!("could not lock the notification stack: {error}");
                return;
            }
        };

        let Some(notification) = notifications
            .iter_mut()
            .find(|notification| notification.id == id)
        else {
            tracing::debug!("notification {id} is already gone, nothing to dismiss");
            return;
        };

        if notification.state == NotificationState::Dismissing {
            return;
        }

        if let Some(task) = notification.dismiss_task.take() {
            task.abort();
        }

        notification.state = NotificationState::Dismissing;
        drop(notifications);

        let manager = self.clone();
        tokio::spawn(async move {
            sleep(EXIT_TRANSITION).await;
            manager.remove(id);
        });
    }

    /// Replay a batch of flash-style messages, each as its own notification
    /// with its own independent timers.
    ///
    /// `entries` is expected to be a JSON array of `[severity, message]`
    /// pairs, as delivered alongside a page load. Absent or malformed input
    /// is logged and treated as empty; nothing propagates to the caller.
    pub fn notify_all(&self, entries: Option<&serde_json::Value>) {
        let Some(value) = entries else {
            tracing::error!("no flashed messages to replay");
            return;
        };

        let Some(entries) = value.as_array() else {
            tracing::error!("flashed messages are not a list: {value}");
            return;
        };

        for entry in entries {
            let Some(pair) = entry.as_array() else {
                tracing::warn!("skipping malformed flashed message: {entry}");
                continue;
            };

            let severity = pair
                .first()
                .and_then(serde_json::Value::as_str)
                .map(Severity::from_label)
                .unwrap_or_default();

            let Some(message) = pair.get(1).and_then(serde_json::Value::as_str) else {
                tracing::warn!("skipping flashed message without text: {entry}");
                continue;
            };

            self.notify(message, severity);
        }
    }

    /// A snapshot of the live notifications in insertion order.
    pub fn views(&self) -> Vec<NotificationView> {
        match self.notifications.lock() {
            Ok(notifications) => notifications.iter().map(Notification::view).collect(),
            Err(error) => {
                tracing::error!("could not lock the notification stack: {error}");
                Vec::new()
            }
        }
    }

    /// A snapshot of one notification, or `None` if it has been removed.
    pub fn view(&self, id: NotificationId) -> Option<NotificationView> {
        match self.notifications.lock() {
            Ok(notifications) => notifications
                .iter()
                .find(|notification| notification.id == id)
                .map(Notification::view),
            Err(error) => {
                tracing::error!("could not lock the notification stack: {error}");
                None
            }
        }
    }

    fn mark_shown(&self, id: NotificationId) {
        if let Ok(mut notifications) = self.notifications.lock()
            && let Some(notification) = notifications
                .iter_mut()
                .find(|notification| notification.id == id)
            && notification.state == NotificationState::Entering
        {
            notification.state = NotificationState::Shown;
        }
    }

    fn remove(&self, id: NotificationId) {
        match self.notifications.lock() {
            Ok(mut notifications) => {
                notifications.retain(|notification| notification.id != id);
            }
            Err(error) => {
                tracing::error!("could not lock the notification stack: {error}");
            }
        }
    }
}

impl Notification {
    fn view(&self) -> NotificationView {
        NotificationView {
            id: self.id,
            message: self.message.clone(),
            severity: self.severity,
            state: self.state,
            visible_since: self.visible_since,
        }
    }
}
