//! Operation deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    notification::{NotificationManager, success_toast_oob},
    operation::{OperationId, db::delete_operation},
};

/// The state needed for deleting an operation.
#[derive(Debug, Clone)]
pub struct DeleteOperationEndpointState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The shared notification stack.
    pub notifications: NotificationManager,
}

impl FromRef<AppState> for DeleteOperationEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            notifications: state.notifications.clone(),
        }
    }
}

/// Handle operation deletion.
///
/// The success response carries an out-of-band toast; the primary swap
/// removes the deleted table row.
pub async fn delete_operation_endpoint(
    Path(operation_id): Path<OperationId>,
    State(state): State<DeleteOperationEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_notification_response(&state.notifications);
        }
    };

    match delete_operation(operation_id, &connection) {
        Ok(_) => {
            success_toast_oob(&state.notifications, "Operation deleted successfully")
                .into_response()
        }
        Err(Error::DeleteMissingOperation) => {
            Error::DeleteMissingOperation.into_notification_response(&state.notifications)
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting operation {operation_id}: {error}"
            );
            error.into_notification_response(&state.notifications)
        }
    }
}
