//! Operation creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, Severity, endpoints,
    flash::push_flash,
    notification::NotificationManager,
    operation::{OperationName, admin_page::operation_form_view, db::create_operation},
};

/// The state needed for creating an operation.
#[derive(Debug, Clone)]
pub struct CreateOperationEndpointState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The shared notification stack.
    pub notifications: NotificationManager,
}

impl FromRef<AppState> for CreateOperationEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            notifications: state.notifications.clone(),
        }
    }
}

/// Whether an operation records money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

/// The form data for creating an operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct OperationFormData {
    /// The name of the operation.
    pub name: String,
    /// The income/expense radio selection.
    pub type_: OperationType,
}

/// A route handler for creating a new operation.
///
/// On success, queues a flash message and redirects back to the operations
/// admin page.
pub async fn create_operation_endpoint(
    State(state): State<CreateOperationEndpointState>,
    jar: PrivateCookieJar,
    Form(data): Form<OperationFormData>,
) -> Response {
    let name = match OperationName::new(&data.name) {
        Ok(name) => name,
        Err(error) => {
            return operation_form_view(&data.name, &format!("Error: {error}")).into_response();
        }
    };

    let is_income = matches!(data.type_, OperationType::Income);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_notification_response(&state.notifications);
        }
    };

    match create_operation(name, is_income, &connection) {
        Ok(_) => {
            let jar = push_flash(jar, Severity::Success, "Operation created successfully");

            (
                jar,
                HxRedirect(endpoints::OPERATIONS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error @ Error::DuplicateOperationName(_)) => {
            error.into_notification_response(&state.notifications)
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an operation: {error}");

            error.into_notification_response(&state.notifications)
        }
    }
}
