//! Transaction deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    notification::{NotificationManager, success_toast_oob},
    transaction::{TransactionId, db::delete_transaction},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionEndpointState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The shared notification stack.
    pub notifications: NotificationManager,
}

impl FromRef<AppState> for DeleteTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            notifications: state.notifications.clone(),
        }
    }
}

/// Handle transaction deletion.
///
/// The success response carries an out-of-band toast; the primary swap
/// removes the deleted table row. The status code has to be 200 OK or HTMX
/// will not remove the row.
pub async fn delete_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<DeleteTransactionEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_notification_response(&state.notifications);
        }
    };

    match delete_transaction(transaction_id, &connection) {
        Ok(_) => {
            success_toast_oob(&state.notifications, "Transaction deleted successfully")
                .into_response()
        }
        Err(Error::DeleteMissingTransaction) => {
            Error::DeleteMissingTransaction.into_notification_response(&state.notifications)
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_notification_response(&state.notifications)
        }
    }
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        Severity,
        category::{CategoryName, create_category},
        currency::get_all_currencies,
        initialize_db,
        notification::{NotificationManager, NotificationState},
        operation::{OperationName, create_operation},
        test_utils::{assert_valid_html, parse_html_fragment},
        transaction::{NewTransaction, Transaction, create_transaction},
    };

    use super::{DeleteTransactionEndpointState, delete_transaction_endpoint};

    fn get_delete_transaction_state() -> DeleteTransactionEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");

        DeleteTransactionEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
            notifications: NotificationManager::new(),
        }
    }

    fn create_test_transaction(state: &DeleteTransactionEndpointState) -> Transaction {
        let connection = state.db_connection.lock().unwrap();
        let operation = create_operation(OperationName::new_unchecked("Shopping"), false, &connection)
            .expect("Could not create test operation");
        let category = create_category(
            CategoryName::new_unchecked("Groceries"),
            operation.id,
            &connection,
        )
        .expect("Could not create test category");
        let currency = get_all_currencies(&connection).unwrap().remove(0);

        create_transaction(
            NewTransaction {
                amount: 1.23,
                date: date!(2025 - 10 - 26),
                description: "Test".to_owned(),
                category_id: category.id,
                currency_id: currency.id,
            },
            &connection,
        )
        .expect("Could not create test transaction")
    }

    #[tokio::test]
    async fn delete_transaction_endpoint_succeeds() {
        let state = get_delete_transaction_state();
        let transaction = create_test_transaction(&state);

        let response = delete_transaction_endpoint(Path(transaction.id), State(state.clone()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let notifications = state.notifications.views();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, Severity::Success);
        assert_eq!(notifications[0].state, NotificationState::Entering);
    }

    #[tokio::test]
    async fn delete_transaction_endpoint_with_invalid_id_returns_error_html() {
        let state = get_delete_transaction_state();
        let invalid_id = 999999;

        let response = delete_transaction_endpoint(Path(invalid_id), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let message: String = html
            .select(&Selector::parse(".toast-message").unwrap())
            .next()
            .expect("No toast message found")
            .text()
            .collect();
        assert!(
            message.contains("Could not delete transaction"),
            "want a delete error toast, got {message:?}"
        );
    }
}
