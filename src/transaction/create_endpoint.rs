//! Transaction creation endpoint.

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
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, Severity,
    category::{CategoryId, get_category},
    currency::{CurrencyId, get_currency},
    endpoints,
    flash::push_flash,
    notification::NotificationManager,
    transaction::{NewTransaction, db::create_transaction},
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionEndpointState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The shared notification stack.
    pub notifications: NotificationManager,
}

impl FromRef<AppState> for CreateTransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            notifications: state.notifications.clone(),
        }
    }
}

/// The form data for creating a transaction.
///
/// The form also submits the selected `operation_id`, but the operation is
/// implied by the category and is not stored.
#[derive(Debug, Deserialize)]
pub struct TransactionFormData {
    /// The value of the transaction.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The category the transaction belongs to.
    pub category_id: CategoryId,
    /// The currency the amount is denominated in.
    pub currency_id: CurrencyId,
}

/// A route handler for creating a new transaction.
///
/// On success, queues a flash message and redirects to the transactions
/// page. Validation failures respond with an error toast fragment.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionEndpointState>,
    jar: PrivateCookieJar,
    Form(data): Form<TransactionFormData>,
) -> Response {
    let new_transaction = NewTransaction {
        amount: data.amount,
        date: data.date,
        description: data.description,
        category_id: data.category_id,
        currency_id: data.currency_id,
    };

    let today = OffsetDateTime::now_utc().date();

    if let Err(error) = new_transaction.validate(today) {
        return error.into_notification_response(&state.notifications);
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_notification_response(&state.notifications);
        }
    };

    if let Err(Error::NotFound) = get_category(new_transaction.category_id, &connection) {
        return Error::InvalidCategory(Some(new_transaction.category_id))
            .into_notification_response(&state.notifications);
    }

    if let Err(Error::NotFound) = get_currency(new_transaction.currency_id, &connection) {
        return Error::InvalidCurrency(Some(new_transaction.currency_id))
            .into_notification_response(&state.notifications);
    }

    match create_transaction(new_transaction, &connection) {
        Ok(_) => {
            let jar = push_flash(jar, Severity::Success, "Transaction saved successfully");

            (
                jar,
                HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a transaction: {error}");

            error.into_notification_response(&state.notifications)
        }
    }
}
