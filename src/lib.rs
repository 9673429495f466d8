//! Ledgerly is a web app for tracking personal income and expenses.
//!
//! This library provides a REST API that directly serves HTML pages.
//! Transactions are grouped into categories, categories belong to operations
//! (income or expense types), and user feedback is surfaced through a stack
//! of transient toast notifications.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod app_state;
mod category;
mod currency;
mod db;
mod endpoints;
mod flash;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod notification;
mod operation;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use notification::{NotificationManager, Severity};
pub use routing::build_router;

use crate::{
    category::CategoryId,
    currency::CurrencyId,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
    notification::toast_fragment_response,
    operation::OperationId,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create an operation name.
    #[error("Operation name cannot be empty")]
    EmptyOperationName,

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The specified operation name already exists in the database.
    #[error("the operation \"{0}\" already exists in the database")]
    DuplicateOperationName(String),

    /// The specified category name already exists for the chosen operation.
    #[error("the category \"{0}\" already exists for this operation")]
    DuplicateCategoryName(String),

    /// The operation ID used to create a category did not match a valid
    /// operation.
    #[error("the operation ID does not refer to a valid operation")]
    InvalidOperation(Option<OperationId>),

    /// The category ID used to create a transaction did not match a valid
    /// category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// The currency ID used to create a transaction did not match a valid
    /// currency.
    #[error("the currency ID does not refer to a valid currency")]
    InvalidCurrency(Option<CurrencyId>),

    /// A zero or negative amount was used to create a transaction.
    #[error("{0} is not a positive amount")]
    NonPositiveAmount(f64),

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete an operation that does not exist
    #[error("tried to delete an operation that is not in the database")]
    DeleteMissingOperation,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as a toast fragment for HTMX endpoints.
    ///
    /// The toast is registered with `notifications` so it survives re-renders
    /// of the toast container and is eventually auto-dismissed like any other
    /// notification.
    pub(crate) fn into_notification_response(self, notifications: &NotificationManager) -> Response {
        let (status_code, message) = match self {
            Error::EmptyOperationName => (
                StatusCode::BAD_REQUEST,
                "Operation name cannot be empty".to_owned(),
            ),
            Error::EmptyCategoryName => (
                StatusCode::BAD_REQUEST,
                "Category name cannot be empty".to_owned(),
            ),
            Error::DuplicateOperationName(name) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "The operation \"{name}\" already exists. \
                    Choose a different name, or delete the existing operation."
                ),
            ),
            Error::DuplicateCategoryName(name) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "The category \"{name}\" already exists for this operation. \
                    Choose a different name, or delete the existing category."
                ),
            ),
            Error::InvalidOperation(operation_id) => (
                StatusCode::BAD_REQUEST,
                format!("Could not find an operation with the ID {operation_id:?}"),
            ),
            Error::InvalidCategory(category_id) => (
                StatusCode::BAD_REQUEST,
                format!("Could not find a category with the ID {category_id:?}"),
            ),
            Error::InvalidCurrency(currency_id) => (
                StatusCode::BAD_REQUEST,
                format!("Could not find a currency with the ID {currency_id:?}"),
            ),
            Error::NonPositiveAmount(amount) => (
                StatusCode::BAD_REQUEST,
                format!("{amount} is not a positive amount. Enter an amount greater than zero."),
            ),
            Error::FutureDate(date) => (
                StatusCode::BAD_REQUEST,
                format!("{date} is a date in the future, which is not allowed."),
            ),
            Error::DeleteMissingOperation => (
                StatusCode::NOT_FOUND,
                "Could not delete operation: it could not be found. \
                Try refreshing the page to see if it has already been deleted."
                    .to_owned(),
            ),
            Error::DeleteMissingCategory => (
                StatusCode::NOT_FOUND,
                "Could not delete category: it could not be found. \
                Try refreshing the page to see if it has already been deleted."
                    .to_owned(),
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Could not delete transaction: it could not be found. \
                Try refreshing the page to see if it has already been deleted."
                    .to_owned(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Check the server logs for more details.".to_owned(),
                )
            }
        };

        toast_fragment_response(notifications, status_code, Severity::Error, &message)
    }
}
