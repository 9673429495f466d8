//! The transaction creation form, served as a full page and as a modal
//! fragment for the transactions list page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    currency::{Currency, get_all_currencies},
    endpoints,
    html::{FORM_CONTAINER_STYLE, LINK_STYLE, base},
    navigation::NavBar,
    operation::{Operation, get_all_operations},
    transaction::form::{TransactionFormDefaults, transaction_form_view},
};

/// The state needed for the transaction creation form.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn form_defaults() -> TransactionFormDefaults {
    let today = OffsetDateTime::now_utc().date();

    TransactionFormDefaults {
        date: today,
        max_date: today,
    }
}

fn load_form_data(
    state: &CreateTransactionPageState,
) -> Result<(Vec<Operation>, Vec<Currency>), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let operations = get_all_operations(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve operations: {error}"))?;

    let currencies = get_all_currencies(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve currencies: {error}"))?;

    Ok((operations, currencies))
}

/// Render the new transaction page.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let (operations, currencies) = load_form_data(&state)?;

    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let form = transaction_form_view(&operations, &currencies, &form_defaults());

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold py-4" { "New Transaction" }

            (form)
        }
    };

    Ok(base("New Transaction", &[], &content).into_response())
}

fn transaction_modal_view(operations: &[Operation], currencies: &[Currency]) -> Markup {
    let form = transaction_form_view(operations, currencies, &form_defaults());

    html! {
        div
            id="transaction-modal"
            class="fixed inset-0 z-40 flex items-center justify-center bg-gray-900/50"
        {
            div class="w-full max-w-md rounded bg-white p-6 shadow-lg dark:bg-gray-800
                text-gray-900 dark:text-white max-h-[90vh] overflow-y-auto"
            {
                div class="flex justify-between items-center mb-4"
                {
                    h2 class="text-xl font-bold" { "New Transaction" }

                    a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE)
                    {
                        "Cancel"
                    }
                }

                (form)
            }
        }
    }
}

/// Render the transaction creation form as a modal fragment.
///
/// The transactions page loads this fragment into its modal container in
/// place of navigating to the full page.
pub async fn get_transaction_modal(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let (operations, currencies) = load_form_data(&state)?;

    Ok(transaction_modal_view(&operations, &currencies).into_response())
}
