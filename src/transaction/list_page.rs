//! The transactions list page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BADGE_EXPENSE_STYLE, BADGE_INCOME_STYLE, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, delete_action_button,
        format_amount,
    },
    navigation::NavBar,
    transaction::{DetailedTransaction, get_detailed_transactions},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the transactions page.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_detailed_transactions(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?;

    Ok(transactions_view(&transactions).into_response())
}

fn description_cell(transaction: &DetailedTransaction) -> Markup {
    if transaction.description.trim().is_empty() {
        return html!( span class="text-gray-400" { "–" } );
    }

    html!(
        details
        {
            summary class="cursor-pointer select-none" { "Show" }

            div class="description-content pt-2 text-gray-700 dark:text-gray-300"
            {
                (transaction.description)
            }
        }
    )
}

fn transaction_table_row(transaction: &DetailedTransaction) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);
    let confirm_message = "Are you sure you want to delete this transaction?";

    let (badge_style, arrow, sign, amount_style) = if transaction.operation_is_income {
        (BADGE_INCOME_STYLE, "↑", "+", "amount-income text-green-600 dark:text-green-400")
    } else {
        (BADGE_EXPENSE_STYLE, "↓", "-", "amount-expense text-red-600 dark:text-red-400")
    };

    html!(
        tr id=(format!("transaction-{}", transaction.id)) class=(TABLE_ROW_STYLE)
        {
            td class=(format!("transaction-date {TABLE_CELL_STYLE}"))
            {
                (transaction.date)
            }

            td class=(format!("transaction-operation {TABLE_CELL_STYLE}"))
            {
                span class=(badge_style)
                {
                    (arrow) " " (transaction.operation_name)
                }
            }

            td class=(format!("transaction-category {TABLE_CELL_STYLE}"))
            {
                (transaction.category_name)
            }

            td class=(format!("transaction-amount {TABLE_CELL_STYLE} {amount_style}"))
            {
                (sign) (format_amount(transaction.amount)) " " (transaction.currency_symbol)
            }

            td class=(format!("transaction-description {TABLE_CELL_STYLE}"))
            {
                (description_cell(transaction))
            }

            td class=(format!("transaction-actions {TABLE_CELL_STYLE}"))
            {
                (delete_action_button(
                    &delete_url,
                    confirm_message,
                    "closest tr",
                    "delete",
                ))
            }
        }
    )
}

fn transactions_view(transactions: &[DetailedTransaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    button
                        type="button"
                        id="open-transaction-modal"
                        class=(LINK_STYLE)
                        hx-get=(endpoints::TRANSACTION_MODAL)
                        hx-target="#modal-container"
                    {
                        "New Transaction"
                    }
                }

                section class="dark:bg-gray-800 w-full"
                {
                    table
                        id="transaction-table"
                        class="w-full text-sm text-left rtl:text-right
                            text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Operation" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_table_row(transaction))
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="6"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No transactions yet. "
                                        a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                                        {
                                            "Create your first transaction"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base(
        "Transactions",
        &[HeadElement::Style(PreEscaped(
            r#"
            #transaction-table details summary {
                list-style: none;
            }
            #transaction-table details summary::-webkit-details-marker {
                display: none;
            }
            #transaction-table details summary::after {
                content: ' ▼';
            }
            #transaction-table details[open] summary::after {
                content: ' ▲';
            }
            "#
            .to_owned(),
        ))],
        &content,
    )
}

#[cfg(test)]
mod transactions_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        category::{CategoryName, create_category},
        currency::get_all_currencies,
        endpoints,
        initialize_db,
        operation::{OperationName, create_operation},
        test_utils::{assert_valid_html, parse_html_document},
        transaction::{NewTransaction, create_transaction},
    };

    use super::{TransactionsPageState, get_transactions_page};

    fn get_transactions_page_state() -> TransactionsPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize_db(&connection).expect("Could not initialize database");

        TransactionsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn create_test_transaction(
        state: &TransactionsPageState,
        amount: f64,
        is_income: bool,
        description: &str,
    ) {
        let connection = state.db_connection.lock().unwrap();
        let operation_name = if is_income { "Salary" } else { "Shopping" };
        let operation = create_operation(
            OperationName::new_unchecked(operation_name),
            is_income,
            &connection,
        )
        .expect("Could not create test operation");
        let category = create_category(
            CategoryName::new_unchecked("Test Category"),
            operation.id,
            &connection,
        )
        .expect("Could not create test category");
        let currency = get_all_currencies(&connection).unwrap().remove(0);

        create_transaction(
            NewTransaction {
                amount,
                date: date!(2025 - 10 - 26),
                description: description.to_owned(),
                category_id: category.id,
                currency_id: currency.id,
            },
            &connection,
        )
        .expect("Could not create test transaction");
    }

    #[tokio::test]
    async fn renders_a_row_per_transaction() {
        let state = get_transactions_page_state();
        create_test_transaction(&state, 1234.5, true, "Payday");

        let response = get_transactions_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let amounts: Vec<String> = html
            .select(&Selector::parse("td.transaction-amount").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(amounts.len(), 1);
        assert!(
            amounts[0].starts_with("+1,234.50"),
            "want a signed, formatted amount, got {:?}",
            amounts[0]
        );

        let badge: String = html
            .select(&Selector::parse("td.transaction-operation span").unwrap())
            .next()
            .expect("No operation badge found")
            .text()
            .collect();
        assert!(
            badge.contains("Salary"),
            "want operation name in badge, got {badge:?}"
        );
    }

    #[tokio::test]
    async fn description_is_expandable() {
        let state = get_transactions_page_state();
        create_test_transaction(&state, 10.0, false, "Weekly groceries");

        let response = get_transactions_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let description: String = html
            .select(&Selector::parse("td.transaction-description details .description-content").unwrap())
            .next()
            .expect("No expandable description found")
            .text()
            .collect();
        assert_eq!(description.trim(), "Weekly groceries");
    }

    #[tokio::test]
    async fn new_transaction_button_opens_the_modal() {
        let state = get_transactions_page_state();

        let response = get_transactions_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let button = html
            .select(&Selector::parse("#open-transaction-modal").unwrap())
            .next()
            .expect("No modal button found");
        assert_eq!(
            button.value().attr("hx-get").expect("hx-get missing"),
            endpoints::TRANSACTION_MODAL
        );
        assert_eq!(
            button.value().attr("hx-target").expect("hx-target missing"),
            "#modal-container"
        );
    }

    #[tokio::test]
    async fn renders_empty_state_without_transactions() {
        let state = get_transactions_page_state();

        let response = get_transactions_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let tbody_text: String = html
            .select(&Selector::parse("tbody").unwrap())
            .next()
            .expect("No table body found")
            .text()
            .collect();
        assert!(
            tbody_text.contains("No transactions yet"),
            "want empty-state message, got {tbody_text:?}"
        );
    }
}
