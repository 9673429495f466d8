//! The operations admin page: list existing operations and create new ones.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BADGE_EXPENSE_STYLE, BADGE_INCOME_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, delete_action_button,
    },
    navigation::NavBar,
    notification::TOAST_CONTAINER_ID,
    operation::{Operation, get_all_operations},
};

/// The state needed for the operations admin page.
#[derive(Debug, Clone)]
pub struct OperationsPageState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for OperationsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the operations admin page.
pub async fn get_operations_page(State(state): State<OperationsPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let operations = get_all_operations(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve operations: {error}"))?;

    Ok(operations_view(&operations).into_response())
}

/// The form for creating an operation.
///
/// `name_value` preserves the user's input when the form is re-rendered with
/// an `error_message`.
pub(crate) fn operation_form_view(name_value: &str, error_message: &str) -> Markup {
    let create_operation_endpoint = endpoints::POST_OPERATION;

    html! {
        form
            hx-post=(create_operation_endpoint)
            hx-target-error=(format!("#{TOAST_CONTAINER_ID}"))
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Operation Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Operation Name"
                    value=(name_value)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Operation type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex items-center gap-3"
                    {
                        input
                            name="type_"
                            id="operation-type-income"
                            type="radio"
                            value="income"
                            checked
                            required
                            tabindex="0"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="operation-type-income"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Income"
                        }
                    }

                    div class="flex items-center gap-3"
                    {
                        input
                            name="type_"
                            id="operation-type-expense"
                            type="radio"
                            value="expense"
                            required
                            tabindex="0"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="operation-type-expense"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Expense"
                        }
                    }
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Operation" }
        }
    }
}

fn operations_view(operations: &[Operation]) -> Markup {
    let nav_bar = NavBar::new(endpoints::OPERATIONS_VIEW).into_html();

    let table_row = |operation: &Operation| {
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_OPERATION, operation.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? \
            This will also delete its categories and their transactions.",
            operation.name
        );

        html!(
            tr class=(format!("operation-item {TABLE_ROW_STYLE}"))
            {
                td class=(format!("operation-name {TABLE_CELL_STYLE}"))
                {
                    (operation.name)
                }

                td class=(format!("operation-type {TABLE_CELL_STYLE}"))
                {
                    @if operation.is_income {
                        span class=(BADGE_INCOME_STYLE) { "Income" }
                    } @else {
                        span class=(BADGE_EXPENSE_STYLE) { "Expense" }
                    }
                }

                td class=(format!("operation-actions {TABLE_CELL_STYLE}"))
                {
                    (delete_action_button(
                        &delete_url,
                        &confirm_message,
                        "closest tr",
                        "delete",
                    ))
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-3xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Operations" }
                }

                (operation_form_view("", ""))

                section class="dark:bg-gray-800 w-full"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Name"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Type"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for operation in operations {
                                (table_row(operation))
                            }

                            @if operations.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No operations created yet. \
                                        Use the form above to create your first operation."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Operations", &[], &content)
}

#[cfg(test)]
mod operations_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        endpoints,
        operation::{OperationName, create_operation, create_operation_table},
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    use super::{OperationsPageState, get_operations_page};

    fn get_operations_page_state() -> OperationsPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_operation_table(&connection).expect("Could not create operation table");

        OperationsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn renders_create_form() {
        let state = get_operations_page_state();

        let response = get_operations_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_OPERATION, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn renders_a_row_per_operation() {
        let state = get_operations_page_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_operation(OperationName::new_unchecked("Salary"), true, &connection)
                .expect("Could not create test operation");
            create_operation(OperationName::new_unchecked("Shopping"), false, &connection)
                .expect("Could not create test operation");
        }

        let response = get_operations_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let names: Vec<String> = html
            .select(&Selector::parse("td.operation-name").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(names, ["Salary", "Shopping"]);

        let types: Vec<String> = html
            .select(&Selector::parse("td.operation-type span").unwrap())
            .map(|badge| badge.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(types, ["Income", "Expense"]);
    }

    #[tokio::test]
    async fn renders_empty_state_without_operations() {
        let state = get_operations_page_state();

        let response = get_operations_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let tbody_text: String = html
            .select(&Selector::parse("tbody").unwrap())
            .next()
            .expect("No table body found")
            .text()
            .collect();
        assert!(
            tbody_text.contains("No operations created yet"),
            "want empty-state message, got {tbody_text:?}"
        );
    }
}
