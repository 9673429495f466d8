//! The categories admin page: list existing categories and create new ones.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryWithOperation, get_all_categories_with_operation},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, delete_action_button,
    },
    navigation::NavBar,
    notification::TOAST_CONTAINER_ID,
    operation::{Operation, get_all_operations},
};

/// The state needed for the categories admin page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the categories admin page.
pub async fn get_categories_page(State(state): State<CategoriesPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories_with_operation(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let operations = get_all_operations(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve operations: {error}"))?;

    Ok(categories_view(&categories, &operations).into_response())
}

/// The form for creating a category.
///
/// The operation select is populated server-side from `operations`.
/// `name_value` preserves the user's input when the form is re-rendered with
/// an `error_message`.
pub(crate) fn category_form_view(
    operations: &[Operation],
    name_value: &str,
    error_message: &str,
) -> Markup {
    let create_category_endpoint = endpoints::POST_CATEGORY;

    html! {
        form
            hx-post=(create_category_endpoint)
            hx-target-error=(format!("#{TOAST_CONTAINER_ID}"))
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Category Name"
                    value=(name_value)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="operation_id"
                    class=(FORM_LABEL_STYLE)
                {
                    "Operation"
                }

                select
                    name="operation_id"
                    id="operation_id"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" disabled selected { "Select an operation" }

                    @for operation in operations {
                        option value=(operation.id) { (operation.name) }
                    }
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
        }
    }
}

fn categories_view(categories: &[CategoryWithOperation], operations: &[Operation]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |category_with_operation: &CategoryWithOperation| {
        let category = &category_with_operation.category;
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_CATEGORY, category.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? \
            This will also delete its transactions.",
            category.name
        );

        html!(
            tr class=(format!("category-item {TABLE_ROW_STYLE}"))
            {
                td class=(format!("category-name {TABLE_CELL_STYLE}"))
                {
                    (category.name)
                }

                td class=(format!("category-type {TABLE_CELL_STYLE}"))
                {
                    (category_with_operation.operation_name)
                }

                td class=(format!("category-actions {TABLE_CELL_STYLE}"))
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
                    h1 class="text-xl font-bold" { "Categories" }
                }

                (category_form_view(operations, "", ""))

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
                                    "Operation"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for category in categories {
                                (table_row(category))
                            }

                            @if categories.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No categories created yet. \
                                        Use the form above to create your first category."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &[], &content)
}

#[cfg(test)]
mod categories_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        category::{CategoryName, create_category, create_category_table},
        endpoints,
        operation::{OperationName, create_operation, create_operation_table},
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    use super::{CategoriesPageState, get_categories_page};

    fn get_categories_page_state() -> CategoriesPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_operation_table(&connection).expect("Could not create operation table");
        create_category_table(&connection).expect("Could not create category table");

        CategoriesPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn renders_create_form_with_operation_select() {
        let state = get_categories_page_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_operation(OperationName::new_unchecked("Shopping"), false, &connection)
                .expect("Could not create test operation");
        }

        let response = get_categories_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_CATEGORY, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_submit_button(&form);

        let option_labels: Vec<String> = html
            .select(&Selector::parse("select[name='operation_id'] option").unwrap())
            .map(|option| option.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(option_labels, ["Select an operation", "Shopping"]);
    }

    #[tokio::test]
    async fn renders_a_row_per_category() {
        let state = get_categories_page_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let operation =
                create_operation(OperationName::new_unchecked("Shopping"), false, &connection)
                    .expect("Could not create test operation");
            create_category(
                CategoryName::new_unchecked("Groceries"),
                operation.id,
                &connection,
            )
            .expect("Could not create test category");
        }

        let response = get_categories_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let names: Vec<String> = html
            .select(&Selector::parse("td.category-name").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(names, ["Groceries"]);

        let operations: Vec<String> = html
            .select(&Selector::parse("td.category-type").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(operations, ["Shopping"]);
    }

    #[tokio::test]
    async fn renders_empty_state_without_categories() {
        let state = get_categories_page_state();

        let response = get_categories_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let tbody_text: String = html
            .select(&Selector::parse("tbody").unwrap())
            .next()
            .expect("No table body found")
            .text()
            .collect();
        assert!(
            tbody_text.contains("No categories created yet"),
            "want empty-state message, got {tbody_text:?}"
        );
    }
}
