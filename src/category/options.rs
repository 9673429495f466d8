//! The category option-list fragment.
//!
//! The transaction form's category select re-requests this fragment
//! whenever the operation selection changes, so the category choices always
//! match the chosen operation.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::{Category, get_categories_by_operation},
    operation::OperationId,
};

/// The state needed for the category option list.
#[derive(Debug, Clone)]
pub struct CategoryOptionsState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryOptionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the category option list.
#[derive(Debug, Deserialize)]
pub struct CategoryOptionsQuery {
    /// The operation to list categories for. Absent when the user has not
    /// chosen an operation yet.
    pub operation_id: Option<OperationId>,
}

/// Render `<option>` elements for the categories of one operation.
pub(crate) fn category_options_view(categories: &[Category]) -> Markup {
    html! {
        option value="" disabled selected { "Select a category" }

        @for category in categories {
            option value=(category.id) { (category.name) }
        }
    }
}

/// A route handler returning the category options for the chosen operation.
///
/// Without an `operation_id`, only the placeholder option is returned.
pub async fn get_category_options(
    Query(query): Query<CategoryOptionsQuery>,
    State(state): State<CategoryOptionsState>,
) -> Result<Response, Error> {
    let Some(operation_id) = query.operation_id else {
        return Ok(category_options_view(&[]).into_response());
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories_by_operation(operation_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(category_options_view(&categories).into_response())
}

#[cfg(test)]
mod category_options_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        category::{CategoryName, create_category, create_category_table},
        operation::{OperationName, create_operation, create_operation_table},
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    use super::{CategoryOptionsQuery, CategoryOptionsState, get_category_options};

    fn get_options_state() -> CategoryOptionsState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_operation_table(&connection).expect("Could not create operation table");
        create_category_table(&connection).expect("Could not create category table");

        CategoryOptionsState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn options_are_filtered_by_operation() {
        let state = get_options_state();
        let shopping_id = {
            let connection = state.db_connection.lock().unwrap();
            let shopping =
                create_operation(OperationName::new_unchecked("Shopping"), false, &connection)
                    .expect("Could not create test operation");
            let bills = create_operation(OperationName::new_unchecked("Bills"), false, &connection)
                .expect("Could not create test operation");
            create_category(CategoryName::new_unchecked("Groceries"), shopping.id, &connection)
                .expect("Could not create test category");
            create_category(CategoryName::new_unchecked("Power"), bills.id, &connection)
                .expect("Could not create test category");
            shopping.id
        };

        let response = get_category_options(
            Query(CategoryOptionsQuery {
                operation_id: Some(shopping_id),
            }),
            State(state),
        )
        .await
        .unwrap();

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let labels: Vec<String> = html
            .select(&Selector::parse("option").unwrap())
            .map(|option| option.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(labels, ["Select a category", "Groceries"]);
    }

    #[tokio::test]
    async fn options_without_operation_contain_only_the_placeholder() {
        let state = get_options_state();

        let response = get_category_options(
            Query(CategoryOptionsQuery { operation_id: None }),
            State(state),
        )
        .await
        .unwrap();

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let labels: Vec<String> = html
            .select(&Selector::parse("option").unwrap())
            .map(|option| option.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(labels, ["Select a category"]);
    }
}
