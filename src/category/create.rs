//! Category creation endpoint.

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
    AppState, Error, Severity,
    category::{CategoryName, admin_page::category_form_view, db::create_category},
    endpoints,
    flash::push_flash,
    notification::NotificationManager,
    operation::{OperationId, get_all_operations, get_operation},
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    /// The app's database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The shared notification stack.
    pub notifications: NotificationManager,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            notifications: state.notifications.clone(),
        }
    }
}

/// The form data for creating a category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    /// The name of the category.
    pub name: String,
    /// The operation the category belongs to.
    pub operation_id: OperationId,
}

/// A route handler for creating a new category.
///
/// The referenced operation must exist. On success, queues a flash message
/// and redirects back to the categories admin page.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    jar: PrivateCookieJar,
    Form(data): Form<CategoryFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_notification_response(&state.notifications);
        }
    };

    let name = match CategoryName::new(&data.name) {
        Ok(name) => name,
        Err(error) => {
            let operations = get_all_operations(&connection).unwrap_or_default();

            return category_form_view(&operations, &data.name, &format!("Error: {error}"))
                .into_response();
        }
    };

    if let Err(Error::NotFound) = get_operation(data.operation_id, &connection) {
        return Error::InvalidOperation(Some(data.operation_id))
            .into_notification_response(&state.notifications);
    }

    match create_category(name, data.operation_id, &connection) {
        Ok(_) => {
            let jar = push_flash(jar, Severity::Success, "Category created successfully");

            (
                jar,
                HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error @ Error::DuplicateCategoryName(_)) => {
            error.into_notification_response(&state.notifications)
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_notification_response(&state.notifications)
        }
    }
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        category::{Category, CategoryName, create_category_table, get_category},
        endpoints,
        notification::NotificationManager,
        operation::{Operation, OperationName, create_operation, create_operation_table},
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, must_get_form,
            parse_html_fragment,
        },
    };

    use super::{CategoryFormData, CreateCategoryEndpointState, create_category_endpoint};

    fn get_category_state() -> CreateCategoryEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        connection
            .pragma_update(None, "foreign_keys", true)
            .unwrap();
        create_operation_table(&connection).expect("Could not create operation table");
        create_category_table(&connection).expect("Could not create category table");

        CreateCategoryEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
            notifications: NotificationManager::new(),
        }
    }

    fn create_test_operation(state: &CreateCategoryEndpointState) -> Operation {
        let connection = state.db_connection.lock().unwrap();
        create_operation(OperationName::new_unchecked("Shopping"), false, &connection)
            .expect("Could not create test operation")
    }

    fn get_test_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(Key::generate())
    }

    #[tokio::test]
    async fn can_create_category() {
        let state = get_category_state();
        let operation = create_test_operation(&state);
        let name = CategoryName::new_unchecked("Groceries");
        let want = Category {
            id: 1,
            name: name.clone(),
            operation_id: operation.id,
        };
        let form = CategoryFormData {
            name: name.to_string(),
            operation_id: operation.id,
        };

        let response = create_category_endpoint(State(state.clone()), get_test_jar(), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);
        assert_eq!(
            Ok(want),
            get_category(1, &state.db_connection.lock().unwrap())
        );
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let state = get_category_state();
        let operation = create_test_operation(&state);
        let form = CategoryFormData {
            name: "".to_string(),
            operation_id: operation.id,
        };

        let response = create_category_endpoint(State(state), get_test_jar(), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Category name cannot be empty");
    }

    #[tokio::test]
    async fn create_category_fails_on_missing_operation() {
        let state = get_category_state();
        let form = CategoryFormData {
            name: "Groceries".to_string(),
            operation_id: 999999,
        };

        let response = create_category_endpoint(State(state.clone()), get_test_jar(), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let message: String = html
            .select(&Selector::parse(".toast-message").unwrap())
            .next()
            .expect("No toast message found")
            .text()
            .collect();
        assert!(
            message.contains("Could not find an operation"),
            "want an invalid operation toast, got {message:?}"
        );
    }
}
