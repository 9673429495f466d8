//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/users/:user_id', use [format_endpoint].

/// The root route which redirects to the transactions page.
pub const ROOT: &str = "/";
/// The page for displaying the user's transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The route for the transaction creation form as a modal fragment.
pub const TRANSACTION_MODAL: &str = "/transactions/modal";
/// The admin page for listing and creating categories.
pub const CATEGORIES_VIEW: &str = "/admin/categories";
/// The admin page for listing and creating operations.
pub const OPERATIONS_VIEW: &str = "/admin/operations";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a transaction.
pub const POST_TRANSACTION: &str = "/api/transactions";
/// The route to delete a transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";
/// The route to delete a category.
pub const DELETE_CATEGORY: &str = "/api/categories/{category_id}";
/// The route for the category option list, filtered by operation.
///
/// Kept outside '/api/categories' so it cannot overlap with the delete
/// route's ID parameter.
pub const CATEGORY_OPTIONS: &str = "/api/category-options";
/// The route to create an operation.
pub const POST_OPERATION: &str = "/api/operations";
/// The route to delete an operation.
pub const DELETE_OPERATION: &str = "/api/operations/{operation_id}";
/// The route for the toast stack fragment.
pub const NOTIFICATIONS: &str = "/api/notifications";
/// The route to dismiss a notification.
pub const DISMISS_NOTIFICATION: &str = "/api/notifications/{notification_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
