//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_category_options,
    },
    endpoints,
    flash::flash_middleware,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    notification::{dismiss_notification_endpoint, get_notifications_fragment},
    operation::{create_operation_endpoint, delete_operation_endpoint, get_operations_page},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_create_transaction_page,
        get_transaction_modal, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
///
/// The flash middleware is registered here, once, so flashed messages are
/// replayed into the notification stack on the next page load.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(endpoints::TRANSACTION_MODAL, get(get_transaction_modal))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::OPERATIONS_VIEW, get(get_operations_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::POST_TRANSACTION,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
        .route(endpoints::DELETE_CATEGORY, delete(delete_category_endpoint))
        .route(endpoints::CATEGORY_OPTIONS, get(get_category_options))
        .route(endpoints::POST_OPERATION, post(create_operation_endpoint))
        .route(
            endpoints::DELETE_OPERATION,
            delete(delete_operation_endpoint),
        )
        .route(endpoints::NOTIFICATIONS, get(get_notifications_fragment))
        .route(
            endpoints::DISMISS_NOTIFICATION,
            delete(dismiss_notification_endpoint),
        );

    page_routes
        .merge(api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            flash_middleware,
        ))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}
