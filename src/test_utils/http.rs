//! Helpers for asserting on HTTP responses in tests.

use axum::response::Response;

#[track_caller]
pub(crate) fn get_header(response: &Response, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response, endpoint: &str) {
    assert_eq!(get_header(response, "hx-redirect"), endpoint);
}
