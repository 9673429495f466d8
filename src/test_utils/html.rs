//! Helpers for parsing responses as HTML in tests.

use axum::response::Response;
use scraper::Html;

pub(crate) async fn parse_html_document(response: Response) -> Html {
    let text = response_text(response).await;

    Html::parse_document(&text)
}

pub(crate) async fn parse_html_fragment(response: Response) -> Html {
    let text = response_text(response).await;

    Html::parse_fragment(&text)
}

async fn response_text(response: Response) -> String {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    String::from_utf8_lossy(&body).to_string()
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors {:?} for HTML {}",
        html.errors,
        html.html()
    );
}
