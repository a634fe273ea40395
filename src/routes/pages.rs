use axum::response::Html;

/// The whole browser UI is one embedded page; it talks to the JSON API
/// with fetch calls.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
