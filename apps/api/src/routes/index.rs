use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// Serves the upload page: file picker, job description box, download on success.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
