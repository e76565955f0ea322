//! Static page serving
//!
//! The repertoire page is compiled into the binary, nothing is read
//! from disk at request time.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// GET /
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
