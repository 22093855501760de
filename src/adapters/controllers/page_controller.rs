use axum::response::Html;

/// The conversion form page, embedded at build time.
const INDEX_HTML: &str = include_str!("../../../assets/index.html");

pub struct PageController;

impl PageController {
    /// Conversion form page
    /// GET /
    pub async fn index() -> Html<&'static str> {
        Html(INDEX_HTML)
    }
}
