use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Path, RawQuery, State};
use axum::http::{Method, Uri};
use axum::response::Html;
use tracing::info;

use crate::services::api::{self, ApiError};
use crate::services::render;
use crate::AppState;

/// Serves the search form.
pub async fn search_form() -> Html<&'static str> {
    Html(render::SEARCH_PAGE)
}

/// Serves the results of a search form submission. The raw query string
/// is forwarded to the API unchanged.
pub async fn search_results(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    method: Method,
    uri: Uri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Html<String> {
    match api::search(&state.client, &state.api_url, query.as_deref().unwrap_or("")).await {
        Ok(books) => Html(render::results_page(&books)),
        Err(e) => Html(serve_error(&e, &method, &uri, connect)),
    }
}

/// Serves a single book's page.
pub async fn book_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Html<String> {
    match api::book(&state.client, &state.api_url, &id).await {
        Ok(book) => Html(render::book_page(&book)),
        Err(e) => Html(serve_error(&e, &method, &uri, connect)),
    }
}

/// Logs a failed page load with its origin and returns the error page.
fn serve_error(
    error: &ApiError,
    method: &Method,
    uri: &Uri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> String {
    let address = connect
        .map(|ConnectInfo(address)| address.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    info!(address = %address, method = %method, url = %uri, "{}", error);

    render::ERROR_PAGE.to_string()
}
