use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, info};

use crate::models::book::SearchFilter;
use crate::models::responses::ErrorResponse;
use crate::services::repository::BookRepository;

/// Handler for the /book/:id endpoint.
pub async fn search_by_id(
    State(repository): State<BookRepository>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    let id: i64 = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return fail(&format!("Invalid id \"{}\".", id), &method, &uri, connect);
        }
    };

    match repository.find_by_id(id).await {
        Ok(book) => ok(&book),
        Err(e) => {
            error!("search by id {} failed: {}", id, e);
            fail("Search failed.", &method, &uri, connect)
        }
    }
}

/// Handler for the /books/:title endpoint.
pub async fn search_by_title(
    State(repository): State<BookRepository>,
    Path(title): Path<String>,
    method: Method,
    uri: Uri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    match repository.find_by_title(&title).await {
        Ok(books) => ok(&books),
        Err(e) => {
            error!("search by title failed: {}", e);
            fail("Search failed.", &method, &uri, connect)
        }
    }
}

/// Handler for the /books endpoint. Query parameters populate a
/// [`SearchFilter`]; `TitlesOnly=true` switches to title-only results.
pub async fn search(
    State(repository): State<BookRepository>,
    Query(pairs): Query<Vec<(String, String)>>,
    method: Method,
    uri: Uri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    let (filter, titles_only) = match SearchFilter::from_pairs(&pairs) {
        Ok(decoded) => decoded,
        Err(e) => return fail(&e.to_string(), &method, &uri, connect),
    };

    if titles_only {
        match repository.search_titles(&filter).await {
            Ok(titles) => ok(&titles),
            Err(e) => {
                error!("title search failed: {}", e);
                fail("Search failed.", &method, &uri, connect)
            }
        }
    } else {
        match repository.search(&filter).await {
            Ok(books) => ok(&books),
            Err(e) => {
                error!("search failed: {}", e);
                fail("Search failed.", &method, &uri, connect)
            }
        }
    }
}

/// Writes a successful result as indented JSON.
fn ok<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => json_body(StatusCode::OK, body),
        Err(e) => {
            error!("failed to serialize response: {}", e);
            json_body(StatusCode::INTERNAL_SERVER_ERROR, String::new())
        }
    }
}

/// Logs a failed request with its origin and writes the error message as
/// the JSON body of a client error response.
fn fail(
    message: &str,
    method: &Method,
    uri: &Uri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    let address = connect
        .map(|ConnectInfo(address)| address.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    info!(address = %address, method = %method, url = %uri, "{}", message);

    let body = serde_json::to_string_pretty(&ErrorResponse {
        message: message.to_string(),
    })
    .unwrap_or_default();
    json_body(StatusCode::BAD_REQUEST, body)
}

fn json_body(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
