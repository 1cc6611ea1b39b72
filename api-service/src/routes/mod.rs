pub mod books;
pub mod health;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::repository::BookRepository;

/// Builds the API router over the given repository.
pub fn app(repository: BookRepository) -> Router {
    Router::new()
        .route("/status", get(health::health_check))
        .route("/books", get(books::search))
        .route("/books/:title", get(books::search_by_title))
        .route("/book/:id", get(books::search_by_id))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(repository)
}
