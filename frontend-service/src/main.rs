use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use clap::Parser;
use reqwest::Client;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

mod models;
mod routes;
mod services;

use routes::pages::{book_page, search_form, search_results};

/// Shared by all page handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub api_url: String,
}

/// Web frontend for the book search API.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Port to run the server on.
    #[arg(long, default_value_t = 5050)]
    port: u16,

    /// URL to use for API calls.
    #[arg(long, default_value = "http://localhost:6060")]
    api: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("frontend_service=info,tower_http=info")
        .init();

    let args = Args::parse();
    let state = AppState {
        client: Client::new(),
        api_url: args.api.trim_end_matches('/').to_string(),
    };

    let app = Router::new()
        .route("/", get(search_form))
        .route("/search", get(search_results))
        .route("/book/:id", get(book_page))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    info!("frontend service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
