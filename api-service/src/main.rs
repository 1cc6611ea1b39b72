use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};

use api_service::config::Config;
use api_service::routes;
use api_service::services::import;
use api_service::services::repository::BookRepository;

/// REST API to search for books using a set of parameters.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Port to run the server on.
    #[arg(long)]
    port: Option<u16>,

    /// Load a new csv dataset from the given path before serving,
    /// replacing any existing datastore.
    #[arg(long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("api_service=info,tower_http=info")
        .init();

    let args = Args::parse();

    let mut config = Config::default();
    if let Some(port) = args.port {
        config.port = port;
    }

    if let Some(dataset) = args.dataset.as_deref() {
        match import::import_dataset(dataset, &config.datastore, true).await {
            Ok(summary) => info!(
                inserted = summary.inserted,
                skipped = summary.skipped,
                "loaded dataset from {}",
                dataset.display()
            ),
            Err(e) => {
                error!("failed to create a datastore: {}", e);
                process::exit(1);
            }
        }
    }

    let repository = match BookRepository::open(&config.datastore).await {
        Ok(repository) => repository,
        Err(e) => {
            error!(
                "failed to open datastore at {}: {}",
                config.datastore.path().display(),
                e
            );
            process::exit(1);
        }
    };

    let app = routes::app(repository);
    let addr = format!("{}:{}", config.host, config.port);

    info!("api service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
