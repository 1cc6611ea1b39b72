//! Calls out to the book search API.

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::book::Book;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("failed to make API request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API request failed with status {0}")]
    Status(StatusCode),
}

/// Forwards a raw search query string to the API and returns the
/// matching books.
pub async fn search(client: &Client, api_url: &str, query: &str) -> Result<Vec<Book>, ApiError> {
    let url = format!("{}/books?{}", api_url, query);
    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(response.json().await?)
}

/// Fetches a single book by id.
pub async fn book(client: &Client, api_url: &str, id: &str) -> Result<Book, ApiError> {
    let url = format!("{}/book/{}", api_url, id);
    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(response.json().await?)
}
