use serde::{Deserialize, Serialize};

/// A book as returned by the API. Field names on the wire are
/// capitalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "AverageRating")]
    pub average_rating: f64,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "ISBN13")]
    pub isbn13: String,
    #[serde(rename = "LanguageCode")]
    pub language_code: String,
    #[serde(rename = "Pages")]
    pub pages: i64,
    #[serde(rename = "RatingsCount")]
    pub ratings_count: i64,
    #[serde(rename = "ReviewsCount")]
    pub reviews_count: i64,
}
