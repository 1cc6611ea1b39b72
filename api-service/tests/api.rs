use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use api_service::models::book::Book;
use api_service::routes;
use api_service::services::repository::BookRepository;

async fn app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query(
        "create table books (id integer primary key, title text, authors text, \
         averageRating real, isbn text, isbn13 text, languageCode text, \
         pages integer, ratingsCount integer, reviewsCount integer);",
    )
    .execute(&pool)
    .await
    .unwrap();

    let rows: [(i64, &str, &str, f64, &str, &str, &str, i64, i64, i64); 4] = [
        (
            1,
            "Harry Potter and the Half-Blood Prince (Harry Potter  #6)",
            "J.K. Rowling-Mary GrandPré",
            4.56,
            "439785960",
            "9780439785969",
            "eng",
            652,
            1944099,
            26249,
        ),
        (
            2,
            "The Adventures of Sherlock Holmes",
            "Arthur Conan Doyle-Eoin Colfer",
            4.31,
            "439574285",
            "9780439574280",
            "eng",
            336,
            811,
            86,
        ),
        (
            3,
            "A Study in Scarlet",
            "Arthur Conan Doyle",
            4.16,
            "140439080X",
            "9781404390805",
            "eng",
            123,
            221,
            24,
        ),
        (
            4,
            "Le Petit Prince",
            "Antoine de Saint-Exupéry",
            4.32,
            "0156013987",
            "9780156013987",
            "fre",
            96,
            1340,
            210,
        ),
    ];

    for row in rows {
        sqlx::query("insert into books values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?);")
            .bind(row.0)
            .bind(row.1)
            .bind(row.2)
            .bind(row.3)
            .bind(row.4)
            .bind(row.5)
            .bind(row.6)
            .bind(row.7)
            .bind(row.8)
            .bind(row.9)
            .execute(&pool)
            .await
            .unwrap();
    }

    routes::app(BookRepository::new(pool, "books"))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_check_responds() {
    let (status, body) = get(app().await, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("api-service"));
}

#[tokio::test]
async fn search_by_title_returns_matching_books() {
    let (status, body) = get(app().await, "/books/A%20Study%20in%20Scarlet").await;
    assert_eq!(status, StatusCode::OK);

    let books: Vec<Book> = serde_json::from_str(&body).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, 3);
    assert_eq!(books[0].authors, "Arthur Conan Doyle");
}

#[tokio::test]
async fn search_by_title_unknown_is_empty_array() {
    let (status, body) = get(app().await, "/books/NoTitle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn search_by_id_returns_one_book() {
    let (status, body) = get(app().await, "/book/1").await;
    assert_eq!(status, StatusCode::OK);

    let book: Book = serde_json::from_str(&body).unwrap();
    assert_eq!(
        book.title,
        "Harry Potter and the Half-Blood Prince (Harry Potter  #6)"
    );

    // The body uses the capitalized wire names, indented.
    assert!(body.contains("\"ID\": 1"));
    assert!(body.contains("\"AverageRating\": 4.56"));
}

#[tokio::test]
async fn search_by_unknown_id_fails() {
    let (status, body) = get(app().await, "/book/999999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["Message"], "Search failed.");
}

#[tokio::test]
async fn search_by_non_numeric_id_fails() {
    let (status, body) = get(app().await, "/book/sherlock").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["Message"], "Invalid id \"sherlock\".");
}

#[tokio::test]
async fn combined_filters_and_together() {
    let (status, body) = get(app().await, "/books?Authors=Arthur&RatingFloor=4.3").await;
    assert_eq!(status, StatusCode::OK);

    let books: Vec<Book> = serde_json::from_str(&body).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "The Adventures of Sherlock Holmes");
    assert!(books[0].authors.contains("Arthur"));
    assert!(books[0].average_rating > 4.3);
}

#[tokio::test]
async fn no_filters_returns_all_books() {
    let (status, body) = get(app().await, "/books").await;
    assert_eq!(status, StatusCode::OK);

    let books: Vec<Book> = serde_json::from_str(&body).unwrap();
    assert_eq!(books.len(), 4);
}

#[tokio::test]
async fn titles_only_returns_title_strings() {
    let (status, body) = get(app().await, "/books?TitlesOnly=true&Authors=Arthur").await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(
        titles,
        vec!["The Adventures of Sherlock Holmes", "A Study in Scarlet"]
    );
}

#[tokio::test]
async fn repeated_list_parameters_or_together() {
    let (status, body) = get(app().await, "/books?LanguageCode=fre&LanguageCode=spa").await;
    assert_eq!(status, StatusCode::OK);

    let books: Vec<Book> = serde_json::from_str(&body).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Le Petit Prince");
}

#[tokio::test]
async fn unknown_parameter_fails() {
    let (status, body) = get(app().await, "/books?Publisher=Penguin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["Message"], "Unrecognized search parameter \"Publisher\".");
}

#[tokio::test]
async fn type_mismatch_fails() {
    let (status, body) = get(app().await, "/books?PagesFloor=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["Message"], "Invalid value \"many\" for parameter \"PagesFloor\".");
}
