use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use thiserror::Error;

use crate::config::DatastoreConfig;
use crate::models::book::{Book, SearchFilter};
use crate::services::query::{build_query, Param};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("no book with id {0}")]
    NotFound(i64),
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Read access to the book table. Cheap to clone; all clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
    table: String,
}

impl BookRepository {
    pub fn new(pool: SqlitePool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Connects to the datastore described by `config`. Fails if the
    /// database file does not exist.
    pub async fn open(config: &DatastoreConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new().filename(config.path());
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool, config.book_table.clone()))
    }

    /// Looks a book up by its id. Zero rows is an error for this lookup.
    pub async fn find_by_id(&self, id: i64) -> Result<Book, SearchError> {
        let statement = format!("select * from {} where id = ?;", self.table);
        sqlx::query_as::<_, Book>(&statement)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(SearchError::NotFound(id))
    }

    /// Returns all books whose title matches exactly. No match is an
    /// empty list, not an error.
    pub async fn find_by_title(&self, title: &str) -> Result<Vec<Book>, SearchError> {
        let statement = format!("select * from {} where title = ?;", self.table);
        Ok(sqlx::query_as::<_, Book>(&statement)
            .bind(title)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Returns all books matching the filter.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<Book>, SearchError> {
        let (statement, params) = build_query(&self.table, filter, false);

        let mut query = sqlx::query_as::<_, Book>(&statement);
        for param in params {
            query = match param {
                Param::Text(value) => query.bind(value),
                Param::Int(value) => query.bind(value),
                Param::Real(value) => query.bind(value),
            };
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Like [`search`](Self::search), but returns only the matching
    /// titles.
    pub async fn search_titles(&self, filter: &SearchFilter) -> Result<Vec<String>, SearchError> {
        let (statement, params) = build_query(&self.table, filter, true);

        let mut query = sqlx::query(&statement);
        for param in params {
            query = match param {
                Param::Text(value) => query.bind(value),
                Param::Int(value) => query.bind(value),
                Param::Real(value) => query.bind(value),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| row.try_get("title"))
            .collect::<Result<Vec<String>, sqlx::Error>>()
            .map_err(Into::into)
    }
}
