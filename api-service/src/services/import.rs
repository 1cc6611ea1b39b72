//! Seeds the book datastore from a csv dataset.
//!
//! Ingestion is best-effort: lines with the wrong field count, lines with
//! non-numeric values in numeric columns, and rows the database rejects
//! are logged and skipped without aborting the rest of the import.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatastoreConfig;
use crate::models::book::Book;

/// Expected field count per csv line: id, title, authors, averageRating,
/// isbn, isbn13, languageCode, pages, ratingsCount, reviewsCount.
const COLUMNS: usize = 10;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("datastore already exists at {0}")]
    DatastoreExists(PathBuf),
    #[error("datastore error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Counts of what happened to each input line.
#[derive(Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Creates a new datastore at the location in `config` and fills it from
/// the csv file at `dataset`.
///
/// Fails if the dataset cannot be opened, or if a datastore already
/// exists and `overwrite` is false. All rows are inserted inside a single
/// transaction, committed once at the end.
///
/// Lines are split on commas with no quoting support; a quoted field
/// containing a comma changes the field count and the line is skipped.
pub async fn import_dataset(
    dataset: &Path,
    config: &DatastoreConfig,
    overwrite: bool,
) -> Result<ImportSummary, ImportError> {
    let file = File::open(dataset)?;

    let db_path = config.path();
    if db_path.exists() {
        if !overwrite {
            return Err(ImportError::DatastoreExists(db_path));
        }
        fs::remove_file(&db_path)?;
    }
    fs::create_dir_all(&config.dir)?;

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::query(&format!(
        "create table {} (id integer primary key, title text, authors text, \
         averageRating real, isbn text, isbn13 text, languageCode text, \
         pages integer, ratingsCount integer, reviewsCount integer);",
        config.book_table
    ))
    .execute(&pool)
    .await?;

    let insert = format!(
        "insert into {} values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?);",
        config.book_table
    );

    let mut tx = pool.begin().await?;
    let mut summary = ImportSummary::default();

    for (number, line) in BufReader::new(file).lines().enumerate() {
        let number = number + 1;
        let line = line?;

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != COLUMNS {
            warn!(
                line = number,
                fields = fields.len(),
                "skipping line with wrong field count"
            );
            summary.skipped += 1;
            continue;
        }

        let book = match parse_row(&fields) {
            Ok(book) => book,
            Err(column) => {
                warn!(line = number, column, "skipping line with non-numeric field");
                summary.skipped += 1;
                continue;
            }
        };

        let result = sqlx::query(&insert)
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.authors)
            .bind(book.average_rating)
            .bind(&book.isbn)
            .bind(&book.isbn13)
            .bind(&book.language_code)
            .bind(book.pages)
            .bind(book.ratings_count)
            .bind(book.reviews_count)
            .execute(&mut *tx)
            .await;

        match result {
            Ok(_) => summary.inserted += 1,
            Err(e) => {
                warn!(line = number, error = %e, "failed to insert row");
                summary.skipped += 1;
            }
        }
    }

    tx.commit().await?;
    pool.close().await;

    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "dataset import finished"
    );
    Ok(summary)
}

/// Maps one comma-split line onto a [`Book`]. Returns the name of the
/// first column that fails to parse.
fn parse_row(fields: &[&str]) -> Result<Book, &'static str> {
    Ok(Book {
        id: fields[0].parse().map_err(|_| "id")?,
        title: fields[1].to_string(),
        authors: fields[2].to_string(),
        average_rating: fields[3].parse().map_err(|_| "averageRating")?,
        isbn: fields[4].to_string(),
        isbn13: fields[5].to_string(),
        language_code: fields[6].to_string(),
        pages: fields[7].parse().map_err(|_| "pages")?,
        ratings_count: fields[8].parse().map_err(|_| "ratingsCount")?,
        reviews_count: fields[9].parse().map_err(|_| "reviewsCount")?,
    })
}
