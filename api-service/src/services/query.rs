//! Builds parameterized select statements from a [`SearchFilter`].
//!
//! Each recognized filter field maps to at most one clause; active clauses
//! are joined with `and` in a fixed field order so the same filter always
//! produces the same statement.

use crate::models::book::SearchFilter;

/// A value to bind to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Int(i64),
    Real(f64),
}

/// One clause fragment plus its bind values, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
struct Clause {
    sql: String,
    params: Vec<Param>,
}

/// Generates a select statement for the given filter, plus the parameters
/// to bind when executing it. With `titles_only` the statement selects the
/// title column instead of all columns.
///
/// A filter with no active fields produces `select ... from <table>;` with
/// no parameters.
pub fn build_query(table: &str, filter: &SearchFilter, titles_only: bool) -> (String, Vec<Param>) {
    let clauses: Vec<Clause> = [
        contains("title", filter.title_has.as_deref()),
        contains_any("authors", &filter.authors),
        contains_any("languageCode", &filter.language_codes),
        equals("isbn", filter.isbn.as_deref()),
        equals("isbn13", filter.isbn13.as_deref()),
        at_most("averageRating", filter.rating_ceil.map(Param::Real)),
        above("averageRating", filter.rating_floor.map(Param::Real)),
        at_most("pages", filter.pages_ceil.map(Param::Int)),
        above("pages", filter.pages_floor.map(Param::Int)),
        at_most("ratingsCount", filter.ratings_count_ceil.map(Param::Int)),
        above("ratingsCount", filter.ratings_count_floor.map(Param::Int)),
        at_most("reviewsCount", filter.reviews_count_ceil.map(Param::Int)),
        above("reviewsCount", filter.reviews_count_floor.map(Param::Int)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut statement = if titles_only {
        format!("select title from {}", table)
    } else {
        format!("select * from {}", table)
    };

    let mut params = Vec::new();
    for (i, clause) in clauses.into_iter().enumerate() {
        statement.push_str(if i == 0 { " where " } else { " and " });
        statement.push_str(&clause.sql);
        params.extend(clause.params);
    }
    statement.push(';');

    (statement, params)
}

/// Sub-string match on a single column, active iff the value is non-empty.
fn contains(column: &str, value: Option<&str>) -> Option<Clause> {
    match value {
        Some(value) if !value.is_empty() => Some(Clause {
            sql: format!("{} like ?", column),
            params: vec![Param::Text(format!("%{}%", value))],
        }),
        _ => None,
    }
}

/// Sub-string match against any of the given values, or-grouped in input
/// order. Active iff the list is non-empty.
fn contains_any(column: &str, values: &[String]) -> Option<Clause> {
    if values.is_empty() {
        return None;
    }

    let mut sql = String::from("(");
    let mut params = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        if i != 0 {
            sql.push_str(" or ");
        }
        sql.push_str(column);
        sql.push_str(" like ?");
        params.push(Param::Text(format!("%{}%", value)));
    }
    sql.push(')');

    Some(Clause { sql, params })
}

/// Exact match on a single column, active iff the value is non-empty.
fn equals(column: &str, value: Option<&str>) -> Option<Clause> {
    match value {
        Some(value) if !value.is_empty() => Some(Clause {
            sql: format!("{} = ?", column),
            params: vec![Param::Text(value.to_string())],
        }),
        _ => None,
    }
}

/// Inclusive upper bound.
fn at_most(column: &str, value: Option<Param>) -> Option<Clause> {
    value.map(|value| Clause {
        sql: format!("{} <= ?", column),
        params: vec![value],
    })
}

/// Exclusive lower bound.
fn above(column: &str, value: Option<Param>) -> Option<Clause> {
    value.map(|value| Clause {
        sql: format!("{} > ?", column),
        params: vec![value],
    })
}
