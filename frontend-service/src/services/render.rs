//! Renders the frontend's HTML pages.
//!
//! Pages are compiled into the binary; the search form and error page are
//! static, results and book pages are built per request.

use crate::models::book::Book;

pub const SEARCH_PAGE: &str = include_str!("../../static/search.html");
pub const ERROR_PAGE: &str = include_str!("../../static/error.html");

/// Renders the search results table.
pub fn results_page(books: &[Book]) -> String {
    let mut rows = String::new();
    for book in books {
        rows.push_str(&format!(
            "<tr><td><a href=\"/book/{id}\">{title}</a></td>\
             <td>{authors}</td><td>{rating:.2}</td><td>{language}</td><td>{pages}</td></tr>\n",
            id = book.id,
            title = escape(&book.title),
            authors = escape(&book.authors),
            rating = book.average_rating,
            language = escape(&book.language_code),
            pages = book.pages,
        ));
    }

    page(
        "Search results",
        &format!(
            "<p>{count} book(s) found. <a href=\"/\">New search</a></p>\n\
             <table>\n<thead><tr><th>Title</th><th>Authors</th><th>Rating</th>\
             <th>Language</th><th>Pages</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>",
            count = books.len(),
            rows = rows,
        ),
    )
}

/// Renders a single book's details.
pub fn book_page(book: &Book) -> String {
    page(
        &escape(&book.title),
        &format!(
            "<h2>{title}</h2>\n<dl>\n\
             <dt>Authors</dt><dd>{authors}</dd>\n\
             <dt>Average rating</dt><dd>{rating:.2}</dd>\n\
             <dt>ISBN</dt><dd>{isbn}</dd>\n\
             <dt>ISBN13</dt><dd>{isbn13}</dd>\n\
             <dt>Language</dt><dd>{language}</dd>\n\
             <dt>Pages</dt><dd>{pages}</dd>\n\
             <dt>Ratings</dt><dd>{ratings}</dd>\n\
             <dt>Reviews</dt><dd>{reviews}</dd>\n\
             </dl>\n<p><a href=\"/\">New search</a></p>",
            title = escape(&book.title),
            authors = escape(&book.authors),
            rating = book.average_rating,
            isbn = escape(&book.isbn),
            isbn13 = escape(&book.isbn13),
            language = escape(&book.language_code),
            pages = book.pages,
            ratings = book.ratings_count,
            reviews = book.reviews_count,
        ),
    )
}

/// Wraps page content in the shared document shell.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em auto; max-width: 50em; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 0.4em; text-align: left; }}\n\
         </style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = title,
        body = body,
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
