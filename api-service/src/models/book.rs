use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A searchable book record. Rows are created by the dataset importer and
/// never modified afterwards.
///
/// JSON field names are capitalized to match the wire format clients
/// already depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "AverageRating")]
    #[sqlx(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "ISBN13")]
    pub isbn13: String,
    #[serde(rename = "LanguageCode")]
    #[sqlx(rename = "languageCode")]
    pub language_code: String,
    #[serde(rename = "Pages")]
    pub pages: i64,
    #[serde(rename = "RatingsCount")]
    #[sqlx(rename = "ratingsCount")]
    pub ratings_count: i64,
    #[serde(rename = "ReviewsCount")]
    #[sqlx(rename = "reviewsCount")]
    pub reviews_count: i64,
}

/// A set of optional parameters to search for books with.
///
/// Every field is independently optional; an unset field contributes
/// nothing to the search. Entries within `authors` or `language_codes`
/// combine with logical or, distinct fields combine with logical and.
/// Floor bounds are exclusive, ceilings inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    /// A sub-string that must exist in the title.
    pub title_has: Option<String>,
    /// Must have at least one of these authors.
    pub authors: Vec<String>,
    /// Must be in at least one of these languages.
    pub language_codes: Vec<String>,
    /// 10 digit ISBN, exact match.
    pub isbn: Option<String>,
    /// 13 digit ISBN, exact match.
    pub isbn13: Option<String>,
    pub rating_ceil: Option<f64>,
    pub rating_floor: Option<f64>,
    pub pages_ceil: Option<i64>,
    pub pages_floor: Option<i64>,
    pub ratings_count_ceil: Option<i64>,
    pub ratings_count_floor: Option<i64>,
    pub reviews_count_ceil: Option<i64>,
    pub reviews_count_floor: Option<i64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Unrecognized search parameter \"{0}\".")]
    UnknownParameter(String),
    #[error("Invalid value \"{value}\" for parameter \"{name}\".")]
    InvalidValue { name: String, value: String },
}

impl SearchFilter {
    /// Decodes a filter from query-string pairs, in order.
    ///
    /// `TitlesOnly=true` (or `True`) switches to title-only search and is
    /// stripped before filter decoding; any other `TitlesOnly` value is
    /// treated as an unrecognized parameter. Empty values mean unset.
    /// Repeated `Authors` and `LanguageCode` keys accumulate; for scalar
    /// fields the last value wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<(Self, bool), FilterError> {
        let mut filter = SearchFilter::default();
        let mut titles_only = false;

        for (name, value) in pairs {
            if name == "TitlesOnly" && (value == "true" || value == "True") {
                titles_only = true;
                continue;
            }

            match name.as_str() {
                "TitleHas" => filter.title_has = non_empty(value),
                "Authors" => {
                    if !value.is_empty() {
                        filter.authors.push(value.clone());
                    }
                }
                "LanguageCode" => {
                    if !value.is_empty() {
                        filter.language_codes.push(value.clone());
                    }
                }
                "ISBN" => filter.isbn = non_empty(value),
                "ISBN13" => filter.isbn13 = non_empty(value),
                "RatingCeil" => filter.rating_ceil = parse(name, value)?,
                "RatingFloor" => filter.rating_floor = parse(name, value)?,
                "PagesCeil" => filter.pages_ceil = parse(name, value)?,
                "PagesFloor" => filter.pages_floor = parse(name, value)?,
                "RatingsCountCeil" => filter.ratings_count_ceil = parse(name, value)?,
                "RatingsCountFloor" => filter.ratings_count_floor = parse(name, value)?,
                "ReviewsCountCeil" => filter.reviews_count_ceil = parse(name, value)?,
                "ReviewsCountFloor" => filter.reviews_count_floor = parse(name, value)?,
                _ => return Err(FilterError::UnknownParameter(name.clone())),
            }
        }

        Ok((filter, titles_only))
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse<T: FromStr>(name: &str, value: &str) -> Result<Option<T>, FilterError> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| FilterError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn book_serializes_with_capitalized_names() {
        let book = Book {
            id: 4,
            title: "Harry Potter and the Chamber of Secrets (Harry Potter  #2)".to_string(),
            authors: "J.K. Rowling".to_string(),
            average_rating: 4.41,
            isbn: "439554896".to_string(),
            isbn13: "9780439554893".to_string(),
            language_code: "eng".to_string(),
            pages: 352,
            ratings_count: 6267,
            reviews_count: 272,
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["ID"], 4);
        assert_eq!(json["AverageRating"], 4.41);
        assert_eq!(json["ISBN"], "439554896");
        assert_eq!(json["ISBN13"], "9780439554893");
        assert_eq!(json["LanguageCode"], "eng");
        assert_eq!(json["RatingsCount"], 6267);
        assert_eq!(json["ReviewsCount"], 272);
    }

    #[test]
    fn decodes_every_recognized_parameter() {
        let (filter, titles_only) = SearchFilter::from_pairs(&pairs(&[
            ("TitleHas", "potter"),
            ("Authors", "Rowling"),
            ("Authors", "Tolkien"),
            ("LanguageCode", "eng"),
            ("ISBN", "439554896"),
            ("ISBN13", "9780439554893"),
            ("RatingCeil", "4.5"),
            ("RatingFloor", "4"),
            ("PagesCeil", "900"),
            ("PagesFloor", "100"),
            ("RatingsCountCeil", "2000000"),
            ("RatingsCountFloor", "10"),
            ("ReviewsCountCeil", "30000"),
            ("ReviewsCountFloor", "5"),
        ]))
        .unwrap();

        assert!(!titles_only);
        assert_eq!(filter.title_has.as_deref(), Some("potter"));
        assert_eq!(filter.authors, vec!["Rowling", "Tolkien"]);
        assert_eq!(filter.language_codes, vec!["eng"]);
        assert_eq!(filter.isbn.as_deref(), Some("439554896"));
        assert_eq!(filter.isbn13.as_deref(), Some("9780439554893"));
        assert_eq!(filter.rating_ceil, Some(4.5));
        assert_eq!(filter.rating_floor, Some(4.0));
        assert_eq!(filter.pages_ceil, Some(900));
        assert_eq!(filter.pages_floor, Some(100));
        assert_eq!(filter.ratings_count_ceil, Some(2_000_000));
        assert_eq!(filter.ratings_count_floor, Some(10));
        assert_eq!(filter.reviews_count_ceil, Some(30_000));
        assert_eq!(filter.reviews_count_floor, Some(5));
    }

    #[test]
    fn titles_only_is_stripped() {
        for value in ["true", "True"] {
            let (filter, titles_only) =
                SearchFilter::from_pairs(&pairs(&[("TitlesOnly", value), ("TitleHas", "aaa")]))
                    .unwrap();
            assert!(titles_only);
            assert_eq!(filter.title_has.as_deref(), Some("aaa"));
        }
    }

    #[test]
    fn titles_only_with_other_value_is_unrecognized() {
        let err = SearchFilter::from_pairs(&pairs(&[("TitlesOnly", "false")])).unwrap_err();
        assert_eq!(err, FilterError::UnknownParameter("TitlesOnly".to_string()));
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let err = SearchFilter::from_pairs(&pairs(&[("Publisher", "x")])).unwrap_err();
        assert_eq!(err, FilterError::UnknownParameter("Publisher".to_string()));
        assert_eq!(err.to_string(), "Unrecognized search parameter \"Publisher\".");
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let err = SearchFilter::from_pairs(&pairs(&[("RatingFloor", "high")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value \"high\" for parameter \"RatingFloor\"."
        );
    }

    #[test]
    fn empty_values_mean_unset() {
        let (filter, titles_only) = SearchFilter::from_pairs(&pairs(&[
            ("TitleHas", ""),
            ("Authors", ""),
            ("RatingCeil", ""),
        ]))
        .unwrap();

        assert!(!titles_only);
        assert_eq!(filter, SearchFilter::default());
    }
}
