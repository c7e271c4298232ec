//! Utility functions and helpers.
//!
//! Everything here is pure string handling so it can be tested without a
//! page in hand.

pub mod http;
pub mod url;

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Subtype;

/// Label markers for title formats we never serve.
const EXTENDED_TYPES: [&str; 4] = ["tv short", "tv special", "tv movie", "video"];

/// An opening parenthesis, a year, and an en-dash: `(2019–`.
static SERIES_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+–").expect("series range pattern is valid"));

/// Title id inside an IMDb title link.
static TITLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/title/(tt\d+)/").expect("title id pattern is valid"));

/// Classify a header label such as `(2019– )` or `(2004 TV Movie)`.
///
/// Extended formats are rejected before the series check, and anything left
/// with a label is a movie. No label means no type.
pub fn classify_label(label: Option<&str>) -> Option<Subtype> {
    let label = label?;
    let lower = label.to_lowercase();
    if EXTENDED_TYPES.iter().any(|ext| lower.contains(ext)) {
        return None;
    }
    if SERIES_RANGE.is_match(label) {
        Some(Subtype::Series)
    } else {
        Some(Subtype::Movie)
    }
}

/// Reduce a label to its year: digits and dots only, at most 4 characters.
pub fn extract_year(label: &str) -> Option<String> {
    let year: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .take(4)
        .collect();
    (!year.is_empty()).then_some(year)
}

/// Extract the `tt…` title id from a link target.
pub fn extract_title_id(href: &str) -> Option<String> {
    TITLE_ID
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_open_range_is_series() {
        assert_eq!(classify_label(Some("(2020–)")), Some(Subtype::Series));
        assert_eq!(classify_label(Some("(2020– )")), Some(Subtype::Series));
        assert_eq!(classify_label(Some("(2010–2015)")), Some(Subtype::Series));
    }

    #[test]
    fn test_classify_plain_year_is_movie() {
        assert_eq!(classify_label(Some("(2020)")), Some(Subtype::Movie));
        assert_eq!(classify_label(Some("(I) (1999)")), Some(Subtype::Movie));
        // A plain hyphen is not a run
        assert_eq!(classify_label(Some("(2020-)")), Some(Subtype::Movie));
    }

    #[test]
    fn test_classify_extended_types_excluded() {
        assert_eq!(classify_label(Some("(2004 TV Movie)")), None);
        assert_eq!(classify_label(Some("(2011 TV Short)")), None);
        assert_eq!(classify_label(Some("(1998 TV Special)")), None);
        assert_eq!(classify_label(Some("(I) (2020 Video)")), None);
        // Exclusion wins over the series pattern
        assert_eq!(classify_label(Some("(2015– TV Special)")), None);
    }

    #[test]
    fn test_classify_missing_label() {
        assert_eq!(classify_label(None), None);
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("(I) (2020 Video)"), Some("2020".to_string()));
        assert_eq!(extract_year("(2019– )"), Some("2019".to_string()));
        assert_eq!(extract_year("(2010–2015)"), Some("2010".to_string()));
        assert_eq!(extract_year("(TV Series)"), None);
        assert_eq!(extract_year(""), None);
    }

    #[test]
    fn test_extract_title_id() {
        assert_eq!(
            extract_title_id("/title/tt0111161/?ref_=kw_li_tt"),
            Some("tt0111161".to_string())
        );
        assert_eq!(
            extract_title_id("https://www.imdb.com/TITLE/tt1234567/"),
            Some("tt1234567".to_string())
        );
        assert_eq!(extract_title_id("/name/nm0000151/"), None);
        assert_eq!(extract_title_id("/title/tt123"), None);
    }
}
