//! Query keys and sort orders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Sort orders offered by the keyword search.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Popular,
    New,
    Rating,
    Alphabetical,
    Votes,
    Longest,
    Shortest,
    #[serde(rename = "Year Descending")]
    YearDescending,
    #[serde(rename = "Year Ascending")]
    YearAscending,
}

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::Popular,
        SortKey::New,
        SortKey::Rating,
        SortKey::Alphabetical,
        SortKey::Votes,
        SortKey::Longest,
        SortKey::Shortest,
        SortKey::YearDescending,
        SortKey::YearAscending,
    ];

    /// Human-facing label, as used in configuration.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Popular => "Popular",
            SortKey::New => "New",
            SortKey::Rating => "Rating",
            SortKey::Alphabetical => "Alphabetical",
            SortKey::Votes => "Votes",
            SortKey::Longest => "Longest",
            SortKey::Shortest => "Shortest",
            SortKey::YearDescending => "Year Descending",
            SortKey::YearAscending => "Year Ascending",
        }
    }

    /// Value of the `sort` query parameter.
    pub fn query_param(&self) -> &'static str {
        match self {
            SortKey::Popular => "moviemeter,asc",
            SortKey::New => "release_date,desc",
            SortKey::Rating => "user_rating,desc",
            SortKey::Alphabetical => "alpha,asc",
            SortKey::Votes => "num_votes,desc",
            SortKey::Longest => "runtime,desc",
            SortKey::Shortest => "runtime,asc",
            SortKey::YearDescending => "year,desc",
            SortKey::YearAscending => "year,asc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|sort| sort.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| AppError::invalid_request(format!("unknown sort order '{s}'")))
    }
}

/// Normalized (tag, sort) pair identifying one cacheable catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    tag: String,
    sort: SortKey,
}

impl QueryKey {
    /// Build a key, normalizing the tag. A blank tag is a missing identifier.
    pub fn new(tag: &str, sort: SortKey) -> Result<Self> {
        let tag = normalize_tag(tag);
        if tag.is_empty() {
            return Err(AppError::MissingTag);
        }
        Ok(Self { tag, sort })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.tag, self.sort)
    }
}

/// Lower-case the tag and collapse whitespace runs into the `-` separator
/// keyword slugs use.
pub fn normalize_tag(tag: &str) -> String {
    tag.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_tags_share_key() {
        let a = QueryKey::new("  Super Hero ", SortKey::Popular).unwrap();
        let b = QueryKey::new("super   hero", SortKey::Popular).unwrap();
        let c = QueryKey::new("super-hero", SortKey::Popular).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.tag(), "super-hero");
    }

    #[test]
    fn test_sort_is_part_of_key() {
        let a = QueryKey::new("hero", SortKey::Popular).unwrap();
        let b = QueryKey::new("hero", SortKey::Votes).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_blank_tag_is_missing() {
        assert!(matches!(
            QueryKey::new("   ", SortKey::New),
            Err(AppError::MissingTag)
        ));
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("year  descending".parse::<SortKey>().unwrap(), SortKey::YearDescending);
        assert_eq!("POPULAR".parse::<SortKey>().unwrap(), SortKey::Popular);
        assert!("random".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_query_params() {
        assert_eq!(SortKey::Popular.query_param(), "moviemeter,asc");
        assert_eq!(SortKey::Votes.query_param(), "num_votes,desc");
        assert_eq!(SortKey::YearAscending.query_param(), "year,asc");
    }

    #[test]
    fn test_sort_deserializes_from_label() {
        #[derive(Deserialize)]
        struct Wrapper {
            sort: SortKey,
        }
        let parsed: Wrapper = toml::from_str(r#"sort = "Year Descending""#).unwrap();
        assert_eq!(parsed.sort, SortKey::YearDescending);
    }
}
