//! Catalog entry data structure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The two kinds of title a catalog can hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Subtype {
    Movie,
    Series,
}

impl Subtype {
    pub const ALL: [Subtype; 2] = [Subtype::Movie, Subtype::Series];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subtype::Movie => "movie",
            Subtype::Series => "series",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subtype {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(Subtype::Movie),
            "series" => Ok(Subtype::Series),
            other => Err(AppError::invalid_request(format!(
                "unsupported catalog type '{other}'"
            ))),
        }
    }
}

/// One classified, filtered title ready to be served.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// IMDb title id (e.g. `tt0111161`)
    pub id: String,

    /// Display name
    pub name: String,

    /// Release year, or first year of a series run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Movie or series
    #[serde(rename = "type")]
    pub subtype: Subtype,

    /// Resized poster URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_from_str() {
        assert_eq!("movie".parse::<Subtype>().unwrap(), Subtype::Movie);
        assert_eq!(" Series ".parse::<Subtype>().unwrap(), Subtype::Series);
        assert!(matches!(
            "documentary".parse::<Subtype>(),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_entry_serializes_type_field() {
        let entry = Entry {
            id: "tt0000001".to_string(),
            name: "Example".to_string(),
            year: Some("2020".to_string()),
            subtype: Subtype::Series,
            poster: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "series");
        assert_eq!(json["year"], "2020");
        assert!(json.get("poster").is_none());
    }
}
