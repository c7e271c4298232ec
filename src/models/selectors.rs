// src/models/selectors.rs

//! CSS selectors for scraping a keyword list page.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping a keyword list page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListSelectors {
    /// Selector for each raw entry block on the page
    #[serde(default = "defaults::block")]
    pub block_selector: String,

    /// Selector for the header inside a block
    #[serde(default = "defaults::header")]
    pub header_selector: String,

    /// Selector for the title link inside the header (first match wins)
    #[serde(default = "defaults::link")]
    pub link_selector: String,

    /// Selector for header spans; the second match carries the year/type label
    #[serde(default = "defaults::label")]
    pub label_selector: String,

    /// Selector for the poster image inside a block (first match wins)
    #[serde(default = "defaults::image")]
    pub image_selector: String,

    /// Attribute of the image that holds the lazily-loaded poster URL
    #[serde(default = "defaults::poster_attr")]
    pub poster_attr: String,

    /// Selector for the muted note whose emphasis marks an unreleased title
    #[serde(default = "defaults::release_note")]
    pub release_note_selector: String,

    /// Selector for the emphasis inside the release note
    #[serde(default = "defaults::release_marker")]
    pub release_marker_selector: String,
}

impl Default for ListSelectors {
    fn default() -> Self {
        Self {
            block_selector: defaults::block(),
            header_selector: defaults::header(),
            link_selector: defaults::link(),
            label_selector: defaults::label(),
            image_selector: defaults::image(),
            poster_attr: defaults::poster_attr(),
            release_note_selector: defaults::release_note(),
            release_marker_selector: defaults::release_marker(),
        }
    }
}

mod defaults {
    pub fn block() -> String {
        ".lister-item".into()
    }
    pub fn header() -> String {
        ".lister-item-header".into()
    }
    pub fn link() -> String {
        "a".into()
    }
    pub fn label() -> String {
        "span".into()
    }
    pub fn image() -> String {
        "img".into()
    }
    pub fn poster_attr() -> String {
        "loadlate".into()
    }
    pub fn release_note() -> String {
        ".lister-item-content p.text-muted.text-small".into()
    }
    pub fn release_marker() -> String {
        "b".into()
    }
}
