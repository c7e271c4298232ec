// src/services/parser.rs

//! Entry parser.
//!
//! Turns one keyword list page into classified entries using the configured
//! CSS selectors.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Entry, ListSelectors, POSTER_WIDTH};
use crate::utils::url::resize_poster;
use crate::utils::{classify_label, extract_title_id, extract_year};

/// Entries that survived filtering on one page.
#[derive(Debug, Default)]
pub struct ParsedPage {
    pub entries: Vec<Entry>,
    /// Whether the page had any raw entry blocks, kept or not
    pub found_blocks: bool,
    /// Blocks dropped for a missing id, an unsupported type, or no release yet
    pub dropped: usize,
}

/// Parser for keyword list pages.
pub struct EntryParser {
    block: Selector,
    header: Selector,
    link: Selector,
    label: Selector,
    image: Selector,
    release_note: Selector,
    release_marker: Selector,
    poster_attr: String,
    poster_width: u32,
}

impl EntryParser {
    /// Compile the selectors once up front.
    pub fn new(selectors: &ListSelectors) -> Result<Self> {
        Ok(Self {
            block: Self::parse_selector(&selectors.block_selector)?,
            header: Self::parse_selector(&selectors.header_selector)?,
            link: Self::parse_selector(&selectors.link_selector)?,
            label: Self::parse_selector(&selectors.label_selector)?,
            image: Self::parse_selector(&selectors.image_selector)?,
            release_note: Self::parse_selector(&selectors.release_note_selector)?,
            release_marker: Self::parse_selector(&selectors.release_marker_selector)?,
            poster_attr: selectors.poster_attr.clone(),
            poster_width: POSTER_WIDTH,
        })
    }

    /// Parse a page body into entries, in document order.
    pub fn parse_page(&self, body: &str) -> ParsedPage {
        let document = Html::parse_document(body);
        let mut page = ParsedPage::default();

        for block in document.select(&self.block) {
            page.found_blocks = true;
            match self.parse_block(&block) {
                Some(entry) => page.entries.push(entry),
                None => page.dropped += 1,
            }
        }
        page
    }

    fn parse_block(&self, block: &ElementRef) -> Option<Entry> {
        let header = block.select(&self.header).next()?;

        let link = header.select(&self.link).next();
        let name = link.map(|a| Self::element_text(&a)).unwrap_or_default();
        let href = link.and_then(|a| a.value().attr("href"));

        let label = header.select(&self.label).nth(1).map(|s| Self::element_text(&s));
        let label = label.as_deref().filter(|l| !l.is_empty());

        let subtype = classify_label(label)?;
        let id = href.and_then(extract_title_id)?;

        if !self.is_released(block) {
            log::debug!("Skipping unreleased title {id}");
            return None;
        }

        let poster = block
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr(&self.poster_attr))
            .map(|src| resize_poster(src, self.poster_width));

        Some(Entry {
            id,
            name,
            year: label.and_then(extract_year),
            subtype,
            poster,
        })
    }

    /// Upcoming titles carry an emphasized note in their first muted paragraph.
    fn is_released(&self, block: &ElementRef) -> bool {
        block
            .select(&self.release_note)
            .next()
            .is_none_or(|note| note.select(&self.release_marker).next().is_none())
    }

    fn element_text(element: &ElementRef) -> String {
        element.text().collect::<String>().trim().to_string()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}
