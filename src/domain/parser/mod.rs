//! Turns raw RSS/Atom bytes into a normalized, format-agnostic `ParsedFeed`.
pub mod atom;
pub mod dates;
mod lenient;
pub mod rss;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct ParseError {
    pub detail: String,
}

/// One syndicated entry, normalized across formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItem {
    /// Explicit GUID / entry id, or the link when the entry has no id
    pub natural_key: String,
    pub title: String,
    pub link: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Feed-level metadata plus the entries in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub description: Option<String>,
    items: Vec<ParsedItem>,
}

impl ParsedFeed {
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        items: Vec<ParsedItem>,
    ) -> Self {
        Self {
            title,
            description,
            items,
        }
    }

    /// Entries in document order. Each call starts from the first entry.
    pub fn items(&self) -> std::slice::Iter<'_, ParsedItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parse an RSS 2.0 or Atom document.
///
/// RSS is attempted first; a document that is neither yields a `ParseError`
/// carrying both parser messages. A document without entries is valid.
pub fn parse(bytes: &[u8]) -> Result<ParsedFeed, ParseError> {
    let rss_error = match self::rss::read(bytes) {
        Ok(feed) => return Ok(feed),
        Err(err) => err,
    };

    self::atom::read(bytes).map_err(|atom_error| ParseError {
        detail: format!(
            "document is neither RSS nor Atom (rss: {}; atom: {})",
            rss_error, atom_error
        ),
    })
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn natural_key(id: Option<&str>, link: &str) -> Option<String> {
    non_empty(id).or_else(|| non_empty(Some(link)))
}
