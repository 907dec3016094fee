//! Second-chance Atom reader. `atom_syndication` rejects the whole document when
//! one timestamp is not RFC 3339; `feed-rs` drops just that timestamp.
use super::{natural_key, non_empty, ParsedFeed, ParsedItem};
use feed_rs::model::{Entry, Feed, Link};
use feed_rs::parser::ParseFeedError;

pub fn read(bytes: &[u8]) -> Result<ParsedFeed, ParseFeedError> {
    let feed = feed_rs::parser::parse(bytes)?;

    Ok(ParsedFeed::from(feed))
}

impl From<Feed> for ParsedFeed {
    fn from(feed: Feed) -> Self {
        let items = feed.entries.iter().filter_map(convert_entry).collect();

        ParsedFeed::new(
            non_empty(feed.title.as_ref().map(|t| t.content.as_str())),
            non_empty(feed.description.as_ref().map(|d| d.content.as_str())),
            items,
        )
    }
}

fn convert_entry(entry: &Entry) -> Option<ParsedItem> {
    let link = preferred_link(&entry.links)
        .map(|l| l.href.trim().to_string())
        .unwrap_or_default();
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .unwrap_or_default();

    let Some(key) = natural_key(Some(entry.id.as_str()), &link) else {
        tracing::debug!(%title, "Dropping entry without id or link");
        return None;
    };

    let description = non_empty(entry.summary.as_ref().map(|s| s.content.as_str()));
    let content = non_empty(entry.content.as_ref().and_then(|c| c.body.as_deref()))
        .or_else(|| description.clone());

    Some(ParsedItem {
        natural_key: key,
        title,
        link,
        author: entry
            .authors
            .first()
            .and_then(|person| non_empty(Some(person.name.as_str()))),
        description,
        content,
        published_at: entry.published.or(entry.updated),
    })
}

fn preferred_link(links: &[Link]) -> Option<&Link> {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("") | Some("alternate")))
        .or_else(|| links.first())
}
