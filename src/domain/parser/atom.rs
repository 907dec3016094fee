use super::{lenient, natural_key, non_empty, ParsedFeed, ParsedItem};
use ::atom_syndication::{Entry, Error, Feed, Link};
use chrono::{DateTime, FixedOffset, Utc};

/// Reads an Atom document. A timestamp that is not RFC 3339 only costs that
/// entry its date: the document is reparsed leniently instead of rejected.
pub fn read(bytes: &[u8]) -> Result<ParsedFeed, Error> {
    match Feed::read_from(bytes) {
        Ok(feed) => Ok(ParsedFeed::from(feed)),
        Err(Error::WrongDatetime(value)) => {
            tracing::debug!(%value, "Atom timestamp is not RFC 3339, reparsing leniently");
            lenient::read(bytes).map_err(|e| {
                tracing::debug!(error = %e, "Lenient reparse failed");
                Error::WrongDatetime(value)
            })
        }
        Err(e) => Err(e),
    }
}

impl From<Feed> for ParsedFeed {
    fn from(feed: Feed) -> Self {
        let items = feed.entries().iter().filter_map(convert_entry).collect();

        ParsedFeed::new(
            non_empty(Some(feed.title().value.as_str())),
            non_empty(feed.subtitle().map(|s| s.value.as_str())),
            items,
        )
    }
}

fn convert_entry(entry: &Entry) -> Option<ParsedItem> {
    let link = preferred_link(entry.links())
        .map(|l| l.href().trim().to_string())
        .unwrap_or_default();

    let Some(key) = natural_key(Some(entry.id()), &link) else {
        tracing::debug!(title = %entry.title().value, "Dropping Atom entry without id or link");
        return None;
    };

    let published_at = entry
        .published()
        .and_then(to_utc)
        .or_else(|| to_utc(entry.updated()));

    let description = non_empty(entry.summary().map(|s| s.value.as_str()));
    let content = non_empty(entry.content().and_then(|c| c.value()))
        .or_else(|| description.clone());

    Some(ParsedItem {
        natural_key: key,
        title: entry.title().value.trim().to_string(),
        link,
        author: entry
            .authors()
            .first()
            .and_then(|person| non_empty(Some(person.name()))),
        description,
        content,
        published_at,
    })
}

fn preferred_link(links: &[Link]) -> Option<&Link> {
    links
        .iter()
        .find(|l| l.rel().is_empty() || l.rel() == "alternate")
        .or_else(|| links.first())
}

// The atom crate fills a missing <updated> with the Unix epoch, so the epoch
// itself is read as "no date". A literal 1970-01-01T00:00:00Z is lost too.
fn to_utc(value: &DateTime<FixedOffset>) -> Option<DateTime<Utc>> {
    let utc = value.with_timezone(&Utc);
    (utc.timestamp() != 0).then_some(utc)
}
