use super::{dates, natural_key, non_empty, ParsedFeed, ParsedItem};
use ::rss::{Channel, Item};

pub fn read(bytes: &[u8]) -> Result<ParsedFeed, ::rss::Error> {
    let channel = Channel::read_from(bytes)?;

    Ok(ParsedFeed::from(channel))
}

impl From<Channel> for ParsedFeed {
    fn from(channel: Channel) -> Self {
        let items = channel.items().iter().filter_map(convert_item).collect();

        ParsedFeed::new(
            non_empty(Some(channel.title())),
            non_empty(Some(channel.description())),
            items,
        )
    }
}

fn convert_item(item: &Item) -> Option<ParsedItem> {
    let link = item.link().map(str::trim).unwrap_or_default().to_string();

    let Some(key) = natural_key(item.guid().map(|g| g.value()), &link) else {
        tracing::debug!(title = ?item.title(), "Dropping RSS item without guid or link");
        return None;
    };

    let dublin_core = item.dublin_core_ext();

    let author = non_empty(item.author()).or_else(|| {
        dublin_core.and_then(|dc| non_empty(dc.creators().first().map(String::as_str)))
    });

    let published_at = item.pub_date().and_then(dates::parse_date).or_else(|| {
        dublin_core
            .and_then(|dc| dc.dates().first())
            .and_then(|d| dates::parse_date(d))
    });

    let description = non_empty(item.description());
    let content = non_empty(item.content()).or_else(|| description.clone());

    Some(ParsedItem {
        natural_key: key,
        title: item.title().map(str::trim).unwrap_or_default().to_string(),
        link,
        author,
        description,
        content,
        published_at,
    })
}
