//! Display-ready posts for the feed view.
//!
//! A [`DisplayPost`] wraps a parsed [`FeedItem`] with the derived source
//! label and a short timestamp for the post card header.

use chrono::DateTime;

use crate::feed::{classify, FeedItem, SourceLabel};

/// One post as the feed view renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPost {
    /// The parsed item, description already HTML-stripped.
    pub item: FeedItem,
    /// Badge identifying which account the post came from.
    pub author: SourceLabel,
    /// Short display timestamp, e.g. `Mar 4, 2026`. Falls back to the
    /// raw `pubDate` text when it does not parse as RFC 2822.
    pub timestamp: String,
}

impl DisplayPost {
    fn from_item(item: FeedItem) -> Self {
        let author = classify(&item);
        let timestamp = format_pub_date(&item.pub_date);
        DisplayPost {
            item,
            author,
            timestamp,
        }
    }
}

/// Converts parsed items into display posts, preserving feed order.
pub fn build_posts(items: Vec<FeedItem>) -> Vec<DisplayPost> {
    items.into_iter().map(DisplayPost::from_item).collect()
}

fn format_pub_date(raw: &str) -> String {
    match DateTime::parse_from_rfc2822(raw.trim()) {
        Ok(dt) => dt.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, pub_date: &str) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            link: String::new(),
            description: String::new(),
            pub_date: pub_date.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_timestamp_reformatted() {
        let posts = build_posts(vec![item("Kickoff", "Tue, 03 Mar 2026 09:00:00 +0000")]);
        assert_eq!(posts[0].timestamp, "Mar 3, 2026");
    }

    #[test]
    fn test_unparseable_date_passes_through_raw() {
        let posts = build_posts(vec![item("Kickoff", "sometime next week")]);
        assert_eq!(posts[0].timestamp, "sometime next week");
    }

    #[test]
    fn test_empty_date_stays_empty() {
        let posts = build_posts(vec![item("Kickoff", "")]);
        assert_eq!(posts[0].timestamp, "");
    }

    #[test]
    fn test_author_assigned_per_item() {
        let posts = build_posts(vec![
            item("@mofbla check-in opens", ""),
            item("@fbla_national keynote", ""),
        ]);
        assert_eq!(posts[0].author, SourceLabel::Chapter);
        assert_eq!(posts[1].author, SourceLabel::National);
    }

    #[test]
    fn test_feed_order_preserved() {
        let posts = build_posts(vec![item("a", ""), item("b", ""), item("c", "")]);
        let titles: Vec<&str> = posts.iter().map(|p| p.item.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }
}
