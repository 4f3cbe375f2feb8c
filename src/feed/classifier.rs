//! Source classification for feed items.
//!
//! The combined feed mixes posts from the national organization account
//! and the state chapter account. The UI badges each post with its source,
//! so every item gets exactly one label — there is no "unknown" bucket.
//!
//! Classification is a case-insensitive substring search over title,
//! description, and link, expressed as an ordered rule table evaluated
//! top to bottom. The first matching rule wins; the final default is the
//! national label.

use std::fmt;

use crate::feed::FeedItem;

/// Display label for a post's source account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLabel {
    /// Post from the national organization account.
    National,
    /// Post from the state chapter account.
    Chapter,
}

impl SourceLabel {
    /// Badge text shown next to the post.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLabel::National => "FBLA",
            SourceLabel::Chapter => "Missouri FBLA",
        }
    }
}

impl fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strictest marker for each account: the literal handle with its `@`.
/// Used only to break ties when both marker sets match.
const CHAPTER_HANDLE: &str = "@mofbla";
const NATIONAL_HANDLE: &str = "@fbla_national";

/// Marker sets: the bare handle form, which also matches the `@`-prefixed
/// handle in post text and the path form in links. The two sets are
/// disjoint.
const CHAPTER_MARKERS: &[&str] = &["mofbla"];
const NATIONAL_MARKERS: &[&str] = &["fbla_national"];

/// Loose fallback when no handle matches anywhere: a chapter place-name
/// keyword. Anything else defaults to the national label.
const CHAPTER_KEYWORD: &str = "missouri";

/// Classifies a parsed item by its source account.
pub fn classify(item: &FeedItem) -> SourceLabel {
    classify_text(&item.title, &item.description, &item.link)
}

/// Pure classification over the three text fields the feed exposes.
///
/// When both marker sets match, the chapter handle is checked before the
/// national handle; a post tagged with both badges as chapter.
pub fn classify_text(title: &str, description: &str, link: &str) -> SourceLabel {
    let haystack = format!("{title} {description} {link}").to_lowercase();
    let chapter = contains_any(&haystack, CHAPTER_MARKERS);
    let national = contains_any(&haystack, NATIONAL_MARKERS);

    // Ordered decision table; first matching predicate wins.
    let rules = [
        (chapter && !national, SourceLabel::Chapter),
        (national && !chapter, SourceLabel::National),
        (
            chapter && national && haystack.contains(CHAPTER_HANDLE),
            SourceLabel::Chapter,
        ),
        (
            chapter && national && haystack.contains(NATIONAL_HANDLE),
            SourceLabel::National,
        ),
        (chapter && national, SourceLabel::National),
        (haystack.contains(CHAPTER_KEYWORD), SourceLabel::Chapter),
    ];

    for (matched, label) in rules {
        if matched {
            return label;
        }
    }
    SourceLabel::National
}

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| haystack.contains(m))
}
