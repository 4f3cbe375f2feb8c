//! Single-pass streaming parser for the organization's RSS feed.
//!
//! The feed is loose RSS 2.0: `item`/`title`/`link`/`description`/`pubDate`
//! with optional `enclosure`, `media:content`, and `content:encoded`
//! elements. Namespaced elements are matched by their literal qualified
//! name, never namespace-resolved.
//!
//! The parser keeps five per-field accumulators plus an "inside `<item>`"
//! flag and walks the event stream once. Character data may arrive in
//! multiple chunks per element, so accumulation is append-only; only an
//! `<item>` start resets the accumulators.

use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Errors that can occur while parsing a feed payload.
///
/// A tokenizer failure anywhere in the document aborts the whole parse:
/// the caller gets zero items, never a partial list.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML tokenization or entity resolution failed.
    #[error("XML parse error: {0}")]
    Xml(String),
}

/// One post from the feed, as emitted by the parser.
///
/// Exactly one `FeedItem` is produced per `<item>` element, in document
/// order. Missing fields are empty strings, not errors — the UI layer is
/// expected to cope with empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// Post title, whitespace-trimmed.
    pub title: String,
    /// Link to the post.
    pub link: String,
    /// Post body with HTML tags stripped and `&nbsp;`/`&amp;` unescaped.
    pub description: String,
    /// Publication date in raw source format (RFC-822-like). Reformatting
    /// for display happens downstream, see [`crate::posts`].
    pub pub_date: String,
    /// Image for the post card, from an enclosure attribute or the first
    /// `<img>` in the description HTML.
    pub image_url: Option<String>,
}

/// Substrings that mark an enclosure URL as an image. This is a plain
/// substring check, not extension matching — `photo.jpg?s=600` and even
/// `jpgfoo.gif` both match, which mirrors how the app has always behaved.
const IMAGE_URL_MARKERS: &[&str] = &["jpg", "jpeg", "png"];

/// Per-item field accumulators. Reset as a unit on each `<item>` start.
#[derive(Debug, Default)]
struct ItemAccumulator {
    title: String,
    link: String,
    description: String,
    pub_date: String,
    image_url: String,
}

impl ItemAccumulator {
    /// Appends trimmed character data to the accumulator selected by the
    /// current element name. Unrecognized elements are ignored.
    fn append(&mut self, element: &str, text: &str) {
        match element {
            "title" => self.title.push_str(text),
            "link" => self.link.push_str(text),
            "description" | "content:encoded" => self.description.push_str(text),
            "pubDate" => self.pub_date.push_str(text),
            _ => {}
        }
    }

    /// Finalizes the accumulated fields into a [`FeedItem`].
    ///
    /// The `<img>` fallback scans the raw description (before tag
    /// stripping); an enclosure-provided image always wins.
    fn finish(self) -> FeedItem {
        let image_url = if self.image_url.is_empty() {
            extract_image_src(&self.description).unwrap_or_default()
        } else {
            self.image_url
        };

        FeedItem {
            title: self.title,
            link: self.link,
            description: clean_description(&self.description),
            pub_date: self.pub_date,
            image_url: if image_url.is_empty() {
                None
            } else {
                Some(image_url)
            },
        }
    }
}

/// Parses a complete feed payload into an ordered list of [`FeedItem`]s.
///
/// The list is fully materialized before it is returned — consumers never
/// see a half-parsed feed. Non-UTF-8 bytes are replaced rather than
/// rejected, since real-world feeds occasionally carry stray bytes.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if the tokenizer rejects the document
/// (truncated tags, mismatched elements, unrecognized entities). No items
/// are surfaced in that case.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedItem>, ParseError> {
    // XXE protection — quick-xml (0.37) never parses <!ENTITY> declarations,
    // so only the 5 XML builtins resolve; custom entities fail the parse.
    let content = String::from_utf8_lossy(bytes);
    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);
    // Surface self-closing elements as Start+End pairs, so a bare <item/>
    // still flows through the emit-on-end path like any other item
    reader.config_mut().expand_empty_elements = true;

    let mut items = Vec::new();
    let mut acc = ItemAccumulator::default();
    let mut in_item = false;
    let mut current_element = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                handle_element_start(&name, &e, &mut acc, &mut in_item);
                current_element = name;
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().map_err(|e| ParseError::Xml(e.to_string()))?;
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        acc.append(&current_element, trimmed);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                // CDATA passes through raw: no entity resolution, no trim_text
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        acc.append(&current_element, trimmed);
                    }
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"item" => {
                items.push(std::mem::take(&mut acc).finish());
                in_item = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(items)
}

/// Start-of-element bookkeeping.
///
/// `<item>` resets the accumulators and raises the in-item flag.
/// `<enclosure>`/`<media:content>` are checked for an image URL attribute
/// regardless of the flag — a pre-item enclosure is harmless because the
/// next `<item>` start wipes the accumulator anyway.
fn handle_element_start(
    name: &str,
    e: &BytesStart<'_>,
    acc: &mut ItemAccumulator,
    in_item: &mut bool,
) {
    match name {
        "item" => {
            *acc = ItemAccumulator::default();
            *in_item = true;
        }
        "enclosure" | "media:content" => {
            if let Some(url) = image_attribute(e) {
                acc.image_url = url;
            }
        }
        _ => {}
    }
}

/// Returns the `url` attribute value if it looks like an image URL.
fn image_attribute(e: &BytesStart<'_>) -> Option<String> {
    for attr_result in e.attributes() {
        let attr = match attr_result {
            Ok(attr) => attr,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping malformed enclosure attribute");
                continue;
            }
        };
        if attr.key.as_ref() != b"url" {
            continue;
        }
        match attr.unescape_value() {
            Ok(value) => {
                if IMAGE_URL_MARKERS.iter().any(|m| value.contains(m)) {
                    return Some(value.into_owned());
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Skipping undecodable enclosure URL");
            }
        }
    }
    None
}

/// Extracts the `src` of the first `<img>` tag in raw description HTML.
///
/// Only the first match is used; items whose description carries several
/// images get the leading one as their card image.
fn extract_image_src(html: &str) -> Option<String> {
    let start = html.find("<img")?;
    let tag = &html[start..];
    let tag = match tag.find('>') {
        Some(end) => &tag[..end],
        None => tag,
    };

    let src_pos = tag.find("src=")?;
    let rest = &tag[src_pos + 4..];
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

/// Produces the display form of a description: tags removed, the two
/// entities the feed actually emits unescaped, surrounding whitespace
/// trimmed.
fn clean_description(raw: &str) -> String {
    strip_html_tags(raw)
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Removes every `<...>` run from the text. An unmatched trailing `<` is
/// kept as-is, matching the behavior of a `<[^>]*>` pattern match.
fn strip_html_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}
