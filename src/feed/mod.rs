//! Feed pipeline: fetch, parse, classify.
//!
//! This module covers everything between a configured feed URL and the
//! classified items the post layer consumes:
//!
//! - [`fetcher`] - HTTP retrieval with retry logic and a body size cap
//! - [`parser`] - single-pass streaming RSS parser built on `quick-xml`
//! - [`classifier`] - source-label assignment for display badging
//!
//! The three stages are independent: the fetcher never parses, the parser
//! never touches the network, and the classifier is a pure function.

mod classifier;
mod fetcher;
mod parser;

pub use classifier::{classify, classify_text, SourceLabel};
pub use fetcher::{fetch_feed, FetchError};
pub use parser::{parse_feed, FeedItem, ParseError};
