//! The fetch/parse/classify cycle behind one feed view.
//!
//! The UI triggers a refresh when the view appears, on a category switch,
//! or on pull-to-refresh. One refresh runs per view at a time; the result
//! list is published wholesale after the cycle completes, never
//! incrementally. A failed cycle publishes an empty list — the worst case
//! is "no posts", not a crash or a stale half-update.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::feed::{fetch_feed, parse_feed};
use crate::posts::{build_posts, DisplayPost};

/// Published state of a feed view.
#[derive(Debug, Default)]
pub struct FeedView {
    /// The posts currently shown. Replaced atomically on each refresh.
    pub posts: Vec<DisplayPost>,
    /// True while a refresh cycle is running.
    pub loading: bool,
}

/// Runs refresh cycles against the configured feeds.
pub struct FeedService {
    client: reqwest::Client,
    config: Config,
}

impl FeedService {
    /// Builds the service and its HTTP client from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FeedService { client, config })
    }

    /// The feed URL configured for a category, if any.
    pub fn category_url(&self, category: &str) -> Option<&str> {
        self.config.feeds.get(category).map(String::as_str)
    }

    /// Refreshes `view` from the feed configured for `category`.
    ///
    /// Runs the full cycle to completion, then replaces `view.posts` in
    /// one assignment and clears the loading flag. Fetch and parse
    /// failures are logged and publish an empty list; they are not
    /// retried here (the fetcher's own backoff aside) — the user can
    /// pull-to-refresh again.
    ///
    /// Returns the number of posts published.
    pub async fn refresh(&self, view: &mut FeedView, category: &str) -> usize {
        view.loading = true;
        let posts = self.load_posts(category).await;
        let count = posts.len();
        view.posts = posts;
        view.loading = false;
        count
    }

    async fn load_posts(&self, category: &str) -> Vec<DisplayPost> {
        let Some(url) = self.config.feeds.get(category) else {
            tracing::warn!(category = %category, "No feed configured for category");
            return Vec::new();
        };

        let timeout = Duration::from_secs(self.config.request_timeout_secs);
        let bytes = match fetch_feed(&self.client, url, timeout, self.config.max_response_bytes)
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(feed = %url, error = %e, "Feed fetch failed");
                return Vec::new();
            }
        };

        match parse_feed(&bytes) {
            Ok(items) => {
                tracing::debug!(feed = %url, items = items.len(), "Feed parsed");
                build_posts(items)
            }
            Err(e) => {
                tracing::warn!(feed = %url, error = %e, "Feed parse failed");
                Vec::new()
            }
        }
    }
}
