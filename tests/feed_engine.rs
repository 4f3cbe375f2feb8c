//! End-to-end tests for the feed engine: fetch, parse, classify, publish.
//!
//! Each test mounts its own wiremock server and drives a `FeedService`
//! against it, verifying what the feed view would actually show.

use std::collections::HashMap;

use lanyard::config::Config;
use lanyard::feed::SourceLabel;
use lanyard::service::{FeedService, FeedView};
use pretty_assertions::assert_eq;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONFERENCE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/" xmlns:content="http://purl.org/rss/1.0/modules/content/">
<channel>
<title>Chapter News</title>
<item>
    <title>@mofbla check-in opens at 8</title>
    <link>https://twitter.com/mofbla/status/1</link>
    <description><![CDATA[<p>Bring your badge &amp; lanyard.</p>]]></description>
    <pubDate>Tue, 03 Mar 2026 09:00:00 +0000</pubDate>
    <enclosure url="https://cdn.example.com/checkin.jpg" type="image/jpeg"/>
</item>
<item>
    <title>@fbla_national keynote announced</title>
    <link>https://twitter.com/fbla_national/status/2</link>
    <description><![CDATA[<img src="https://cdn.example.com/keynote.png">Speaker reveal inside]]></description>
    <pubDate>Wed, 04 Mar 2026 15:30:00 +0000</pubDate>
</item>
<item>
    <title>Lunch menu posted</title>
    <link>https://example.org/posts/3</link>
    <description>Tacos today</description>
    <pubDate>not a date</pubDate>
</item>
</channel>
</rss>"#;

fn config_for(server: &MockServer) -> Config {
    let mut feeds = HashMap::new();
    feeds.insert("news".to_string(), format!("{}/feed", server.uri()));
    Config {
        feeds,
        request_timeout_secs: 5,
        max_response_bytes: 1024 * 1024,
        user_agent: "lanyard-test/0".to_string(),
    }
}

async fn mount_feed(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("Content-Type", "application/xml"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_publishes_classified_posts() {
    let server = MockServer::start().await;
    mount_feed(&server, CONFERENCE_FEED).await;

    let service = FeedService::new(config_for(&server)).unwrap();
    let mut view = FeedView::default();

    let count = service.refresh(&mut view, "news").await;
    assert_eq!(count, 3);
    assert_eq!(view.posts.len(), 3);
    assert!(!view.loading);

    // Document order preserved
    let first = &view.posts[0];
    assert_eq!(first.item.title, "@mofbla check-in opens at 8");
    assert_eq!(first.author, SourceLabel::Chapter);
    assert_eq!(first.timestamp, "Mar 3, 2026");
    assert_eq!(first.item.description, "Bring your badge & lanyard.");
    assert_eq!(
        first.item.image_url.as_deref(),
        Some("https://cdn.example.com/checkin.jpg")
    );

    let second = &view.posts[1];
    assert_eq!(second.author, SourceLabel::National);
    assert_eq!(second.timestamp, "Mar 4, 2026");
    // No enclosure: image falls back to the <img> in the description
    assert_eq!(
        second.item.image_url.as_deref(),
        Some("https://cdn.example.com/keynote.png")
    );
    assert_eq!(second.item.description, "Speaker reveal inside");

    let third = &view.posts[2];
    // No markers anywhere: national is the default badge
    assert_eq!(third.author, SourceLabel::National);
    // Unparseable pubDate passes through raw
    assert_eq!(third.timestamp, "not a date");
    assert_eq!(third.item.image_url, None);
}

#[tokio::test]
async fn test_refresh_replaces_previous_posts_wholesale() {
    let server = MockServer::start().await;
    mount_feed(&server, CONFERENCE_FEED).await;

    let service = FeedService::new(config_for(&server)).unwrap();
    let mut view = FeedView::default();
    service.refresh(&mut view, "news").await;
    assert_eq!(view.posts.len(), 3);

    // Second server returns a shorter feed; the view must not merge
    let server2 = MockServer::start().await;
    mount_feed(
        &server2,
        r#"<?xml version="1.0"?><rss version="2.0"><channel>
           <item><title>Only post</title></item>
           </channel></rss>"#,
    )
    .await;

    let service2 = FeedService::new(config_for(&server2)).unwrap();
    let count = service2.refresh(&mut view, "news").await;
    assert_eq!(count, 1);
    assert_eq!(view.posts.len(), 1);
    assert_eq!(view.posts[0].item.title, "Only post");
}

#[tokio::test]
async fn test_malformed_feed_publishes_empty_list() {
    let server = MockServer::start().await;
    mount_feed(&server, "<rss><channel><item><title>trunc").await;

    let service = FeedService::new(config_for(&server)).unwrap();
    let mut view = FeedView::default();

    let count = service.refresh(&mut view, "news").await;
    assert_eq!(count, 0);
    assert!(view.posts.is_empty());
    assert!(!view.loading);
}

#[tokio::test]
async fn test_http_error_publishes_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = FeedService::new(config_for(&server)).unwrap();
    let mut view = FeedView::default();

    let count = service.refresh(&mut view, "news").await;
    assert_eq!(count, 0);
    assert!(view.posts.is_empty());
    assert!(!view.loading);
}

#[tokio::test]
async fn test_unknown_category_publishes_empty_list() {
    let server = MockServer::start().await;
    mount_feed(&server, CONFERENCE_FEED).await;

    let service = FeedService::new(config_for(&server)).unwrap();
    assert!(service.category_url("schedule").is_none());

    let mut view = FeedView::default();
    let count = service.refresh(&mut view, "schedule").await;
    assert_eq!(count, 0);
    assert!(view.posts.is_empty());
}

#[tokio::test]
async fn test_empty_feed_publishes_empty_list() {
    let server = MockServer::start().await;
    mount_feed(
        &server,
        r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#,
    )
    .await;

    let service = FeedService::new(config_for(&server)).unwrap();
    let mut view = FeedView::default();

    let count = service.refresh(&mut view, "news").await;
    assert_eq!(count, 0);
    assert!(view.posts.is_empty());
}
