mod common;

use common::{StaticFeed, idea};
use reelwriter_interface::ContentFeed;
use reelwriter_pipeline::{DEFAULT_FEED_LIMIT, gather_ideas};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn feed(name: &str, ideas: Option<Vec<reelwriter_core::ContentIdea>>, millis: u64) -> Arc<dyn ContentFeed> {
    Arc::new(StaticFeed {
        name: name.to_string(),
        ideas,
        delay: Duration::from_millis(millis),
    })
}

#[tokio::test]
async fn failing_feed_contributes_nothing() {
    let feeds = vec![
        feed("reddit", Some(vec![idea("r1", "Pricing"), idea("r2", "Hiring")]), 0),
        feed("rss", None, 0),
        feed("hn", Some(vec![idea("h1", "Pricing"), idea("h2", "Churn")]), 0),
    ];

    let ideas = gather_ideas(&feeds, DEFAULT_FEED_LIMIT).await;

    let ids: Vec<&str> = ideas.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2", "h2"]);
}

#[tokio::test]
async fn feeds_are_fetched_concurrently_and_limited() {
    let feeds: Vec<_> = (0..4)
        .map(|n| {
            let ideas = (0..20)
                .map(|i| idea(&format!("{n}-{i}"), &format!("Idea {n}-{i}")))
                .collect();
            feed(&format!("feed-{n}"), Some(ideas), 200)
        })
        .collect();

    let started = Instant::now();
    let ideas = gather_ideas(&feeds, DEFAULT_FEED_LIMIT).await;

    assert_eq!(ideas.len(), 50);
    assert!(started.elapsed() < Duration::from_millis(700));
}

#[tokio::test]
async fn no_feeds_yield_no_ideas() {
    assert!(gather_ideas(&[], 10).await.is_empty());
}
