//! Idea fan-out across external feeds.

use futures::future::join_all;
use reelwriter_core::ContentIdea;
use reelwriter_interface::ContentFeed;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Ideas kept from one feed gathering pass.
pub const DEFAULT_FEED_LIMIT: usize = 50;

/// Fetch every feed concurrently and merge the results.
///
/// A failing feed contributes nothing. Ideas are de-duplicated by title,
/// keeping the first occurrence in feed order, then cut to `limit`.
#[instrument(skip(feeds), fields(feeds = feeds.len()))]
pub async fn gather_ideas(feeds: &[Arc<dyn ContentFeed>], limit: usize) -> Vec<ContentIdea> {
    let batches = join_all(feeds.iter().map(|feed| async move {
        match feed.fetch().await {
            Ok(ideas) => {
                debug!(feed = feed.name(), count = ideas.len(), "Fetched feed");
                ideas
            }
            Err(e) => {
                warn!(feed = feed.name(), error = %e, "Feed failed, skipping");
                Vec::new()
            }
        }
    }))
    .await;

    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|idea| seen.insert(idea.title.clone()))
        .take(limit)
        .collect()
}
