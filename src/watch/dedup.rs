use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::Post;

/// Tracks which posts this run has already accounted for.
///
/// `seen` only grows and `watermark` only moves forward. Neither survives a
/// restart.
#[derive(Debug, Clone, Default)]
pub struct SeenPosts {
    seen: HashSet<String>,
    watermark: Option<DateTime<Utc>>,
}

impl SeenPosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baseline from the initial sync: everything present is marked seen and
    /// nothing is reported as new.
    pub fn seed(&mut self, posts: &[Post]) {
        for post in posts {
            self.seen.insert(post.id.clone());
            if let Some(t) = post.created_at() {
                self.advance(t);
            }
        }
    }

    /// Returns posts not seen before, oldest first.
    ///
    /// A post with an unparsable timestamp is skipped without being marked,
    /// so a later valid copy can still be picked up. A parsable post is marked
    /// seen whether or not it beats the watermark. All candidates are compared
    /// against the watermark as it stood before this call.
    pub fn filter_new(&mut self, posts: &[Post]) -> Vec<Post> {
        let floor = self.watermark;
        let mut newest = None;
        let mut discovered = Vec::new();

        for post in posts {
            if self.seen.contains(&post.id) {
                continue;
            }
            let Some(t) = post.created_at() else {
                continue;
            };
            self.seen.insert(post.id.clone());

            if floor.is_none_or(|w| t > w) {
                discovered.push(post.clone());
                newest = newest.max(Some(t));
            }
        }

        if let Some(t) = newest {
            self.advance(t);
        }

        // The feed is newest-first; print oldest-first.
        discovered.reverse();
        discovered
    }

    pub fn is_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn watermark(&self) -> Option<DateTime<Utc>> {
        self.watermark
    }

    fn advance(&mut self, t: DateTime<Utc>) {
        if self.watermark.is_none_or(|w| t > w) {
            self.watermark = Some(t);
        }
    }
}
