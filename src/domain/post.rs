use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as served by `GET {base}/spaces/{id}/posts.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub snippet: String,
    /// RFC 3339 timestamp, kept raw so a malformed value only skips this post.
    pub created_at: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Envelope of the posts endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

const SNIPPET_MAX: usize = 60;
const SNIPPET_KEEP: usize = 57;

impl Post {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// First line of the snippet, shortened for one-line log output.
    pub fn headline(&self) -> String {
        let first_line = self.snippet.lines().next().unwrap_or("");
        if first_line.chars().count() > SNIPPET_MAX {
            let kept: String = first_line.chars().take(SNIPPET_KEEP).collect();
            format!("{}...", kept)
        } else {
            first_line.to_string()
        }
    }

    pub fn discovery_line(&self) -> String {
        format!(
            "New post from {}: {} [{}]",
            self.author_name,
            self.headline(),
            self.id
        )
    }
}

#[cfg(test)]
pub(crate) fn post(id: &str, created_at: &str) -> Post {
    Post {
        id: id.to_string(),
        author_name: "Ada".to_string(),
        snippet: format!("hello from {}", id),
        created_at: created_at.to_string(),
        kind: "journal_entry".to_string(),
    }
}
