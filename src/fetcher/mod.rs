pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Post;

pub use http_fetcher::HttpFetcher;

/// Fetches the full post collection of a space in one request.
///
/// Stateless per call; retries come from the poll loop rescheduling.
#[async_trait]
pub trait PostFetcher: Send + Sync {
    async fn fetch_posts(&self, base: &str, space_id: &str) -> Result<Vec<Post>>;
}

pub fn posts_url(base: &str, space_id: &str) -> String {
    format!("{}/spaces/{}/posts.json", base.trim_end_matches('/'), space_id)
}
