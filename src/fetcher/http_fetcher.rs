use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};

use crate::app::{PostprintError, Result};
use crate::domain::{Post, PostsResponse};
use crate::fetcher::{posts_url, PostFetcher};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("postprint/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PostFetcher for HttpFetcher {
    async fn fetch_posts(&self, base: &str, space_id: &str) -> Result<Vec<Post>> {
        let url = posts_url(base, space_id);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PostprintError::Fetch(status.to_string()));
        }

        let body = response.bytes().await?;
        let decoded: PostsResponse = serde_json::from_slice(&body)?;
        tracing::debug!("fetched {} posts from {}", decoded.posts.len(), url);
        Ok(decoded.posts)
    }
}
