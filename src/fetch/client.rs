use anyhow::Result;
use async_trait::async_trait;

/// Anything able to download the body behind a URL.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}
