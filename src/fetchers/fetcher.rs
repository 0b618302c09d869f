use crate::error::Result;
use async_trait::async_trait;

/// Retrieves the raw markup of a page
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `url`
    async fn fetch(&self, url: &str) -> Result<String>;
}
