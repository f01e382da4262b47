use async_trait::async_trait;

use super::error::Result;
use super::results::ContentBlob;

/// Turns a work item's location into fetched content. Implementations cover
/// HTTP fetches for URL input and filesystem reads for `-d` input.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the content behind `location`. Errors are per-item: the caller
    /// counts the item as processed with zero findings and moves on.
    async fn fetch(&self, location: &str) -> Result<ContentBlob>;

    /// Name of the source (e.g. "http", "file"), used in debug logs.
    fn name(&self) -> &str;
}
