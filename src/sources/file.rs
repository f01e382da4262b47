use async_trait::async_trait;
use tracing::debug;

use crate::core::error::Result;
use crate::core::results::ContentBlob;
use crate::core::traits::ContentSource;

/// Reads work-item paths from the local filesystem (`-d` mode).
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentSource for FileSource {
    async fn fetch(&self, location: &str) -> Result<ContentBlob> {
        debug!("reading {}", location);

        let bytes = tokio::fs::read(location).await?;

        Ok(ContentBlob::new(
            location,
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    }

    fn name(&self) -> &str {
        "file"
    }
}
