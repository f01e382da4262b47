use async_trait::async_trait;
use curl::easy::{Easy2, Handler, WriteError};
use std::time::Duration;
use tracing::debug;

use crate::core::error::{Result, ScanError};
use crate::core::results::ContentBlob;
use crate::core::traits::ContentSource;

/// Collector for response data
struct Collector(Vec<u8>);

impl Handler for Collector {
    fn write(&mut self, data: &[u8]) -> std::result::Result<usize, WriteError> {
        self.0.extend_from_slice(data);
        Ok(data.len())
    }
}

/// HTTP client using libcurl. Certificate verification stays off: scan
/// targets are frequently hosts with broken or self-signed TLS.
#[derive(Debug, Clone)]
pub struct HttpClient {
    user_agent: String,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Perform a GET request and return the raw body.
    pub fn get(&self, url: &str) -> Result<Vec<u8>> {
        let mut easy = Easy2::new(Collector(Vec::new()));

        easy.url(url)?;
        easy.useragent(&self.user_agent)?;
        easy.timeout(self.timeout)?;
        easy.follow_location(true)?;
        easy.max_redirections(5)?;
        easy.ssl_verify_peer(false)?;
        easy.ssl_verify_host(false)?;

        easy.perform()?;

        Ok(easy.get_ref().0.clone())
    }
}

/// Fetches work-item URLs over HTTP. One fetch per item, no retries; a
/// failed or timed-out request abandons only that item.
pub struct HttpSource {
    client: HttpClient,
}

impl HttpSource {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: HttpClient::new(user_agent, timeout),
        }
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<ContentBlob> {
        debug!("fetching {}", location);

        let body = tokio::task::spawn_blocking({
            let client = self.client.clone();
            let url = location.to_string();
            move || client.get(&url)
        })
        .await
        .map_err(|e| ScanError::Unknown(format!("Task join error: {}", e)))??;

        Ok(ContentBlob::new(
            location,
            String::from_utf8_lossy(&body).into_owned(),
        ))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new("test-agent", Duration::from_secs(10));
        assert_eq!(client.timeout, Duration::from_secs(10));
        assert_eq!(client.user_agent, "test-agent");
    }

    #[test]
    fn test_http_source_name() {
        let source = HttpSource::new("test-agent", Duration::from_secs(10));
        assert_eq!(source.name(), "http");
    }
}
