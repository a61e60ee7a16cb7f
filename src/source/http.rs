//! HTTP status source.
//!
//! Fetches status documents with a GET request against the monitor
//! endpoint, the way the original browser page did.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::StatusSource;
use crate::data::StatusDocument;

/// Per-request timeout. A hung endpoint must not stall the poll loop
/// indefinitely, since at most one request is outstanding.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A status source that GETs a JSON document from an HTTP endpoint.
#[derive(Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    description: String,
}

impl HttpSource {
    /// Create a new HTTP source for the given URL.
    ///
    /// Fails when the HTTP client cannot be built; a client without the
    /// request timeout would let a hung endpoint stall the poll loop.
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            url: url.to_string(),
            description: format!("http: {}", url),
        })
    }

    /// Returns the URL being polled.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatusSource for HttpSource {
    async fn fetch(&self) -> Result<StatusDocument> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("GET {}", self.url))?;

        // Non-2xx counts as a transport error
        let response = response
            .error_for_status()
            .with_context(|| format!("GET {}", self.url))?;

        let document = response
            .json::<StatusDocument>()
            .await
            .context("decoding status document")?;

        Ok(document)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response on an ephemeral port and return
    /// the URL to fetch.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            // Read the request headers, then reply
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });

        format!("http://{}/jsonupdate", addr)
    }

    #[tokio::test]
    async fn test_http_source_fetches_document() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"AMC1": {"temp_elem": {"class_name": "ok", "value": 42}}}"#,
        )
        .await;

        let source = HttpSource::new(&url).unwrap();
        let document = source.fetch().await.unwrap();

        let item = document.get("AMC1").unwrap().get("temp_elem").unwrap();
        assert_eq!(item.class_text(), "ok");
        assert_eq!(item.content_text(), "42");
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let url = serve_once("HTTP/1.1 500 Internal Server Error", "").await;

        let source = HttpSource::new(&url).unwrap();
        let result = source.fetch().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_http_source_invalid_json() {
        let url = serve_once("HTTP/1.1 200 OK", "not valid json").await;

        let source = HttpSource::new(&url).unwrap();
        let result = source.fetch().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_http_source_unreachable() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(&format!("http://{}/jsonupdate", addr)).unwrap();
        assert!(source.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_http_source_description() {
        let source = HttpSource::new("http://shelf01:9090/jsonupdate").unwrap();
        assert_eq!(source.description(), "http: http://shelf01:9090/jsonupdate");
        assert_eq!(source.url(), "http://shelf01:9090/jsonupdate");
    }
}
