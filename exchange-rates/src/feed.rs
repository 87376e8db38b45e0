//! HTTP adapter for the rate feed port.

use async_trait::async_trait;
use currency_types::{RateError, RateFeed, RateTable};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::ecb;

/// The ECB daily euro reference rates.
pub const ECB_DAILY_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

/// Fetches the reference-rate XML document over HTTP.
pub struct HttpFeed {
    url: String,
    http: Client,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    /// Feed for the public ECB daily document.
    pub fn ecb() -> Self {
        Self::new(ECB_DAILY_URL)
    }

    pub fn with_client(url: impl Into<String>, http: Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateFeed for HttpFeed {
    async fn fetch(&self) -> Result<RateTable, RateError> {
        debug!("Requesting rate feed from {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RateError::FeedUnavailable(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RateError::FeedUnavailable(format!(
                "expected status code 200, got {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RateError::FeedUnavailable(e.to_string()))?;

        ecb::decode(&body)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::ecb::tests::DAILY;

    async fn mock_feed(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eurofxref-daily.xml"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn feed_for(server: &MockServer) -> HttpFeed {
        HttpFeed::new(format!("{}/eurofxref-daily.xml", server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_decodes_document() {
        let server = mock_feed(200, DAILY).await;
        let table = feed_for(&server).fetch().await.unwrap();
        assert_eq!(table.get("JPY"), Some(158.08));
        assert_eq!(table.get("EUR"), Some(1.0));
    }

    #[tokio::test]
    async fn test_non_success_status_is_unavailable() {
        let server = mock_feed(503, "maintenance").await;
        let err = feed_for(&server).fetch().await.unwrap_err();
        assert_eq!(
            err,
            RateError::FeedUnavailable("expected status code 200, got 503".into())
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_malformed() {
        let server = mock_feed(200, "<html>oops</html>").await;
        let err = feed_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, RateError::FeedMalformed(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_unavailable() {
        // Nothing listens on the discard port.
        let feed = HttpFeed::new("http://127.0.0.1:9/eurofxref-daily.xml");
        let err = feed.fetch().await.unwrap_err();
        assert!(matches!(err, RateError::FeedUnavailable(_)));
    }

    #[test]
    fn test_ecb_feed_url() {
        assert_eq!(HttpFeed::ecb().url(), ECB_DAILY_URL);
    }
}
