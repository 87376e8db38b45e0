//! # Currency Client SDK
//!
//! A typed Rust client for the exchange-rate RPC surface. Implements the
//! `ExchangeRateProvider` port so the catalog can price products against a
//! remote rate service.

use async_trait::async_trait;
use currency_types::{
    CurrencyCode, ErrorResponse, ExchangeError, ExchangeRateProvider, HealthResponse, RateRequest,
    RateResponse, RatesResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Path of the `GetRate` procedure.
const GET_RATE_PATH: &str = "/currency.Currency/GetRate";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        currency: Option<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for ExchangeError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                status: 400,
                currency: Some(code),
                ..
            } => ExchangeError::UnsupportedCurrency(code),
            ClientError::Api {
                status: 404,
                currency: Some(code),
                ..
            } => ExchangeError::UnknownCurrency(code),
            other => ExchangeError::ServiceUnavailable(other.to_string()),
        }
    }
}

/// Currency API client.
pub struct RatesClient {
    base_url: String,
    client_id: Option<String>,
    http: Client,
}

impl RatesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: None,
            http: Client::new(),
        }
    }

    /// Sets the identifier the server rate-limits this client by.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Fetches the health and freshness of the server's rate table.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/health").await
    }

    /// Calls `GetRate`. Codes are validated by the server.
    pub async fn fetch_rate(
        &self,
        base: &str,
        destination: &str,
    ) -> Result<RateResponse, ClientError> {
        let req = RateRequest {
            base: base.to_string(),
            destination: destination.to_string(),
        };
        self.post(GET_RATE_PATH, &req).await
    }

    /// Lists every rate from `base`.
    pub async fn list_rates(&self, base: &str) -> Result<RatesResponse, ClientError> {
        self.get(&format!("/api/rates/{}", base)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(id) = &self.client_id {
            req = req.header("x-client-id", id);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let mut req = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        if let Some(id) = &self.client_id {
            req = req.header("x-client-id", id);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let (message, currency) = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => (err.error, err.currency),
                Err(_) => (body, None),
            };
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
                currency,
            })
        }
    }
}

#[async_trait]
impl ExchangeRateProvider for RatesClient {
    async fn get_rate(
        &self,
        base: CurrencyCode,
        destination: CurrencyCode,
    ) -> Result<f64, ExchangeError> {
        let resp = self.fetch_rate(base.code(), destination.code()).await?;
        Ok(resp.rate)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RatesClient::new("http://localhost:9092");
        assert_eq!(client.base_url, "http://localhost:9092");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = RatesClient::new("http://localhost:9092/");
        assert_eq!(client.base_url, "http://localhost:9092");
    }

    #[test]
    fn test_client_with_client_id() {
        let client = RatesClient::new("http://localhost:9092").with_client_id("catalog");
        assert_eq!(client.client_id, Some("catalog".to_string()));
    }

    #[tokio::test]
    async fn test_get_rate_through_port() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GET_RATE_PATH))
            .and(header("x-client-id", "catalog"))
            .and(body_json(serde_json::json!({"base": "EUR", "destination": "GBP"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"rate": 0.85})))
            .mount(&server)
            .await;

        let client = RatesClient::new(server.uri()).with_client_id("catalog");
        let rate = client
            .get_rate(CurrencyCode::EUR, CurrencyCode::GBP)
            .await
            .unwrap();
        assert_eq!(rate, 0.85);
    }

    #[tokio::test]
    async fn test_error_body_maps_to_exchange_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GET_RATE_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "Rate not found for currency JPY",
                "code": 404,
                "currency": "JPY"
            })))
            .mount(&server)
            .await;

        let client = RatesClient::new(server.uri());
        let err = client
            .get_rate(CurrencyCode::EUR, CurrencyCode::JPY)
            .await
            .unwrap_err();
        assert_eq!(err, ExchangeError::UnknownCurrency("JPY".into()));
    }

    #[tokio::test]
    async fn test_non_json_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GET_RATE_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = RatesClient::new(server.uri());
        let err = client.fetch_rate("EUR", "USD").await.unwrap_err();
        assert!(matches!(
            &err,
            ClientError::Api { status: 502, message, currency: None } if message == "bad gateway"
        ));
        assert!(matches!(
            ExchangeError::from(err),
            ExchangeError::ServiceUnavailable(_)
        ));
    }
}
