//! HTTP Server configuration and startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use currency_types::RateFeed;

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::RateService;

/// Route of the `GetRate` remote procedure.
pub const GET_RATE_PATH: &str = "/currency.Currency/GetRate";

/// HTTP Server for the exchange-rate RPC surface.
pub struct HttpServer<F: RateFeed> {
    state: Arc<AppState<F>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<F: RateFeed + 'static> HttpServer<F> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: RateService<F>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::default()),
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(service: RateService<F>, requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::new(requests_per_minute)),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health::<F>))
            .route(GET_RATE_PATH, post(handlers::get_rate::<F>))
            .route("/api/rates/{base}", get(handlers::list_rates::<F>))
            .route("/api-docs/openapi.json", get(handlers::openapi))
            .fallback(handlers::not_found)
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address until `shutdown` resolves.
    pub async fn run<S>(self, addr: &str, shutdown: S) -> anyhow::Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        let app = self.router().into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
