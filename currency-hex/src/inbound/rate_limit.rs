//! Rate limiting middleware using Governor.
//!
//! Implements per-peer rate limiting with a token bucket algorithm. Requests
//! are keyed by the connecting socket address; the `x-client-id` header is
//! informational only and never selects a bucket.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde_json::json;

/// Header identifying the calling client in logs.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Bucket shared by requests whose peer address is unknown.
const UNKNOWN_PEER: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Number of checks between sweeps of idle buckets.
const SWEEP_EVERY: u64 = 1024;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// One bucket per peer address
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    checks: AtomicU64,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(600)
    }
}

impl RateLimiterState {
    /// Creates a new rate limiter state allowing `requests_per_minute` per peer.
    ///
    /// A zero quota is treated as one request per minute.
    pub fn new(requests_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);

        Self {
            limiter: RateLimiter::dashmap(Quota::per_minute(per_minute)),
            checks: AtomicU64::new(0),
        }
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, peer: IpAddr) -> bool {
        if self.checks.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.sweep();
        }

        self.limiter.check_key(&peer).is_ok()
    }

    /// Drops buckets that have refilled completely.
    pub fn sweep(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of peers currently holding a bucket.
    pub fn tracked_peers(&self) -> usize {
        self.limiter.len()
    }
}

/// Rate limiting middleware.
///
/// The server must be served with `into_make_service_with_connect_info`;
/// without a peer address every request shares one bucket.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip rate limiting for health endpoint
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(UNKNOWN_PEER);

    if !limiter.check(peer) {
        let client = request
            .headers()
            .get(CLIENT_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("-");
        tracing::warn!(%peer, client, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Rate limit exceeded. Please try again later.",
                "code": StatusCode::TOO_MANY_REQUESTS.as_u16(),
                "retry_after_seconds": 60
            })),
        )
            .into_response();
    }

    next.run(request).await
}
