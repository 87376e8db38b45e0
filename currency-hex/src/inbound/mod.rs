//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server exposing the rate service as a JSON RPC surface.

mod handlers;
mod rate_limit;
mod server;

pub use handlers::ApiError;
pub use rate_limit::{CLIENT_ID_HEADER, RateLimiterState};
pub use server::{GET_RATE_PATH, HttpServer};
