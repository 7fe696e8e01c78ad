//! HTTP transport module
//!
//! Provides the transport seam the connector calls and its reqwest
//! implementation.
//!
//! # Features
//!
//! - **Transport trait**: one GET, status plus body back
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Timeouts**: Per-client request timeout

mod client;
mod rate_limit;

pub use client::{HttpResponse, HttpTransport, HttpTransportConfig, Transport};
pub use rate_limit::RateLimiter;

#[cfg(test)]
mod tests;
