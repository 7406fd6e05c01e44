// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer for explorer HTTP requests.
//!
//! The fetcher drives a Tower service stack per chain:
//!
//! ```text
//! RateLimitLayer -> LoggingLayer -> transport (ReqwestTransport or a mock)
//! ```
//!
//! # Rate Limiting
//!
//! [`RateLimiter`] admits a bounded number of requests per rolling window,
//! first come first served. [`RateLimitLayer`] applies it to any service.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use explorer_logs::transport::{LoggingLayer, RateLimitLayer, ReqwestTransport};
//! use tower::ServiceBuilder;
//! use std::time::Duration;
//!
//! let service = ServiceBuilder::new()
//!     .layer(RateLimitLayer::new(5, Duration::from_secs(1)))
//!     .layer(LoggingLayer::new("ethereum"))
//!     .service(ReqwestTransport::new(Duration::from_secs(30))?);
//! ```

mod http;
mod logging;
mod rate_limit;
mod retry;

pub use http::{ExplorerRequest, HttpResponse, ReqwestTransport};
pub use logging::{LoggingLayer, LoggingService};
pub use rate_limit::{RateLimitLayer, RateLimitService, RateLimiter};
pub use retry::{Backoff, RetryPolicy, RetryPolicyBuilder};
