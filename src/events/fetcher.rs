// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-chain log fetching with retry and pagination
//!
//! [`LogFetcher`] owns one rate-limited service stack per configured chain
//! and drives the explorer `getLogs` protocol against it:
//!
//! - throttling (HTTP 429 or the in-body rate-limit message) retries the same
//!   page under the configured [`RetryPolicy`]
//! - a full page on a multi-block range fails with
//!   [`FetchError::ResultSizeExceeded`] so the caller can bisect the range
//! - a full page on a single block is paginated until a short page arrives
//! - a query timeout on a single block retries the same page, also under the
//!   retry policy
//! - provider error strings and malformed bodies fail immediately
//!
//! # Examples
//!
//! ```rust,ignore
//! use explorer_logs::{ChainEndpoint, FetcherConfigBuilder, LogFetcher, LogFilter};
//!
//! let config = FetcherConfigBuilder::new()
//!     .endpoint(ChainEndpoint::new(1, "ethereum", "https://api.etherscan.io/api".parse()?)
//!         .with_api_key(api_key))
//!     .build()?;
//! let fetcher = LogFetcher::new(config)?;
//!
//! let filter = LogFilter::new()
//!     .from_block(19_000_000)
//!     .to_block(19_000_100)
//!     .topic0(transfer_signature);
//!
//! match fetcher.get_events(1, &filter).await {
//!     Ok(logs) => println!("{} logs", logs.len()),
//!     Err(e) if e.is_result_size_exceeded() => { /* split the range */ }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tower::{Layer, Service, ServiceExt};
use tracing::{debug, error, info, warn, Instrument, Span};

use super::classify::{classify_body, decode_records, Classification, Oversize};
use super::filter::LogFilter;
use super::normalize::normalize_logs;
use super::query::build_query;
use crate::config::constants::PAGINATION_SOFT_LIMIT;
use crate::config::{ChainEndpoint, FetcherConfig};
use crate::errors::{ConfigError, FetchError, TransportError};
use crate::spans;
use crate::transport::{
    ExplorerRequest, HttpResponse, LoggingLayer, LoggingService, RateLimitLayer, RateLimitService,
    RateLimiter, ReqwestTransport, RetryPolicy,
};
use crate::types::Log;

type ChainService<S> = RateLimitService<LoggingService<S>>;

/// Endpoint settings plus the service stack built for them.
struct ChainClient<S> {
    endpoint: ChainEndpoint,
    service: ChainService<S>,
}

/// Fetches event logs from block-explorer APIs, one rate limiter per chain.
///
/// `S` is the underlying HTTP transport. [`LogFetcher::new`] uses
/// [`ReqwestTransport`]; tests inject a `tower::service_fn`.
///
/// The fetcher is `Send + Sync` when the transport is, so one instance can be
/// shared in an `Arc` across tasks. Calls for the same chain are admitted in
/// submission order.
pub struct LogFetcher<S = ReqwestTransport> {
    chains: HashMap<u64, ChainClient<S>>,
    retry_policy: RetryPolicy,
    max_pages: Option<u32>,
}

impl LogFetcher<ReqwestTransport> {
    /// Create a fetcher backed by a `reqwest` client using the configured
    /// request timeout.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Ok(Self::with_transport(config, transport)?)
    }
}

impl<S> LogFetcher<S>
where
    S: Service<ExplorerRequest, Response = HttpResponse, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    /// Create a fetcher over any explorer transport.
    ///
    /// Builds `RateLimitLayer -> LoggingLayer -> transport` for every
    /// configured chain.
    pub fn with_transport(config: FetcherConfig, transport: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let chains = config
            .endpoints
            .into_iter()
            .map(|endpoint| {
                let logging = LoggingLayer::new(endpoint.identifier.clone());
                let rate_limit =
                    RateLimitLayer::new(endpoint.requests_per_window, endpoint.window);
                let service = rate_limit.layer(logging.layer(transport.clone()));
                (endpoint.chain_id, ChainClient { endpoint, service })
            })
            .collect();

        Ok(Self {
            chains,
            retry_policy: config.retry_policy,
            max_pages: config.max_pages,
        })
    }

    /// Chain ids this fetcher can serve.
    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.chains.keys().copied()
    }

    /// Endpoint configured for a chain.
    pub fn endpoint(&self, chain_id: u64) -> Option<&ChainEndpoint> {
        self.chains.get(&chain_id).map(|client| &client.endpoint)
    }

    /// The rate limiter guarding a chain's endpoint.
    pub fn rate_limiter(&self, chain_id: u64) -> Option<&Arc<RateLimiter>> {
        self.chains.get(&chain_id).map(|client| client.service.limiter())
    }

    /// Fetch all logs matching `filter`, starting at page 1.
    pub async fn get_events(&self, chain_id: u64, filter: &LogFilter) -> Result<Vec<Log>, FetchError> {
        self.get_events_from_page(chain_id, filter, 1).await
    }

    /// Fetch all logs matching `filter`, starting at `page`.
    ///
    /// Logs are returned in provider order; when a single-block query spans
    /// several pages they are concatenated in page order.
    ///
    /// # Errors
    ///
    /// - [`FetchError::UnsupportedChain`] if no endpoint is configured for `chain_id`
    /// - [`FetchError::ResultSizeExceeded`] if a multi-block range fills a page
    /// - [`FetchError::Provider`] / [`FetchError::Malformed`] for bad responses
    /// - [`FetchError::Transport`] for non-throttling HTTP failures
    /// - [`FetchError::RetriesExhausted`] when a bounded retry policy gives up
    /// - [`FetchError::PageLimitExceeded`] when `max_pages` is reached
    pub async fn get_events_from_page(
        &self,
        chain_id: u64,
        filter: &LogFilter,
        page: u32,
    ) -> Result<Vec<Log>, FetchError> {
        let client = self
            .chains
            .get(&chain_id)
            .ok_or(FetchError::UnsupportedChain { chain_id })?;

        let span = spans::get_events(
            chain_id,
            &client.endpoint.identifier,
            filter.from_block_tag(),
            filter.to_block_tag(),
            page,
        );

        self.fetch_pages(client, filter, page.max(1)).instrument(span).await
    }

    async fn fetch_pages(
        &self,
        client: &ChainClient<S>,
        filter: &LogFilter,
        start_page: u32,
    ) -> Result<Vec<Log>, FetchError> {
        let endpoint = &client.endpoint;
        let single_block = filter.is_single_block();

        let mut logs = Vec::new();
        let mut page = start_page;
        let mut pages_completed: u32 = 0;
        // Attempts made for the current page; reset when a page completes.
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);
            let request = ExplorerRequest {
                url: endpoint.api_base_url.clone(),
                query: build_query(filter, page, endpoint.api_key.as_deref()),
            };

            let classification = match client.service.clone().oneshot(request).await {
                Ok(response) => classify_body(&response.body),
                Err(TransportError::TooManyRequests) => {
                    self.before_retry(attempts, page, "HTTP 429 Too Many Requests")
                        .await?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            match classification {
                Classification::Success(records) => {
                    logs.extend(normalize_logs(records)?);
                    pages_completed += 1;

                    let current = Span::current();
                    current.record("pages", pages_completed);
                    current.record("logs", logs.len());
                    debug!(pages = pages_completed, logs = logs.len(), "Fetched logs");
                    return Ok(logs);
                }
                Classification::RateLimited => {
                    self.before_retry(attempts, page, "explorer rate limit reached")
                        .await?;
                }
                Classification::QueryTooLarge { .. } if !single_block => {
                    info!(
                        from_block = %filter.from_block_tag(),
                        to_block = %filter.to_block_tag(),
                        "Result set exceeds one page, range must be split"
                    );
                    return Err(FetchError::ResultSizeExceeded {
                        from_block: filter.from_block_tag(),
                        to_block: filter.to_block_tag(),
                    });
                }
                Classification::QueryTooLarge {
                    cause: Oversize::Timeout,
                } => {
                    // Query timeout on one block: there is nothing smaller to
                    // split into, so ask for the same page again.
                    self.before_retry(attempts, page, "query timeout on a single block")
                        .await?;
                }
                Classification::QueryTooLarge {
                    cause: Oversize::FullPage(items),
                } => {
                    let records = decode_records(items).map_err(FetchError::malformed)?;
                    logs.extend(normalize_logs(records)?);
                    pages_completed += 1;
                    attempts = 0;

                    if let Some(max_pages) = self.max_pages.filter(|max| pages_completed >= *max) {
                        error!(max_pages, logs = logs.len(), "Pagination limit reached");
                        return Err(FetchError::PageLimitExceeded { max_pages });
                    }
                    if pages_completed == PAGINATION_SOFT_LIMIT {
                        warn!(
                            pages = pages_completed,
                            logs = logs.len(),
                            "Single-block result set spans an unusual number of pages"
                        );
                    }

                    page += 1;
                    debug!(next_page = page, logs = logs.len(), "Full page, fetching next page");
                }
                Classification::ProviderError(message) => {
                    error!(page, error = %message, "Explorer returned an error");
                    return Err(FetchError::Provider { message });
                }
                Classification::Malformed(details) => {
                    error!(page, details = %details, "Malformed explorer response");
                    return Err(FetchError::malformed(details));
                }
            }
        }
    }

    /// Apply the retry policy after `attempts` attempts of the current page.
    async fn before_retry(&self, attempts: u32, page: u32, reason: &str) -> Result<(), FetchError> {
        if !self.retry_policy.allows_another(attempts) {
            warn!(attempts, page, reason, "Giving up on throttled request");
            return Err(FetchError::RetriesExhausted {
                attempts,
                reason: reason.to_string(),
            });
        }

        let delay = self.retry_policy.delay_for(attempts.saturating_sub(1));
        warn!(
            attempts,
            page,
            reason,
            delay_ms = delay.as_millis() as u64,
            "Retrying throttled request"
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}
