// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Rate-limited event log retrieval from Etherscan-style block explorers.
//!
//! [`LogFetcher`] queries the explorer `getLogs` endpoint of each configured
//! chain through a per-chain sliding-window rate limiter. It retries throttled
//! requests, paginates oversized single-block results and reports oversized
//! multi-block ranges as [`FetchError::ResultSizeExceeded`] so the caller can
//! split them.
//!
//! # Example
//!
//! ```rust,ignore
//! use explorer_logs::{ChainEndpoint, FetcherConfigBuilder, LogFetcher, LogFilter};
//! use alloy_chains::NamedChain;
//!
//! let config = FetcherConfigBuilder::new()
//!     .endpoint(
//!         ChainEndpoint::for_chain(NamedChain::Mainnet, "https://api.etherscan.io/api".parse()?)
//!             .with_api_key(std::env::var("ETHERSCAN_API_KEY")?),
//!     )
//!     .build()?;
//!
//! let fetcher = LogFetcher::new(config)?;
//! let filter = LogFilter::new().at_block(19_000_000).topic0(transfer_topic);
//! let logs = fetcher.get_events(1, &filter).await?;
//! ```

pub mod config;
pub mod errors;
pub mod events;
mod spans;
pub mod transport;
pub mod types;

pub use config::{ChainEndpoint, FetcherConfig, FetcherConfigBuilder};
pub use errors::{ConfigError, FetchError, NormalizeError, TransportError};
pub use events::{
    build_query, classify_body, classify_response, normalize_log, normalize_logs, BlockTag,
    Classification, ExplorerResponse, LogFetcher, LogFilter, LogQuery, Oversize, Topic,
};
pub use transport::{Backoff, RetryPolicy, RetryPolicyBuilder};
pub use types::{Log, RawLog};
