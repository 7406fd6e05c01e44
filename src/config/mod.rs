//! Configuration for explorer log fetching
//!
//! [`FetcherConfig`] holds the per-chain explorer endpoints plus the
//! retry, timeout and pagination settings shared by all chains.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use explorer_logs::{ChainEndpoint, FetcherConfigBuilder};
//!
//! let config = FetcherConfigBuilder::new()
//!     .endpoint(ChainEndpoint::new(1, "ethereum", "https://api.etherscan.io/api".parse().unwrap()))
//!     .build()
//!     .unwrap();
//!
//! assert!(config.endpoint(1).is_some());
//! assert_eq!(config.max_pages, None);
//! ```
//!
//! # Example: Bounded retries
//!
//! ```rust
//! use explorer_logs::{FetcherConfigBuilder, RetryPolicy};
//! use std::time::Duration;
//!
//! let config = FetcherConfigBuilder::new()
//!     .retry_policy(RetryPolicy::bounded(10))
//!     .request_timeout(Duration::from_secs(10))
//!     .max_pages(25)
//!     .build()
//!     .unwrap();
//! ```

use std::collections::HashSet;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::transport::RetryPolicy;

pub mod constants;
mod endpoint;

pub use endpoint::ChainEndpoint;

use constants::DEFAULT_REQUEST_TIMEOUT;

/// Configuration for a [`LogFetcher`](crate::LogFetcher)
///
/// Use [`FetcherConfigBuilder`] to construct instances; it validates
/// endpoints and rejects duplicate chains.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Explorer endpoints, one per chain
    pub endpoints: Vec<ChainEndpoint>,

    /// Retry policy for rate-limited requests
    /// Default: unbounded, no backoff
    pub retry_policy: RetryPolicy,

    /// Timeout for a single HTTP request (used by the default transport)
    /// Default: 30 seconds
    pub request_timeout: Duration,

    /// Hard cap on pages fetched for a single-block query
    /// Default: None (pagination continues until the explorer runs out)
    pub max_pages: Option<u32>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            retry_policy: RetryPolicy::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_pages: None,
        }
    }
}

impl FetcherConfig {
    /// Endpoint configured for a chain id.
    pub fn endpoint(&self, chain_id: u64) -> Option<&ChainEndpoint> {
        self.endpoints.iter().find(|e| e.chain_id == chain_id)
    }

    /// Check every endpoint and reject duplicate chain ids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for endpoint in &self.endpoints {
            endpoint.validate()?;
            if !seen.insert(endpoint.chain_id) {
                return Err(ConfigError::DuplicateChain {
                    chain_id: endpoint.chain_id,
                });
            }
        }
        Ok(())
    }
}

/// Builder for [`FetcherConfig`]
///
/// # Example
///
/// ```rust
/// use explorer_logs::{ChainEndpoint, FetcherConfigBuilder};
/// use std::time::Duration;
///
/// let config = FetcherConfigBuilder::new()
///     .endpoint(
///         ChainEndpoint::new(8453, "base", "https://api.basescan.org/api".parse().unwrap())
///             .with_rate_limit(2, Duration::from_secs(1)),
///     )
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct FetcherConfigBuilder {
    config: FetcherConfig,
}

impl FetcherConfigBuilder {
    /// Create a new builder with defaults and no endpoints
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chain endpoint
    pub fn endpoint(mut self, endpoint: ChainEndpoint) -> Self {
        self.config.endpoints.push(endpoint);
        self
    }

    /// Add several chain endpoints
    pub fn endpoints(mut self, endpoints: impl IntoIterator<Item = ChainEndpoint>) -> Self {
        self.config.endpoints.extend(endpoints);
        self
    }

    /// Set the retry policy for rate-limited requests
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry_policy = policy;
        self
    }

    /// Set the HTTP request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Cap single-block pagination at `max_pages` pages
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.config.max_pages = Some(max_pages);
        self
    }

    /// Validate and build the final configuration
    pub fn build(self) -> Result<FetcherConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(chain_id: u64) -> ChainEndpoint {
        ChainEndpoint::new(
            chain_id,
            format!("chain-{chain_id}"),
            "https://api.etherscan.io/api".parse().unwrap(),
        )
    }

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert!(config.endpoints.is_empty());
        assert_eq!(config.retry_policy, RetryPolicy::unbounded());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_pages, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = FetcherConfigBuilder::new()
            .endpoints([endpoint(1), endpoint(10)])
            .retry_policy(RetryPolicy::bounded(4))
            .max_pages(20)
            .build()
            .unwrap();

        assert_eq!(config.endpoint(10).map(|e| e.identifier.as_str()), Some("chain-10"));
        assert!(config.endpoint(56).is_none());
        assert_eq!(config.retry_policy.max_attempts(), Some(4));
        assert_eq!(config.max_pages, Some(20));
    }

    #[test]
    fn test_duplicate_chain_rejected() {
        let err = FetcherConfigBuilder::new()
            .endpoint(endpoint(1))
            .endpoint(endpoint(1))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateChain { chain_id: 1 });
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = FetcherConfigBuilder::new()
            .endpoint(endpoint(1).with_rate_limit(0, Duration::from_secs(1)))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroRequestsPerWindow { chain_id: 1 });
    }
}
