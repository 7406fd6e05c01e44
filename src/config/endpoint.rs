// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-chain explorer endpoint configuration.

use std::fmt;
use std::time::Duration;

use alloy_chains::{Chain, NamedChain};
use serde::{Deserialize, Serialize};
use url::Url;

use super::constants::{DEFAULT_RATE_WINDOW, DEFAULT_REQUESTS_PER_WINDOW};
use crate::errors::ConfigError;

fn default_requests_per_window() -> u32 {
    DEFAULT_REQUESTS_PER_WINDOW
}

fn default_window() -> Duration {
    DEFAULT_RATE_WINDOW
}

/// Immutable explorer settings for one chain.
///
/// # Example
///
/// ```rust
/// use explorer_logs::ChainEndpoint;
/// use alloy_chains::NamedChain;
/// use std::time::Duration;
///
/// let endpoint = ChainEndpoint::for_chain(
///     NamedChain::Mainnet,
///     "https://api.etherscan.io/api".parse().unwrap(),
/// )
/// .with_api_key("YOUR_KEY")
/// .with_rate_limit(5, Duration::from_secs(1));
///
/// assert_eq!(endpoint.chain_id, 1);
/// assert_eq!(endpoint.identifier, "mainnet");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEndpoint {
    /// EVM chain id used to look the endpoint up
    pub chain_id: u64,
    /// Human-readable chain name, used in logs
    pub identifier: String,
    /// Explorer API base URL
    pub api_base_url: Url,
    /// API key, sent as `apiKey` when present
    #[serde(default)]
    pub api_key: Option<String>,
    /// Requests admitted per window
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,
    /// Rolling rate-limit window
    #[serde(default = "default_window")]
    pub window: Duration,
}

impl ChainEndpoint {
    /// Create an endpoint with the default free-tier rate limit and no key.
    pub fn new(chain_id: u64, identifier: impl Into<String>, api_base_url: Url) -> Self {
        Self {
            chain_id,
            identifier: identifier.into(),
            api_base_url,
            api_key: None,
            requests_per_window: DEFAULT_REQUESTS_PER_WINDOW,
            window: DEFAULT_RATE_WINDOW,
        }
    }

    /// Create an endpoint for a known chain, naming it after the chain.
    pub fn for_chain(chain: NamedChain, api_base_url: Url) -> Self {
        let id = Chain::from_named(chain).id();
        Self::new(id, chain.to_string(), api_base_url)
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the rate limit.
    pub fn with_rate_limit(mut self, requests_per_window: u32, window: Duration) -> Self {
        self.requests_per_window = requests_per_window;
        self.window = window;
        self
    }

    /// Reject settings that would disable or break rate limiting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.requests_per_window == 0 {
            return Err(ConfigError::ZeroRequestsPerWindow {
                chain_id: self.chain_id,
            });
        }
        if self.window.is_zero() {
            return Err(ConfigError::ZeroWindow {
                chain_id: self.chain_id,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for ChainEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainEndpoint")
            .field("chain_id", &self.chain_id)
            .field("identifier", &self.identifier)
            .field("api_base_url", &self.api_base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("requests_per_window", &self.requests_per_window)
            .field("window", &self.window)
            .finish()
    }
}
