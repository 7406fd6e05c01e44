// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration errors.

/// Errors raised while building endpoints, filters, limiters or the fetcher.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A rate limiter must admit at least one request per window.
    #[error("requests per window must be greater than 0 (chain {chain_id})")]
    ZeroRequestsPerWindow {
        /// Chain whose endpoint was misconfigured
        chain_id: u64,
    },

    /// A zero-length window would disable rate limiting entirely.
    #[error("rate limit window must be non-zero (chain {chain_id})")]
    ZeroWindow {
        /// Chain whose endpoint was misconfigured
        chain_id: u64,
    },

    /// Two endpoints were registered for the same chain.
    #[error("duplicate endpoint for chain {chain_id}")]
    DuplicateChain {
        /// The repeated chain id
        chain_id: u64,
    },

    /// Explorers accept at most topic0..topic3.
    #[error("at most 4 topics are supported, got {count}")]
    TooManyTopics {
        /// Number of topic slots supplied
        count: usize,
    },
}
