// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced by [`LogFetcher`](crate::LogFetcher).
//!
//! Rate-limit conditions never appear here unless a bounded
//! [`RetryPolicy`](crate::RetryPolicy) runs out of attempts.

use super::{ConfigError, NormalizeError, TransportError};
use crate::events::filter::BlockTag;

/// Errors returned from `get_events`.
///
/// # Examples
///
/// ```rust,ignore
/// use explorer_logs::FetchError;
///
/// match fetcher.get_events(chain_id, &filter).await {
///     Err(e) if e.is_result_size_exceeded() => { /* bisect the block range */ }
///     Err(e) => return Err(e),
///     Ok(logs) => consume(logs),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No endpoint was configured for the requested chain.
    #[error("unsupported chain id: {chain_id}")]
    UnsupportedChain {
        /// The chain id that was requested
        chain_id: u64,
    },

    /// The block range holds more logs than one page and spans several
    /// blocks. The caller should split the range and retry each half.
    #[error("result size exceeded for blocks {from_block}..={to_block}, split the range")]
    ResultSizeExceeded {
        /// Start of the offending range
        from_block: BlockTag,
        /// End of the offending range
        to_block: BlockTag,
    },

    /// The explorer returned an error string in `result`. Passed through verbatim.
    #[error("{message}")]
    Provider {
        /// Message from the explorer
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("malformed explorer response: {details}")]
    Malformed {
        /// What was wrong with the body
        details: String,
    },

    /// A record in the page could not be normalized.
    #[error("failed to normalize log: {0}")]
    Normalize(#[from] NormalizeError),

    /// The HTTP request failed for a reason other than throttling.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A bounded retry policy gave up on a throttled or timed-out request.
    #[error("gave up after {attempts} attempts: {reason}")]
    RetriesExhausted {
        /// Number of attempts made, including the first
        attempts: u32,
        /// The last retryable condition seen
        reason: String,
    },

    /// Single-block pagination went past the configured hard cap.
    #[error("pagination exceeded {max_pages} pages")]
    PageLimitExceeded {
        /// The configured cap
        max_pages: u32,
    },

    /// The fetcher could not be constructed.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl FetchError {
    /// Whether the caller should bisect the block range and retry.
    pub fn is_result_size_exceeded(&self) -> bool {
        matches!(self, FetchError::ResultSizeExceeded { .. })
    }

    /// Create a `Malformed` error with details.
    pub fn malformed(details: impl Into<String>) -> Self {
        FetchError::Malformed {
            details: details.into(),
        }
    }
}
