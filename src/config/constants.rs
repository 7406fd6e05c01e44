// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider constants
//!
//! Centralizes the fixed values of the block-explorer `getLogs` protocol:
//! page size, error marker phrases and default limits.

use std::time::Duration;

/// Number of records the explorer returns per page (`offset` parameter).
///
/// A result array of exactly this length is ambiguous: it may be the whole
/// result set or only its first page.
pub const PAGE_SIZE: usize = 1000;

/// Sentinel accepted by explorers as the newest block.
pub const LATEST_BLOCK_TAG: &str = "latest";

/// Pages beyond this count are logged as a pathologically large result set.
pub const PAGINATION_SOFT_LIMIT: u32 = 10;

/// Default rolling window for per-endpoint rate limiting.
pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(1);

/// Free-tier explorer keys allow five calls per second.
pub const DEFAULT_REQUESTS_PER_WINDOW: u32 = 5;

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker phrases (lowercase) the explorer uses in `result` when throttling.
pub mod markers {
    /// In-body rate-limit messages.
    pub const RATE_LIMIT: &[&str] = &[
        "max rate limit reached",
        "max calls per sec rate limit reached",
    ];

    /// In-body query timeout messages. The first spelling is the provider's.
    pub const QUERY_TIMEOUT: &[&str] = &["query timeout occured", "query timeout occurred"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_lowercase() {
        for marker in markers::RATE_LIMIT.iter().chain(markers::QUERY_TIMEOUT) {
            assert_eq!(*marker, marker.to_lowercase());
        }
    }

    #[test]
    fn test_page_size() {
        assert_eq!(PAGE_SIZE, 1000);
    }
}
