//! Tracing span creation helpers for explorer-logs operations.
//!
//! Telemetry concerns are kept out of business logic: each instrumented
//! operation has a span helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::events::filter::BlockTag;

/// Create span for one `get_events` call, covering all retries and pages.
///
/// Parent: caller's span
/// Children: explorer_request spans (one per HTTP attempt)
#[inline]
pub(crate) fn get_events(
    chain_id: u64,
    chain: &str,
    from_block: BlockTag,
    to_block: BlockTag,
    start_page: u32,
) -> Span {
    tracing::span!(
        Level::INFO,
        "explorer_logs.get_events",
        chain_id = chain_id,
        chain = %chain,
        from_block = %from_block,
        to_block = %to_block,
        start_page = start_page,
        pages = tracing::field::Empty,
        logs = tracing::field::Empty,
    )
}

/// Create span for a single HTTP request to the explorer.
///
/// Parent: get_events span
/// Children: None
#[inline]
pub(crate) fn explorer_request(chain: &str, url: &str, page: u32) -> Span {
    tracing::debug_span!(
        "explorer_logs.explorer_request",
        chain = %chain,
        url = %url,
        page = page,
        duration_ms = tracing::field::Empty,
    )
}
