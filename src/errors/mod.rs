//! Error types for the explorer-logs library.
//!
//! Each stage of the retrieval pipeline has its own error type:
//!
//! - [`ConfigError`] - Invalid endpoint, filter or limiter configuration
//! - [`TransportError`] - HTTP failures, including the "too many requests" signal
//! - [`NormalizeError`] - A provider record that cannot become a [`Log`](crate::Log)
//! - [`FetchError`] - Everything [`LogFetcher`](crate::LogFetcher) surfaces to callers
//!
//! [`FetchError`] wraps the others via `From`, so `?` propagates naturally.
//!
//! # Examples
//!
//! ```rust,ignore
//! use explorer_logs::{FetchError, LogFetcher, LogFilter};
//!
//! async fn example(fetcher: &LogFetcher<S>, filter: LogFilter) {
//!     match fetcher.get_events(1, &filter).await {
//!         Ok(logs) => println!("Fetched {} logs", logs.len()),
//!         Err(FetchError::ResultSizeExceeded { from_block, to_block }) => {
//!             // Split the range in half and fetch each side
//!         }
//!         Err(FetchError::Provider { message }) => eprintln!("Explorer said: {message}"),
//!         Err(e) => eprintln!("Other error: {e}"),
//!     }
//! }
//! ```

mod config;
mod fetch;
mod normalize;
mod transport;

pub use config::ConfigError;
pub use fetch::FetchError;
pub use normalize::NormalizeError;
pub use transport::TransportError;
