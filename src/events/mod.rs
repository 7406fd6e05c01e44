// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Event log retrieval from block-explorer APIs.
//!
//! This module handles:
//! - Log filters with positional topics (`filter`)
//! - Building `getLogs` query parameters (`query`)
//! - Classifying explorer responses (`classify`)
//! - Turning raw records into typed logs (`normalize`)
//! - The retry and pagination loop (`fetcher`)

pub mod classify;
pub mod fetcher;
pub mod filter;
pub mod normalize;
pub mod query;

pub use classify::{
    classify_body, classify_response, decode_records, Classification, ExplorerResponse, Oversize,
};
pub use fetcher::LogFetcher;
pub use filter::{BlockTag, LogFilter, Topic, MAX_TOPICS};
pub use normalize::{normalize_log, normalize_logs, parse_hex_u64};
pub use query::{build_query, LogQuery};
