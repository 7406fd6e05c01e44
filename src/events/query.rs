// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Query construction for the explorer `getLogs` endpoint
//!
//! [`build_query`] is a pure mapping from a [`LogFilter`], a page number and
//! an optional API key to the explorer's query parameters.
//!
//! The explorer requires an explicit boolean operator between every pair of
//! constrained topics, not just adjacent ones. With topic0 and topic2 set,
//! `topic0_2_opr=and` is required even though topic1 is open.
//!
//! # Examples
//!
//! ```rust
//! use explorer_logs::{build_query, LogFilter};
//!
//! let filter = LogFilter::new().at_block(100).topic0("0xAA").topic1("0xBB");
//! let query = build_query(&filter, 1, None);
//!
//! assert_eq!(query.get("fromBlock"), Some("100"));
//! assert_eq!(query.get("topic0"), Some("0xaa"));
//! assert_eq!(query.get("topic0_1_opr"), Some("and"));
//! assert_eq!(query.get("offset"), Some("1000"));
//! assert_eq!(query.get("address"), None);
//! ```

use std::fmt;

use crate::config::constants::PAGE_SIZE;
use crate::events::filter::{LogFilter, MAX_TOPICS};

const API_KEY_PARAM: &str = "apiKey";

/// Ordered query parameters for one `getLogs` page request.
#[derive(Clone, PartialEq, Eq)]
pub struct LogQuery {
    params: Vec<(String, String)>,
}

impl LogQuery {
    /// Value of a parameter, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether a parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All parameters in wire order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    /// Iterate over parameter names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The requested page number.
    pub fn page(&self) -> Option<u32> {
        self.get("page").and_then(|p| p.parse().ok())
    }

    fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }
}

// Keys must never reach logs.
impl fmt::Debug for LogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.params.iter().map(|(k, v)| {
                let shown = if k == API_KEY_PARAM { "<redacted>" } else { v.as_str() };
                (k.as_str(), shown)
            }))
            .finish()
    }
}

/// Build the explorer query parameters for one page of a filter.
///
/// - `fromBlock` defaults to 0 and `toBlock` to `latest`
/// - present topics are emitted positionally; absent slots are omitted
/// - `topic{i}_{j}_opr=and` for every pair of present topics with `i < j`
/// - `offset` is fixed at the page size; `address` is never emitted
pub fn build_query(filter: &LogFilter, page: u32, api_key: Option<&str>) -> LogQuery {
    let mut query = LogQuery { params: Vec::new() };

    query.push("module", "logs");
    query.push("action", "getLogs");
    query.push("fromBlock", filter.from_block_tag().to_string());
    query.push("toBlock", filter.to_block_tag().to_string());

    for (position, topic) in filter.present_topics() {
        query.push(format!("topic{position}"), topic.to_query_value());
    }

    for i in 0..MAX_TOPICS {
        for j in (i + 1)..MAX_TOPICS {
            if filter.topic(i).is_some() && filter.topic(j).is_some() {
                query.push(format!("topic{i}_{j}_opr"), "and");
            }
        }
    }

    query.push("offset", PAGE_SIZE.to_string());
    query.push("page", page.to_string());

    if let Some(key) = api_key {
        query.push(API_KEY_PARAM, key);
    }

    query
}
