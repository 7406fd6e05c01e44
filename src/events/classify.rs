// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Classification of explorer `getLogs` responses
//!
//! Explorers signal success, throttling, oversized queries and plain errors
//! through the same `result` field, without structured error codes. This
//! module is the only place that looks at message text; everything
//! downstream works with [`Classification`].
//!
//! Rules, in order:
//!
//! 1. `result` is an array of exactly [`PAGE_SIZE`] items: [`Classification::QueryTooLarge`]
//!    (a full page may have more behind it). Items are not decoded here.
//! 2. `result` is a string with a rate-limit marker: [`Classification::RateLimited`]
//! 3. `result` is a string with a query-timeout marker: [`Classification::QueryTooLarge`]
//! 4. `result` is any other string: [`Classification::ProviderError`]
//! 5. `result` is missing or not an array, or records have the wrong shape:
//!    [`Classification::Malformed`]
//! 6. otherwise: [`Classification::Success`]
//!
//! Only `result` decides the outcome. `status` and `message` are kept as
//! loose JSON because providers disagree on their types.

use serde::Deserialize;
use serde_json::Value;

use crate::config::constants::{markers, PAGE_SIZE};
use crate::types::RawLog;

/// Outcome of one explorer response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A complete result set (fewer than a full page).
    Success(Vec<RawLog>),
    /// The explorer asked us to slow down.
    RateLimited,
    /// The query matched too much for one response.
    QueryTooLarge {
        /// Full page or provider timeout
        cause: Oversize,
    },
    /// Any other message in `result`, verbatim.
    ProviderError(String),
    /// The body did not have the expected shape.
    Malformed(String),
}

/// Why a response was classified as [`Classification::QueryTooLarge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Oversize {
    /// Exactly one page of items, still raw JSON. Decode with
    /// [`decode_records`] only when the page is actually consumed.
    FullPage(Vec<Value>),
    /// The provider gave up evaluating the query.
    Timeout,
}

/// Envelope of an explorer API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerResponse {
    /// Usually `"1"` on success and `"0"` otherwise; some providers send a number
    #[serde(default)]
    pub status: Option<Value>,
    /// Short status text
    #[serde(default)]
    pub message: Option<Value>,
    /// Records array or an error string
    #[serde(default)]
    pub result: Value,
}

/// Classify a raw HTTP body. Bodies that are not JSON are [`Classification::Malformed`].
pub fn classify_body(body: &str) -> Classification {
    match serde_json::from_str::<ExplorerResponse>(body) {
        Ok(response) => classify_response(response),
        Err(e) => Classification::Malformed(format!("response is not a JSON object: {e}")),
    }
}

/// Classify a parsed explorer response.
pub fn classify_response(response: ExplorerResponse) -> Classification {
    match response.result {
        Value::Array(items) if items.len() == PAGE_SIZE => Classification::QueryTooLarge {
            cause: Oversize::FullPage(items),
        },
        Value::Array(items) => match decode_records(items) {
            Ok(records) => Classification::Success(records),
            Err(details) => Classification::Malformed(details),
        },
        Value::String(message) => classify_message(message),
        Value::Null => Classification::Malformed(match response.message {
            Some(Value::String(m)) => format!("missing result (message: {m})"),
            Some(other) if !other.is_null() => format!("missing result (message: {other})"),
            _ => "missing result".to_string(),
        }),
        other => Classification::Malformed(format!("unexpected result type: {}", kind(&other))),
    }
}

/// Decode raw `result` items into [`RawLog`]s, naming the first bad item.
pub fn decode_records(items: Vec<Value>) -> Result<Vec<RawLog>, String> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).map_err(|e| format!("record {i} has unexpected shape: {e}"))
        })
        .collect()
}

fn classify_message(message: String) -> Classification {
    let lowered = message.to_lowercase();
    if markers::RATE_LIMIT.iter().any(|m| lowered.contains(m)) {
        Classification::RateLimited
    } else if markers::QUERY_TIMEOUT.iter().any(|m| lowered.contains(m)) {
        Classification::QueryTooLarge {
            cause: Oversize::Timeout,
        }
    } else {
        Classification::ProviderError(message)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
