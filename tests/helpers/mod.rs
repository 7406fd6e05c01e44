// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for explorer-logs integration tests
//!
//! Provides a scripted explorer transport and response builders so the
//! fetcher can be exercised without network access.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use explorer_logs::transport::{ExplorerRequest, HttpResponse};
use explorer_logs::{
    ChainEndpoint, FetcherConfigBuilder, LogFetcher, RetryPolicy, TransportError,
};
use serde_json::{json, Value};
use tokio::time::Instant;

pub const CHAIN_ID: u64 = 1;
pub const PAGE_SIZE: usize = 1000;

pub type Reply = Result<HttpResponse, TransportError>;

/// Route library logs to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Scripted explorer transport
///
/// Replies are served in order; once the script runs out, the fallback body is
/// returned (or a 500 if none is set). Every request is recorded together with
/// the instant it reached the transport.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockExplorer::new()
///     .reply_body(rate_limited_body())
///     .reply_body(records_body(3, 100, 0));
///
/// let fetcher = fetcher(mock.clone(), RetryPolicy::default(), None);
/// ```
#[derive(Clone, Default)]
pub struct MockExplorer {
    inner: Arc<Mutex<Script>>,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    fallback: Option<String>,
    requests: Vec<(Instant, ExplorerRequest)>,
}

impl MockExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transport-level reply
    pub fn reply(self, reply: Reply) -> Self {
        self.inner.lock().unwrap().replies.push_back(reply);
        self
    }

    /// Queue a 200 response with `body`
    pub fn reply_body(self, body: impl Into<String>) -> Self {
        self.reply(Ok(HttpResponse::ok(body)))
    }

    /// Body returned once the script is exhausted
    pub fn with_fallback(self, body: impl Into<String>) -> Self {
        self.inner.lock().unwrap().fallback = Some(body.into());
        self
    }

    /// All requests seen so far, in arrival order
    pub fn requests(&self) -> Vec<ExplorerRequest> {
        let script = self.inner.lock().unwrap();
        script.requests.iter().map(|(_, r)| r.clone()).collect()
    }

    /// Arrival instants of all requests
    pub fn request_times(&self) -> Vec<Instant> {
        let script = self.inner.lock().unwrap();
        script.requests.iter().map(|(t, _)| *t).collect()
    }

    /// `page` parameter of every request, in arrival order
    pub fn pages(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.query.get("page").unwrap_or_default().to_string())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }
}

impl tower::Service<ExplorerRequest> for MockExplorer {
    type Response = HttpResponse;
    type Error = TransportError;
    type Future = std::future::Ready<Reply>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: ExplorerRequest) -> Self::Future {
        let mut script = self.inner.lock().unwrap();
        script.requests.push((Instant::now(), request));
        let reply = match script.replies.pop_front() {
            Some(reply) => reply,
            None => match &script.fallback {
                Some(body) => Ok(HttpResponse::ok(body.clone())),
                None => Err(TransportError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "mock script exhausted".to_string(),
                }),
            },
        };
        std::future::ready(reply)
    }
}

/// Build a fetcher for [`CHAIN_ID`] over `mock`
pub fn fetcher(
    mock: MockExplorer,
    retry_policy: RetryPolicy,
    max_pages: Option<u32>,
) -> LogFetcher<MockExplorer> {
    let mut builder = FetcherConfigBuilder::new()
        .endpoint(endpoint())
        .retry_policy(retry_policy);
    if let Some(max_pages) = max_pages {
        builder = builder.max_pages(max_pages);
    }
    LogFetcher::with_transport(builder.build().unwrap(), mock).unwrap()
}

pub fn endpoint() -> ChainEndpoint {
    ChainEndpoint::new(
        CHAIN_ID,
        "ethereum",
        "https://api.etherscan.io/api".parse().unwrap(),
    )
}

/// One provider-shaped record; `log_index` also seeds the transaction hash
pub fn raw_record(block: u64, log_index: u64) -> Value {
    json!({
        "address": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            "",
            null,
        ],
        "data": "0x",
        "blockNumber": format!("0x{block:x}"),
        "timeStamp": "0x65a0f0c0",
        "gasPrice": "0x3b9aca00",
        "gasUsed": "0x5208",
        "logIndex": format!("0x{log_index:x}"),
        "transactionHash": format!("0x{log_index:064x}"),
        "transactionIndex": "0x",
    })
}

/// A success body with `count` records whose log indices start at `first_index`
pub fn records_body(count: usize, block: u64, first_index: u64) -> String {
    let records: Vec<Value> = (0..count as u64)
        .map(|i| raw_record(block, first_index + i))
        .collect();
    let status = if records.is_empty() { "0" } else { "1" };
    json!({ "status": status, "message": "OK", "result": records }).to_string()
}

/// A body holding exactly one full page
pub fn full_page_body(block: u64, first_index: u64) -> String {
    records_body(PAGE_SIZE, block, first_index)
}

/// A body whose `result` is a message string
pub fn message_body(message: &str) -> String {
    json!({ "status": "0", "message": "NOTOK", "result": message }).to_string()
}

pub fn rate_limited_body() -> String {
    message_body("Max rate limit reached")
}

pub fn timeout_body() -> String {
    message_body("Query Timeout occured")
}
