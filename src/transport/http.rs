// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport for explorer requests.
//!
//! The fetcher talks to any `tower::Service<ExplorerRequest, Response =
//! HttpResponse, Error = TransportError>`. [`ReqwestTransport`] is the
//! production implementation; tests use `tower::service_fn`.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use reqwest::StatusCode;
use url::Url;

use crate::errors::TransportError;
use crate::events::query::LogQuery;

/// One GET request against an explorer API.
#[derive(Debug, Clone)]
pub struct ExplorerRequest {
    /// Explorer API base URL, e.g. `https://api.etherscan.io/api`
    pub url: Url,
    /// Query parameters
    pub query: LogQuery,
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }
}

/// Explorer transport backed by a shared `reqwest::Client`.
///
/// HTTP 429 maps to [`TransportError::TooManyRequests`] and any other
/// non-success status to [`TransportError::Status`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client (shared connection pool, custom TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(client: reqwest::Client, request: ExplorerRequest) -> Result<HttpResponse, TransportError> {
        let response = client
            .get(request.url)
            .query(request.query.pairs())
            .send()
            .await?;

        let status = response.status();
        // Don't read throttled bodies, they are usually HTML.
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::TooManyRequests);
        }

        let body = response.text().await?;
        match TransportError::from_status(status, &body) {
            Some(err) => Err(err),
            None => Ok(HttpResponse { status, body }),
        }
    }
}

impl tower::Service<ExplorerRequest> for ReqwestTransport {
    type Response = HttpResponse;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: ExplorerRequest) -> Self::Future {
        let client = self.client.clone();
        Box::pin(Self::send(client, request))
    }
}
