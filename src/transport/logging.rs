// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for explorer requests.
//!
//! Wraps each request in a tracing span and records timing, status and
//! failures. API keys are never logged.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::time::Instant;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument, Span};

use super::http::{ExplorerRequest, HttpResponse};
use crate::errors::TransportError;
use crate::spans;

/// A Tower layer that adds tracing to explorer requests.
///
/// # Example
///
/// ```rust,ignore
/// use explorer_logs::transport::{LoggingLayer, ReqwestTransport};
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(LoggingLayer::new("ethereum"))
///     .service(transport);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoggingLayer {
    /// Chain identifier attached to every span
    chain: String,
    /// Whether to log response bodies (can be verbose)
    log_responses: bool,
}

impl LoggingLayer {
    /// Creates a logging layer for one chain. Only timing and errors are logged.
    pub fn new(chain: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            log_responses: false,
        }
    }

    /// Enables logging of response bodies at trace level.
    ///
    /// Warning: a full page is about a megabyte of JSON.
    pub fn with_response_logging(mut self) -> Self {
        self.log_responses = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            chain: self.chain.clone(),
            log_responses: self.log_responses,
        }
    }
}

/// A Tower service that logs explorer requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    chain: String,
    log_responses: bool,
}

impl<S> tower::Service<ExplorerRequest> for LoggingService<S>
where
    S: tower::Service<ExplorerRequest, Response = HttpResponse, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = HttpResponse;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: ExplorerRequest) -> Self::Future {
        let log_responses = self.log_responses;
        let clone = self.service.clone();
        let mut service = std::mem::replace(&mut self.service, clone);

        let page = request.query.page().unwrap_or_default();
        let span = spans::explorer_request(&self.chain, request.url.as_str(), page);

        Box::pin(
            async move {
                let start = Instant::now();
                trace!(query = ?request.query, "Explorer request");

                let result = service.call(request).await;
                let duration = start.elapsed();
                Span::current().record("duration_ms", duration.as_millis() as u64);

                match &result {
                    Ok(response) => {
                        if log_responses {
                            trace!(
                                status = %response.status,
                                body = %response.body,
                                duration_ms = %duration.as_millis(),
                                "Explorer response"
                            );
                        } else {
                            debug!(
                                status = %response.status,
                                bytes = response.body.len(),
                                duration_ms = %duration.as_millis(),
                                "Explorer response"
                            );
                        }
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            duration_ms = %duration.as_millis(),
                            "Explorer request failed"
                        );
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
