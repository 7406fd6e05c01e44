// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Sliding-window rate limiting for explorer endpoints.
//!
//! [`RateLimiter`] admits at most `requests` operations per rolling `window`,
//! in submission order. [`RateLimitLayer`] applies a shared limiter to a
//! Tower service so that every `call` waits for admission first.

use std::{
    collections::VecDeque,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use tokio::{sync::Mutex, time::Instant};
use tower::Layer;
use tracing::trace;

/// Per-endpoint admission control.
///
/// Keeps the start instants of the last `requests` admissions. A new
/// operation is admitted once fewer than `requests` admissions fall inside
/// the trailing `window`, so no window of that length ever contains more
/// than `requests` starts.
///
/// Waiters queue on a fair async mutex that is held for the whole admission
/// decision (including the sleep until a slot frees up). Admission is
/// therefore strictly first-come-first-served.
///
/// The wait queue is unbounded: every pending submitter holds one parked
/// future until admitted. Callers that need backpressure should bound their
/// own concurrency.
///
/// # Example
///
/// ```rust
/// use explorer_logs::transport::RateLimiter;
/// use std::time::Duration;
///
/// # async fn demo() {
/// let limiter = RateLimiter::new(5, Duration::from_secs(1));
/// let answer = limiter.submit(async { 40 + 2 }).await;
/// assert_eq!(answer, 42);
/// # }
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    requests: u32,
    window: Duration,
    admitted: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter admitting `requests` operations per `window`.
    ///
    /// `requests` is clamped to at least 1; endpoint configuration rejects 0
    /// before it gets here.
    pub fn new(requests: u32, window: Duration) -> Self {
        let requests = requests.max(1);
        Self {
            requests,
            window,
            admitted: Mutex::new(VecDeque::with_capacity(requests as usize)),
        }
    }

    /// Creates a limiter from requests per second.
    pub fn per_second(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(1))
    }

    /// Maximum admissions per window.
    pub fn requests_per_window(&self) -> u32 {
        self.requests
    }

    /// Length of the rolling window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Waits until this caller may start one operation.
    pub async fn acquire(&self) {
        let mut admitted = self.admitted.lock().await;
        loop {
            let now = Instant::now();
            while admitted
                .front()
                .is_some_and(|start| now.duration_since(*start) >= self.window)
            {
                admitted.pop_front();
            }

            if admitted.len() < self.requests as usize {
                admitted.push_back(now);
                return;
            }

            // Full window: the oldest admission decides when a slot frees up.
            if let Some(oldest) = admitted.front().copied() {
                let wait = self.window.saturating_sub(now.duration_since(oldest));
                trace!(wait_ms = wait.as_millis() as u64, "Rate limit window full, waiting");
                tokio::time::sleep(wait).await;
            }
        }
    }

    /// Runs `operation` once admitted and returns its output unchanged.
    ///
    /// The limiter does not inspect, retry or swallow the result.
    pub async fn submit<F, T>(&self, operation: F) -> T
    where
        F: Future<Output = T>,
    {
        self.acquire().await;
        operation.await
    }
}

/// A Tower layer that admits every request through a shared [`RateLimiter`].
///
/// # Example
///
/// ```rust,ignore
/// use explorer_logs::transport::{RateLimitLayer, ReqwestTransport};
/// use tower::ServiceBuilder;
/// use std::time::Duration;
///
/// // Five explorer calls per second
/// let service = ServiceBuilder::new()
///     .layer(RateLimitLayer::new(5, Duration::from_secs(1)))
///     .service(ReqwestTransport::new(Duration::from_secs(30))?);
/// ```
#[derive(Clone, Debug)]
pub struct RateLimitLayer {
    limiter: Arc<RateLimiter>,
}

impl RateLimitLayer {
    /// Creates a layer with its own limiter.
    pub fn new(requests: u32, period: Duration) -> Self {
        Self::from_limiter(Arc::new(RateLimiter::new(requests, period)))
    }

    /// Creates a layer sharing an existing limiter.
    pub fn from_limiter(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }

    /// The limiter this layer admits through.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RateLimitService {
            service,
            limiter: self.limiter.clone(),
        }
    }
}

/// A Tower service that waits for rate-limit admission before each call.
#[derive(Clone, Debug)]
pub struct RateLimitService<S> {
    service: S,
    limiter: Arc<RateLimiter>,
}

impl<S> RateLimitService<S> {
    /// The limiter shared by clones of this service.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}

impl<S, Request> tower::Service<Request> for RateLimitService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let limiter = self.limiter.clone();
        // Take the service that was driven to readiness, leave a clone behind.
        let clone = self.service.clone();
        let mut service = std::mem::replace(&mut self.service, clone);

        Box::pin(async move {
            limiter.acquire().await;
            service.call(request).await
        })
    }
}
