// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for rate limiting
//!
//! These tests validate the sliding-window guarantee of `RateLimiter` and
//! that the fetcher applies one limiter per chain.

mod helpers;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use explorer_logs::transport::RateLimiter;
use explorer_logs::{FetcherConfigBuilder, LogFetcher, LogFilter, RetryPolicy};
use helpers::*;
use proptest::prelude::*;
use tokio::time::Instant;

/// Assert no `window`-long interval contains more than `limit` of `times`.
fn assert_sliding_window(times: &[Instant], limit: usize, window: Duration) {
    let mut sorted = times.to_vec();
    sorted.sort();
    for pair in sorted.windows(limit + 1) {
        let spread = pair[limit] - pair[0];
        assert!(
            spread >= window,
            "{} admissions within {:?} (window {:?})",
            limit + 1,
            spread,
            window
        );
    }
}

/// Submit `total` operations concurrently and return their admission instants.
async fn admit_all(limiter: &RateLimiter, total: usize) -> Vec<Instant> {
    let admitted = Mutex::new(Vec::with_capacity(total));
    let tasks = (0..total).map(|_| {
        let admitted = &admitted;
        limiter.submit(async move { admitted.lock().unwrap().push(Instant::now()) })
    });
    futures::future::join_all(tasks).await;
    admitted.into_inner().unwrap()
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: K > N submissions never exceed N admissions per window, and all complete
    #[test]
    fn prop_sliding_window_never_exceeded(
        limit in 1u32..=6,
        extra in 1usize..=20,
        window_ms in 10u64..=2000,
    ) {
        let window = Duration::from_millis(window_ms);
        let total = limit as usize + extra;

        let times = paused_runtime().block_on(async {
            let limiter = RateLimiter::new(limit, window);
            admit_all(&limiter, total).await
        });

        prop_assert_eq!(times.len(), total);
        assert_sliding_window(&times, limit as usize, window);
    }

    /// Property: a burst within the limit is admitted without waiting
    #[test]
    fn prop_burst_within_limit_is_immediate(limit in 1u32..=50, window_ms in 1u64..=5000) {
        let elapsed = paused_runtime().block_on(async {
            let limiter = RateLimiter::new(limit, Duration::from_millis(window_ms));
            let start = Instant::now();
            admit_all(&limiter, limit as usize).await;
            start.elapsed()
        });

        prop_assert_eq!(elapsed, Duration::ZERO);
    }
}

#[tokio::test(start_paused = true)]
async fn test_total_duration_matches_window_count() {
    // 12 operations at 5 per second need three windows: t=0, t=1s, t=2s
    let limiter = RateLimiter::per_second(5);
    let start = Instant::now();
    let times = admit_all(&limiter, 12).await;

    assert_eq!(times.len(), 12);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(2));
    assert!(elapsed < Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_admission_is_first_come_first_served() {
    let limiter = Arc::new(RateLimiter::new(2, Duration::from_millis(500)));
    let order = Arc::new(Mutex::new(Vec::new()));

    let tasks = (0..7).map(|i| {
        let limiter = limiter.clone();
        let order = order.clone();
        async move { limiter.submit(async move { order.lock().unwrap().push(i) }).await }
    });
    futures::future::join_all(tasks).await;

    assert_eq!(*order.lock().unwrap(), (0..7).collect::<Vec<_>>());
}

#[tokio::test(start_paused = true)]
async fn test_fetcher_requests_respect_chain_limit() {
    let mock = MockExplorer::new().with_fallback(records_body(1, 100, 0));
    let fetcher = Arc::new(
        LogFetcher::with_transport(
            FetcherConfigBuilder::new()
                .endpoint(endpoint().with_rate_limit(3, Duration::from_secs(1)))
                .build()
                .unwrap(),
            mock.clone(),
        )
        .unwrap(),
    );

    let calls = (0..10u64).map(|block| {
        let fetcher = fetcher.clone();
        async move {
            fetcher
                .get_events(CHAIN_ID, &LogFilter::new().at_block(block))
                .await
        }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(mock.call_count(), 10);
    assert_sliding_window(&mock.request_times(), 3, Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_retries_pass_through_the_limiter() {
    // Unbounded retries without backoff are still spaced by the limiter.
    let mut mock = MockExplorer::new();
    for _ in 0..5 {
        mock = mock.reply_body(rate_limited_body());
    }
    let mock = mock.reply_body(records_body(1, 100, 0));
    let fetcher = LogFetcher::with_transport(
        FetcherConfigBuilder::new()
            .endpoint(endpoint().with_rate_limit(2, Duration::from_secs(1)))
            .retry_policy(RetryPolicy::unbounded())
            .build()
            .unwrap(),
        mock.clone(),
    )
    .unwrap();

    let start = Instant::now();
    let logs = fetcher
        .get_events(CHAIN_ID, &LogFilter::new())
        .await
        .unwrap();

    assert_eq!(logs.len(), 1);
    assert_eq!(mock.call_count(), 6);
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert_sliding_window(&mock.request_times(), 2, Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_chains_do_not_share_limiters() {
    let mock = MockExplorer::new().with_fallback(records_body(0, 0, 0));
    let base = explorer_logs::ChainEndpoint::new(
        8453,
        "base",
        "https://api.basescan.org/api".parse().unwrap(),
    )
    .with_rate_limit(1, Duration::from_secs(1));
    let fetcher = LogFetcher::with_transport(
        FetcherConfigBuilder::new()
            .endpoint(endpoint().with_rate_limit(1, Duration::from_secs(1)))
            .endpoint(base)
            .build()
            .unwrap(),
        mock.clone(),
    )
    .unwrap();

    let start = Instant::now();
    let filter = LogFilter::new();
    let (a, b) = tokio::join!(
        fetcher.get_events(CHAIN_ID, &filter),
        fetcher.get_events(8453, &filter)
    );

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(start.elapsed(), Duration::ZERO);
}
