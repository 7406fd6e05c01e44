// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Retry policy for rate-limited explorer requests.
//!
//! Applies to the retryable signals: HTTP 429, the in-body rate-limit
//! message, and a query timeout on a single-block query (which cannot be
//! split further, so the same page is asked for again). The default policy
//! retries forever without delay, relying on the per-endpoint
//! [`RateLimiter`](super::RateLimiter) to space requests out. A block whose
//! query times out on every attempt therefore stalls the call until the
//! policy is bounded. Bound it when a stuck provider must not stall the caller:
//!
//! ```rust
//! use explorer_logs::RetryPolicy;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::builder()
//!     .max_attempts(8)
//!     .exponential_backoff(Duration::from_millis(200), Duration::from_secs(10))
//!     .build();
//!
//! assert_eq!(policy.max_attempts(), Some(8));
//! assert_eq!(policy.delay_for(0), Duration::from_millis(200));
//! assert_eq!(policy.delay_for(1), Duration::from_millis(400));
//! ```

use std::time::Duration;

/// Delay between retries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately.
    #[default]
    None,
    /// `delay = min(base_delay * 2^retry, max_delay)`
    Exponential {
        base_delay: Duration,
        max_delay: Duration,
    },
}

/// How rate-limited requests are retried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request including the first; `None` retries forever.
    max_attempts: Option<u32>,
    backoff: Backoff,
}

impl RetryPolicy {
    /// Retry forever, immediately. This is the default.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// At most `max_attempts` attempts, no delay.
    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts.max(1)),
            backoff: Backoff::None,
        }
    }

    /// Creates a builder starting from the default policy.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Attempt cap, if any.
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Configured backoff.
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Whether another attempt is allowed after `attempts` have been made.
    pub fn allows_another(&self, attempts: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempts < max)
    }

    /// Delay before retry number `retry` (0-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        match self.backoff {
            Backoff::None => Duration::ZERO,
            Backoff::Exponential {
                base_delay,
                max_delay,
            } => calculate_backoff(retry, base_delay, max_delay),
        }
    }
}

/// Builder for [`RetryPolicy`].
#[derive(Clone, Debug, Default)]
pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl RetryPolicyBuilder {
    /// Cap the total number of attempts (values below 1 are treated as 1).
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.policy.max_attempts = Some(max_attempts.max(1));
        self
    }

    /// Remove the attempt cap.
    pub fn unbounded(mut self) -> Self {
        self.policy.max_attempts = None;
        self
    }

    /// Use exponential backoff between retries.
    pub fn exponential_backoff(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.policy.backoff = Backoff::Exponential {
            base_delay,
            max_delay,
        };
        self
    }

    /// Builds the configured [`RetryPolicy`].
    pub fn build(self) -> RetryPolicy {
        self.policy
    }
}

/// Uses exponential backoff: `min(base_delay * 2^attempt, max_delay)`
fn calculate_backoff(attempt: u32, base_delay: Duration, max_delay: Duration) -> Duration {
    let multiplier = 2u64.saturating_pow(attempt);
    let delay_ms = base_delay.as_millis().saturating_mul(multiplier as u128);
    let capped_delay_ms = delay_ms.min(max_delay.as_millis()) as u64;
    Duration::from_millis(capped_delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded_without_delay() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), None);
        assert!(policy.allows_another(u32::MAX - 1));
        assert!(policy.allows_another(u32::MAX));
        assert_eq!(policy.delay_for(10), Duration::ZERO);
    }

    #[test]
    fn test_bounded() {
        let policy = RetryPolicy::bounded(3);
        assert!(policy.allows_another(1));
        assert!(policy.allows_another(2));
        assert!(!policy.allows_another(3));
        assert_eq!(RetryPolicy::bounded(0).max_attempts(), Some(1));
    }

    #[test]
    fn test_calculate_backoff() {
        let base = Duration::from_millis(100);
        let max = Duration::from_secs(10);

        assert_eq!(calculate_backoff(0, base, max), Duration::from_millis(100));
        assert_eq!(calculate_backoff(1, base, max), Duration::from_millis(200));
        assert_eq!(calculate_backoff(2, base, max), Duration::from_millis(400));
        assert_eq!(calculate_backoff(3, base, max), Duration::from_millis(800));
    }

    #[test]
    fn test_calculate_backoff_capped() {
        let base = Duration::from_millis(100);
        let max = Duration::from_millis(500);

        assert_eq!(calculate_backoff(3, base, max), Duration::from_millis(500));
        assert_eq!(calculate_backoff(10, base, max), Duration::from_millis(500));
    }

    #[test]
    fn test_calculate_backoff_overflow_protection() {
        let base = Duration::from_secs(1);
        let max = Duration::from_secs(60);
        assert_eq!(calculate_backoff(50, base, max), Duration::from_secs(60));
        assert_eq!(calculate_backoff(200, base, max), Duration::from_secs(60));
    }

    #[test]
    fn test_builder() {
        let policy = RetryPolicy::builder()
            .max_attempts(5)
            .exponential_backoff(Duration::from_millis(50), Duration::from_secs(1))
            .build();
        assert_eq!(policy.max_attempts(), Some(5));
        assert_eq!(
            policy.backoff(),
            Backoff::Exponential {
                base_delay: Duration::from_millis(50),
                max_delay: Duration::from_secs(1),
            }
        );

        let policy = RetryPolicy::builder().max_attempts(2).unbounded().build();
        assert_eq!(policy.max_attempts(), None);
    }
}
