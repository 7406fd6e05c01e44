// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport errors.
//!
//! These are produced by the HTTP service underneath the fetcher. Only
//! [`TransportError::TooManyRequests`] is retried; everything else is
//! surfaced to the caller.

use reqwest::StatusCode;

/// Failures of a single explorer HTTP request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP 429. The explorer throttled us at the transport level, distinct
    /// from the in-body rate-limit message.
    #[error("explorer responded with 429 Too Many Requests")]
    TooManyRequests,

    /// Any other non-success HTTP status.
    #[error("explorer responded with HTTP {status}")]
    Status {
        /// HTTP status code
        status: StatusCode,
        /// Response body, kept for debugging
        body: String,
    },

    /// Connection, TLS, timeout or body-read failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured API base URL could not be used.
    #[error("invalid explorer URL: {details}")]
    InvalidUrl {
        /// What was wrong with the URL
        details: String,
    },
}

impl TransportError {
    /// Whether this failure is the transport-level throttling signal.
    pub fn is_too_many_requests(&self) -> bool {
        matches!(self, TransportError::TooManyRequests)
    }

    /// Map an HTTP status and body to a transport failure, or `None` on success.
    pub fn from_status(status: StatusCode, body: &str) -> Option<Self> {
        if status == StatusCode::TOO_MANY_REQUESTS {
            Some(TransportError::TooManyRequests)
        } else if status.is_success() {
            None
        } else {
            Some(TransportError::Status {
                status,
                body: body.to_string(),
            })
        }
    }
}
