// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors for turning provider records into canonical logs.

/// A provider log record that cannot be normalized.
///
/// Normalization is all-or-nothing per page: one bad record aborts the page.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The emitting contract address is not a 20-byte hex value.
    #[error("invalid log address {value:?}: {details}")]
    InvalidAddress {
        /// Address as returned by the explorer
        value: String,
        /// Parser message
        details: String,
    },

    /// A numeric field is not valid hexadecimal.
    #[error("invalid hex in field {field}: {value:?}")]
    InvalidHex {
        /// Provider field name (e.g. `blockNumber`)
        field: &'static str,
        /// Raw value
        value: String,
    },
}

impl NormalizeError {
    /// Create an `InvalidHex` error for a field.
    pub fn invalid_hex(field: &'static str, value: impl Into<String>) -> Self {
        NormalizeError::InvalidHex {
            field,
            value: value.into(),
        }
    }
}
