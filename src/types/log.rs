// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider-shaped and canonical log records.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A log record exactly as the explorer returns it.
///
/// Numeric fields are hex strings. Extra provider fields (`gasPrice`,
/// `gasUsed`, `blockHash`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    pub address: String,
    #[serde(default)]
    pub topics: Vec<Option<String>>,
    #[serde(default)]
    pub data: String,
    pub block_number: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    pub log_index: String,
    pub transaction_hash: String,
    pub transaction_index: String,
}

/// Canonical event log.
///
/// `data` and `transaction_hash` are passed through from the explorer
/// unmodified; `topics` never contains empty entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Emitting contract
    pub address: Address,
    /// Indexed topics in order, empties removed
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed data
    pub data: String,
    pub transaction_hash: String,
    pub block_number: u64,
    pub transaction_index: u64,
    pub log_index: u64,
    /// Block timestamp in Unix seconds
    pub timestamp: u64,
}

impl Log {
    /// EIP-55 checksummed address string.
    pub fn checksum_address(&self) -> String {
        self.address.to_checksum(None)
    }

    /// Block timestamp as a UTC datetime, if it is in range.
    pub fn block_time(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.timestamp).ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}
