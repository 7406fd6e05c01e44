// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Normalization of explorer log records into [`Log`].

use std::str::FromStr;

use alloy_primitives::Address;

use crate::errors::NormalizeError;
use crate::types::{Log, RawLog};

/// Parse an explorer hex quantity.
///
/// The `0x` prefix is optional. Explorers emit a bare `"0x"` for zero
/// (typically `logIndex` and `transactionIndex` of the first entry), which
/// decodes to 0.
pub fn parse_hex_u64(field: &'static str, value: &str) -> Result<u64, NormalizeError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    if digits.is_empty() {
        return if value.is_empty() {
            Err(NormalizeError::invalid_hex(field, value))
        } else {
            Ok(0)
        };
    }

    u64::from_str_radix(digits, 16).map_err(|_| NormalizeError::invalid_hex(field, value))
}

/// Convert one explorer record into a canonical [`Log`].
pub fn normalize_log(raw: RawLog) -> Result<Log, NormalizeError> {
    let address =
        Address::from_str(raw.address.trim()).map_err(|e| NormalizeError::InvalidAddress {
            value: raw.address.clone(),
            details: e.to_string(),
        })?;

    let topics = raw
        .topics
        .into_iter()
        .flatten()
        .filter(|topic| !topic.is_empty())
        .collect();

    Ok(Log {
        address,
        topics,
        data: raw.data,
        transaction_hash: raw.transaction_hash,
        block_number: parse_hex_u64("blockNumber", &raw.block_number)?,
        transaction_index: parse_hex_u64("transactionIndex", &raw.transaction_index)?,
        log_index: parse_hex_u64("logIndex", &raw.log_index)?,
        timestamp: parse_hex_u64("timeStamp", &raw.timestamp)?,
    })
}

/// Normalize a whole page. The first bad record aborts the page.
pub fn normalize_logs(records: Vec<RawLog>) -> Result<Vec<Log>, NormalizeError> {
    records.into_iter().map(normalize_log).collect()
}
