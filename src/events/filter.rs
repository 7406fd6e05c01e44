// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Log filters for explorer queries
//!
//! A [`LogFilter`] is a block range plus up to four positional topic
//! constraints. Slots are positional: `topic1` can be constrained while
//! `topic0` is left open.
//!
//! # Examples
//!
//! ```rust
//! use explorer_logs::{LogFilter, Topic};
//! use alloy_primitives::{address, b256};
//!
//! let transfer = b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");
//! let router = address!("1111111254eeb25477b68fb85ed929f73a960582");
//!
//! let filter = LogFilter::new()
//!     .from_block(19_000_000)
//!     .to_block(19_000_100)
//!     .topic0(transfer)
//!     .topic2(router);
//!
//! assert!(!filter.is_single_block());
//! ```

use std::fmt;

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::config::constants::LATEST_BLOCK_TAG;
use crate::errors::ConfigError;

/// Maximum number of topic positions explorers accept.
pub const MAX_TOPICS: usize = 4;

/// A block bound as sent to the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    /// A concrete block number
    Number(u64),
    /// The newest block the explorer knows about
    Latest,
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Number(n) => write!(f, "{n}"),
            BlockTag::Latest => f.write_str(LATEST_BLOCK_TAG),
        }
    }
}

/// One topic constraint.
///
/// Raw strings are lowercased when the query is built; hashes and addresses
/// are rendered as lowercase 32-byte words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// Literal topic text, passed through after lowercasing
    Raw(String),
    /// A 32-byte topic value (event signature hash or indexed word)
    Hash(B256),
    /// An indexed address parameter, left-padded to 32 bytes
    Address(Address),
}

impl Topic {
    /// Render the topic as the explorer expects it.
    pub fn to_query_value(&self) -> String {
        match self {
            Topic::Raw(raw) => raw.to_lowercase(),
            Topic::Hash(hash) => format!("{hash:#x}"),
            Topic::Address(address) => format!("{:#x}", address.into_word()),
        }
    }
}

impl From<B256> for Topic {
    fn from(value: B256) -> Self {
        Topic::Hash(value)
    }
}

impl From<Address> for Topic {
    fn from(value: Address) -> Self {
        Topic::Address(value)
    }
}

impl From<&str> for Topic {
    fn from(value: &str) -> Self {
        Topic::Raw(value.to_string())
    }
}

impl From<String> for Topic {
    fn from(value: String) -> Self {
        Topic::Raw(value)
    }
}

/// Block range and topic constraints for a log query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilter {
    from_block: Option<u64>,
    to_block: Option<u64>,
    topics: [Option<Topic>; MAX_TOPICS],
}

impl LogFilter {
    /// Create an open filter: block 0 to latest, no topics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from positional topic slots.
    ///
    /// `None` entries leave that position open. More than four slots is an error.
    ///
    /// ```rust
    /// use explorer_logs::{LogFilter, Topic};
    ///
    /// let filter = LogFilter::with_topics(vec![None, Some(Topic::from("0xABC"))]).unwrap();
    /// assert_eq!(filter.topic(1), Some(&Topic::from("0xABC")));
    /// assert_eq!(filter.topic(0), None);
    ///
    /// assert!(LogFilter::with_topics(vec![None; 5]).is_err());
    /// ```
    pub fn with_topics(topics: Vec<Option<Topic>>) -> Result<Self, ConfigError> {
        if topics.len() > MAX_TOPICS {
            return Err(ConfigError::TooManyTopics {
                count: topics.len(),
            });
        }
        let mut filter = Self::new();
        for (slot, topic) in filter.topics.iter_mut().zip(topics) {
            *slot = topic;
        }
        Ok(filter)
    }

    /// Set the first block (inclusive).
    pub fn from_block(mut self, block: u64) -> Self {
        self.from_block = Some(block);
        self
    }

    /// Set the last block (inclusive).
    pub fn to_block(mut self, block: u64) -> Self {
        self.to_block = Some(block);
        self
    }

    /// Restrict the query to exactly one block.
    pub fn at_block(self, block: u64) -> Self {
        self.from_block(block).to_block(block)
    }

    /// The topic constrained at `position`, if any. Positions past topic3 are `None`.
    pub fn topic(&self, position: usize) -> Option<&Topic> {
        self.topics.get(position).and_then(Option::as_ref)
    }

    /// Set topic0, usually the event signature hash.
    pub fn topic0(self, topic: impl Into<Topic>) -> Self {
        self.set_topic(0, topic.into())
    }

    /// Set topic1, the first indexed parameter.
    pub fn topic1(self, topic: impl Into<Topic>) -> Self {
        self.set_topic(1, topic.into())
    }

    /// Set topic2.
    pub fn topic2(self, topic: impl Into<Topic>) -> Self {
        self.set_topic(2, topic.into())
    }

    /// Set topic3.
    pub fn topic3(self, topic: impl Into<Topic>) -> Self {
        self.set_topic(3, topic.into())
    }

    fn set_topic(mut self, position: usize, topic: Topic) -> Self {
        self.topics[position] = Some(topic);
        self
    }

    /// First block with the default (0) applied.
    pub fn from_block_tag(&self) -> BlockTag {
        BlockTag::Number(self.from_block.unwrap_or(0))
    }

    /// Last block with the default (`latest`) applied.
    pub fn to_block_tag(&self) -> BlockTag {
        self.to_block.map_or(BlockTag::Latest, BlockTag::Number)
    }

    /// Whether the range covers exactly one block, so it cannot be split further.
    pub fn is_single_block(&self) -> bool {
        self.from_block_tag() == self.to_block_tag()
    }

    /// Iterate over the constrained positions and their topics.
    pub fn present_topics(&self) -> impl Iterator<Item = (usize, &Topic)> {
        self.topics
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_ref().map(|t| (i, t)))
    }
}
