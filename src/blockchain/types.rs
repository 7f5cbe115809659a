//! Block data model and chain error definitions.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// Re-export ChainConfig from config module to avoid duplication
pub use crate::config::schema::ChainConfig;

/// Block height on the monitored chain.
pub type BlockHeight = u64;

/// A block as returned by `GET /blocks/{height}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Block {
    pub block_id: BlockId,
    pub block: BlockBody,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlockId {
    #[serde(default)]
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockBody {
    pub header: Header,
    pub last_commit: LastCommit,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Header {
    #[serde(default)]
    pub chain_id: String,
    #[serde(deserialize_with = "de_u64")]
    pub height: BlockHeight,
    #[serde(default)]
    pub time: Option<String>,
}

/// Signatures over the previous block, carried by this one.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LastCommit {
    #[serde(deserialize_with = "de_u64")]
    pub height: BlockHeight,
    #[serde(deserialize_with = "de_u64")]
    pub round: u64,
    #[serde(default)]
    pub block_id: BlockId,
    #[serde(default)]
    pub signatures: Vec<Option<CommitSig>>,
}

/// One validator's entry in a commit.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommitSig {
    #[serde(default)]
    pub block_id_flag: Option<u8>,
    #[serde(default)]
    pub validator_address: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

impl Block {
    pub fn height(&self) -> BlockHeight {
        self.block.header.height
    }

    pub fn hash(&self) -> &str {
        &self.block_id.hash
    }

    /// Whether `address` has an entry in this block's last commit.
    pub fn is_signed_by(&self, address: &str) -> bool {
        self.block
            .last_commit
            .signatures
            .iter()
            .flatten()
            .any(|sig| sig.validator_address.as_deref() == Some(address))
    }
}

/// Heights and rounds are encoded as decimal strings; accept bare numbers too.
fn de_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Result of looking up a block by height.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Found(Box<Block>),
    /// The chain has not produced this height yet.
    NotFound,
}

/// Errors that can occur while talking to the chain-data API.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Connection or protocol failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request did not complete in time.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Unexpected status code (anything but 2xx, or 404 on a height lookup).
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Body was not a block.
    #[error("failed to decode block: {0}")]
    Decode(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Build a block with the given signers, for tests.
#[cfg(test)]
pub(crate) fn block_at(height: BlockHeight, signers: &[&str]) -> Block {
    Block {
        block_id: BlockId {
            hash: format!("HASH{}", height),
        },
        block: BlockBody {
            header: Header {
                chain_id: "testchain-1".into(),
                height,
                time: None,
            },
            last_commit: LastCommit {
                height: height.saturating_sub(1),
                round: 0,
                block_id: BlockId::default(),
                signatures: signers
                    .iter()
                    .map(|addr| {
                        Some(CommitSig {
                            block_id_flag: Some(2),
                            validator_address: Some(addr.to_string()),
                            ..Default::default()
                        })
                    })
                    .collect(),
            },
        },
    }
}
