//! In-memory collaborators for monitor unit tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::alerting::{Alert, AlertError, Notifier};
use crate::blockchain::types::block_at;
use crate::blockchain::{Block, BlockHeight, BlockSource, ChainError, ChainResult, FetchOutcome};

/// A chain whose blocks all carry the same signer unless unsigned.
#[derive(Default)]
pub struct MockChain {
    blocks: Mutex<BTreeMap<BlockHeight, Block>>,
    fail_at: Mutex<HashSet<BlockHeight>>,
    requested: Mutex<Vec<BlockHeight>>,
    latest_calls: AtomicUsize,
    signer: String,
}

impl MockChain {
    pub fn signed_range(heights: RangeInclusive<BlockHeight>, signer: &str) -> Self {
        let chain = Self {
            signer: signer.to_string(),
            ..Default::default()
        };
        chain.extend_to(*heights.end());
        chain.blocks.lock().unwrap().retain(|h, _| heights.contains(h));
        chain
    }

    /// Produce signed blocks up to and including `tip`.
    pub fn extend_to(&self, tip: BlockHeight) {
        let mut blocks = self.blocks.lock().unwrap();
        let next = blocks.keys().next_back().map_or(1, |h| h + 1);
        for height in next..=tip {
            blocks.insert(height, block_at(height, &[self.signer.as_str(), "OTHER"]));
        }
    }

    /// Drop the signer from the commit at `height`.
    pub fn unsign(&self, height: BlockHeight) {
        self.blocks
            .lock()
            .unwrap()
            .insert(height, block_at(height, &["OTHER"]));
    }

    /// Make fetches of `height` time out.
    pub fn fail_at(&self, height: BlockHeight) {
        self.fail_at.lock().unwrap().insert(height);
    }

    pub fn heal(&self) {
        self.fail_at.lock().unwrap().clear();
    }

    pub fn requested(&self) -> Vec<BlockHeight> {
        self.requested.lock().unwrap().clone()
    }

    pub fn latest_calls(&self) -> usize {
        self.latest_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlockSource for MockChain {
    async fn fetch_latest(&self) -> ChainResult<Block> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        self.blocks
            .lock()
            .unwrap()
            .values()
            .next_back()
            .cloned()
            .ok_or_else(|| ChainError::Decode("empty chain".into()))
    }

    async fn fetch_by_height(&self, height: BlockHeight) -> ChainResult<FetchOutcome> {
        self.requested.lock().unwrap().push(height);
        if self.fail_at.lock().unwrap().contains(&height) {
            return Err(ChainError::Timeout(10));
        }
        Ok(match self.blocks.lock().unwrap().get(&height) {
            Some(block) => FetchOutcome::Found(Box::new(block.clone())),
            None => FetchOutcome::NotFound,
        })
    }
}

/// Records alerts; can be told to fail.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Alert>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Alert> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_alert(&self, alert: &Alert) -> Result<(), AlertError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AlertError::Rejected {
                status: 503,
                body: "unavailable".into(),
            });
        }
        self.sent.lock().unwrap().push(*alert);
        Ok(())
    }
}
