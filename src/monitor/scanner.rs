//! Block scan engine.
//!
//! Walks heights from the cursor up to the first height the node does not
//! have yet, checking each block's last commit for the watched validator.

use crate::blockchain::{BlockHeight, BlockSource, ChainResult, FetchOutcome};
use crate::config::StartPolicy;

/// Highest height already processed. Zero means nothing has been scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanCursor(BlockHeight);

impl ScanCursor {
    pub fn new(height: BlockHeight) -> Self {
        Self(height)
    }

    pub fn height(&self) -> BlockHeight {
        self.0
    }

    pub fn is_initialized(&self) -> bool {
        self.0 != 0
    }

    /// Move forward to `height`. Lower heights are ignored.
    pub fn advance_to(&mut self, height: BlockHeight) {
        if height > self.0 {
            self.0 = height;
        }
    }
}

/// Result of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The highest scanned height whose commit lacked the watched signature.
    Gap(BlockHeight),
    /// Every scanned block was signed; carries the last height scanned.
    Clean(BlockHeight),
}

/// Everything a scan learned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    /// Last height fetched, or the pre-scan cursor if nothing was fetched.
    pub last_height: BlockHeight,
    pub blocks_scanned: u64,
    /// Count of unsigned blocks, including those hidden behind a later gap.
    pub missed: u64,
}

/// Classifies blocks for one watched validator.
#[derive(Debug, Clone)]
pub struct Scanner {
    watch_address: String,
    start: StartPolicy,
}

impl Scanner {
    pub fn new(watch_address: impl Into<String>, start: StartPolicy) -> Self {
        Self {
            watch_address: watch_address.into(),
            start,
        }
    }

    pub fn watch_address(&self) -> &str {
        &self.watch_address
    }

    /// First height to request this cycle.
    async fn start_height<S>(&self, source: &S, cursor: ScanCursor) -> ChainResult<BlockHeight>
    where
        S: BlockSource + ?Sized,
    {
        if cursor.is_initialized() {
            return Ok(cursor.height() + 1);
        }

        match self.start {
            // Height 0 is the uninitialized sentinel, not genesis.
            StartPolicy::Tip | StartPolicy::Height(0) => {
                let latest = source.fetch_latest().await?;
                tracing::info!(height = latest.height(), "Cold start at chain tip");
                Ok(latest.height())
            }
            StartPolicy::Height(height) => {
                tracing::info!(height, "Cold start at configured height");
                Ok(height)
            }
        }
    }

    /// Scan every block after `cursor` that the node has produced.
    ///
    /// The cursor is not touched; the caller commits `last_height` once the
    /// scan succeeds, so a failure mid-way leaves it where it was.
    pub async fn scan<S>(&self, source: &S, cursor: ScanCursor) -> ChainResult<ScanReport>
    where
        S: BlockSource + ?Sized,
    {
        let mut height = self.start_height(source, cursor).await?;
        tracing::debug!(cursor = cursor.height(), start = height, "Scanning");

        let mut last_height = cursor.height();
        let mut missing_sig_height = None;
        let mut blocks_scanned = 0;
        let mut missed = 0;

        loop {
            let block = match source.fetch_by_height(height).await? {
                FetchOutcome::Found(block) => block,
                FetchOutcome::NotFound => break,
            };

            let signed = block.is_signed_by(&self.watch_address);
            tracing::debug!(height, hash = %block.hash(), signed, "Checked block");

            if !signed {
                tracing::warn!(height, "Signature missing from last commit");
                // Later gaps overwrite earlier ones within a cycle.
                missing_sig_height = Some(height);
                missed += 1;
            }

            last_height = height;
            blocks_scanned += 1;
            height += 1;
        }

        let outcome = match missing_sig_height {
            Some(gap) => ScanOutcome::Gap(gap),
            None => ScanOutcome::Clean(last_height),
        };

        Ok(ScanReport {
            outcome,
            last_height,
            blocks_scanned,
            missed,
        })
    }
}
