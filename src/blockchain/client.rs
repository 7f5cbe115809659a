//! Chain-data REST client with timeout and error handling.
//!
//! # Responsibilities
//! - Fetch the latest block and blocks by height
//! - Distinguish "height not produced yet" (404) from real failures
//! - Enforce a deadline on every request
//!
//! No retries happen here; the poll loop simply tries again next cycle.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{
    Block, BlockHeight, ChainConfig, ChainError, ChainResult, FetchOutcome,
};
use crate::observability::metrics;

/// Source of blocks for the scan engine.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Current chain tip.
    async fn fetch_latest(&self) -> ChainResult<Block>;

    /// Block at `height`, or `NotFound` when the chain has not reached it.
    async fn fetch_by_height(&self, height: BlockHeight) -> ChainResult<FetchOutcome>;
}

#[async_trait]
impl<T: BlockSource + ?Sized> BlockSource for Arc<T> {
    async fn fetch_latest(&self) -> ChainResult<Block> {
        (**self).fetch_latest().await
    }

    async fn fetch_by_height(&self, height: BlockHeight) -> ChainResult<FetchOutcome> {
        (**self).fetch_by_height(height).await
    }
}

/// [`BlockSource`] backed by the node's REST API.
#[derive(Clone)]
pub struct HttpBlockSource {
    http: reqwest::Client,
    base_url: String,
    timeout_duration: Duration,
    timeout_secs: u64,
}

impl HttpBlockSource {
    /// Create a new client for `config.base_url`.
    pub fn new(config: &ChainConfig) -> ChainResult<Self> {
        url::Url::parse(&config.base_url)
            .map_err(|e| ChainError::InvalidUrl(format!("'{}': {}", config.base_url, e)))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("sigwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(
            base_url = %config.base_url,
            timeout_secs = config.request_timeout_secs,
            "Block source initialized"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_duration: Duration::from_secs(config.request_timeout_secs),
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path`, returning `None` on 404.
    async fn get_block(&self, path: &str) -> ChainResult<Option<Block>> {
        let url = format!("{}{}", self.base_url, path);

        let result = match timeout(self.timeout_duration, self.request_block(&url)).await {
            Ok(result) => result,
            Err(_) => Err(ChainError::Timeout(self.timeout_secs)),
        };

        if let Err(e) = &result {
            tracing::warn!(url = %url, error = %e, "Block request failed");
            metrics::record_fetch_error();
        }
        result
    }

    async fn request_block(&self, url: &str) -> ChainResult<Option<Block>> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ChainError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<Block>(&body)
            .map(Some)
            .map_err(|e| ChainError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BlockSource for HttpBlockSource {
    async fn fetch_latest(&self) -> ChainResult<Block> {
        match self.get_block("/blocks/latest").await? {
            Some(block) => Ok(block),
            // The tip always exists; a 404 here means the URL is wrong.
            None => Err(ChainError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                url: format!("{}/blocks/latest", self.base_url),
            }),
        }
    }

    async fn fetch_by_height(&self, height: BlockHeight) -> ChainResult<FetchOutcome> {
        Ok(match self.get_block(&format!("/blocks/{}", height)).await? {
            Some(block) => FetchOutcome::Found(Box::new(block)),
            None => FetchOutcome::NotFound,
        })
    }
}

impl std::fmt::Debug for HttpBlockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBlockSource")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
