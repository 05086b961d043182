//! Holdings sources
//!
//! The dashboard only schedules fetches; how holdings are looked up is up to
//! the source.

use std::sync::Arc;

use agentpulse_types::Holdings;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

#[async_trait]
pub trait AssetSource: Send + Sync {
    /// NFT contract addresses owned by the agent
    async fn fetch_nfts(&self) -> Result<Vec<String>>;

    /// Token contract addresses owned by the agent
    async fn fetch_tokens(&self) -> Result<Vec<String>>;
}

/// Holdings kept in memory, seeded from configuration.
///
/// The deterministic chat client records its simulated deployments here so a
/// refetch after a deploy shows the new contract.
#[derive(Clone, Default)]
pub struct InMemoryAssets {
    holdings: Arc<RwLock<Holdings>>,
}

impl InMemoryAssets {
    pub fn new(holdings: Holdings) -> Self {
        Self {
            holdings: Arc::new(RwLock::new(holdings)),
        }
    }

    pub async fn record_nft_deployment(&self, address: impl Into<String>) {
        self.holdings.write().await.nfts.push(address.into());
    }

    pub async fn record_token_deployment(&self, address: impl Into<String>) {
        self.holdings.write().await.tokens.push(address.into());
    }

    pub async fn snapshot(&self) -> Holdings {
        self.holdings.read().await.clone()
    }
}

#[async_trait]
impl AssetSource for InMemoryAssets {
    async fn fetch_nfts(&self) -> Result<Vec<String>> {
        Ok(self.holdings.read().await.nfts.clone())
    }

    async fn fetch_tokens(&self) -> Result<Vec<String>> {
        Ok(self.holdings.read().await.tokens.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deployments_visible_on_fetch() {
        let assets = InMemoryAssets::new(Holdings::new(vec!["0xnft1".into()], vec![]));
        assets.record_nft_deployment("0xnft2").await;
        assets.record_token_deployment("0xtok1").await;
        assert_eq!(assets.fetch_nfts().await.unwrap(), vec!["0xnft1", "0xnft2"]);
        assert_eq!(assets.fetch_tokens().await.unwrap(), vec!["0xtok1"]);
    }
}
