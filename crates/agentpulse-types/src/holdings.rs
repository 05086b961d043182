//! Token and NFT contracts held by the agent

use serde::{Deserialize, Serialize};

/// Contract addresses shown in the assets panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holdings {
    pub nfts: Vec<String>,
    pub tokens: Vec<String>,
}

impl Holdings {
    pub fn new(nfts: Vec<String>, tokens: Vec<String>) -> Self {
        Self { nfts, tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.nfts.is_empty() && self.tokens.is_empty()
    }
}
