//! Offline agent used when no chat backend is configured

use std::sync::atomic::{AtomicU64, Ordering};

use agentpulse_types::{ChatMessage, ConversationId};
use async_trait::async_trait;

use crate::assets::InMemoryAssets;
use crate::client::{ChatClient, DEFAULT_PROMPT};
use crate::error::Result;
use crate::router::ChatBackendKind;

/// Keyword-driven canned agent.
///
/// Deploy requests produce a tools message naming `deploy_nft` or
/// `deploy_token`, and the new contract is recorded in the attached
/// `InMemoryAssets`.
#[derive(Default)]
pub struct DeterministicChatClient {
    assets: Option<InMemoryAssets>,
    deployments: AtomicU64,
}

impl DeterministicChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(assets: InMemoryAssets) -> Self {
        Self {
            assets: Some(assets),
            deployments: AtomicU64::new(0),
        }
    }

    fn next_address(&self) -> String {
        let n = self.deployments.fetch_add(1, Ordering::Relaxed) + 1;
        format!("0x{:040x}", 0xa9e0_0000_u64 + n)
    }

    async fn deploy_nft(&self) -> Vec<ChatMessage> {
        let address = self.next_address();
        if let Some(assets) = &self.assets {
            assets.record_nft_deployment(address.clone()).await;
        }
        vec![
            ChatMessage::tools(
                format!("deploy_nft(name=\"Agent Pass\", symbol=\"PASS\") -> {}", address),
                vec!["deploy_nft".to_string()],
            ),
            ChatMessage::agent(format!(
                "I deployed a new NFT collection **Agent Pass** at `{}`.",
                address
            )),
        ]
    }

    async fn deploy_token(&self) -> Vec<ChatMessage> {
        let address = self.next_address();
        if let Some(assets) = &self.assets {
            assets.record_token_deployment(address.clone()).await;
        }
        vec![
            ChatMessage::tools(
                format!("deploy_token(name=\"Pulse\", symbol=\"PULSE\") -> {}", address),
                vec!["deploy_token".to_string()],
            ),
            ChatMessage::agent(format!(
                "I deployed the **PULSE** token at `{}`.",
                address
            )),
        ]
    }
}

#[async_trait]
impl ChatClient for DeterministicChatClient {
    fn name(&self) -> &'static str {
        "Deterministic"
    }

    fn kind(&self) -> ChatBackendKind {
        ChatBackendKind::Deterministic
    }

    async fn post_chat(
        &self,
        text: &str,
        _conversation_id: Option<&ConversationId>,
    ) -> Result<Vec<ChatMessage>> {
        let lower = text.to_lowercase();

        if lower.contains("deploy") && lower.contains("nft") {
            return Ok(self.deploy_nft().await);
        }
        if lower.contains("deploy") && lower.contains("token") {
            return Ok(self.deploy_token().await);
        }
        if lower.contains("actions") || lower.contains("what can you") {
            return Ok(vec![ChatMessage::agent(
                "I can:\n\n- create wallets\n- request faucet funds\n- check balances\n\
                 - transfer tokens and NFTs\n- swap tokens\n- deploy NFTs and tokens",
            )]);
        }
        if lower.contains("balance") {
            return Ok(vec![ChatMessage::agent(
                "My wallet holds **1003.45 USDC** on Base Sepolia.",
            )]);
        }
        if text == DEFAULT_PROMPT {
            return Ok(vec![ChatMessage::agent(
                "Watching liquidity on Base Sepolia and keeping gas costs low.",
            )]);
        }

        Ok(vec![ChatMessage::agent(format!(
            "I received: _{}_. Ask me to deploy an NFT or a token.",
            text.trim()
        ))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentpulse_types::{ChatEventKind, Holdings};

    #[tokio::test]
    async fn test_deploy_nft_records_contract() {
        let assets = InMemoryAssets::new(Holdings::default());
        let client = DeterministicChatClient::with_assets(assets.clone());
        let reply = client.post_chat("Deploy an NFT", None).await.unwrap();

        assert_eq!(reply[0].event, ChatEventKind::Tools);
        assert_eq!(reply[0].functions, vec!["deploy_nft".to_string()]);
        assert_eq!(assets.snapshot().await.nfts.len(), 1);
    }

    #[tokio::test]
    async fn test_addresses_are_unique() {
        let client = DeterministicChatClient::new();
        let a = client.post_chat("deploy a token", None).await.unwrap();
        let b = client.post_chat("deploy a token", None).await.unwrap();
        assert_ne!(a[0].data, b[0].data);
    }

    #[tokio::test]
    async fn test_default_prompt_answered_by_agent() {
        let client = DeterministicChatClient::new();
        let reply = client.post_chat(DEFAULT_PROMPT, None).await.unwrap();
        assert_eq!(reply.len(), 1);
        assert_eq!(reply[0].event, ChatEventKind::Agent);
    }
}
