//! One-shot chat submission

use agentpulse_chat::{ChatSession, InMemoryAssets};
use agentpulse_core::{reply_record, RefetchRequest};
use agentpulse_types::{ActivityRecord, RecordKind};

use crate::config::AppConfig;
use crate::display;

use super::build_router;

pub async fn run(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("message is empty");
    }

    let assets = InMemoryAssets::new(config.initial_holdings());
    let router = build_router(config, assets.clone())?;
    let session = ChatSession::new(router.client());

    display::section(&format!("Chat ({})", session.backend()));
    display::kv("conversation", session.conversation_id().as_str());
    display::record(&ActivityRecord::user(text));

    let messages = session.send(text).await;
    let reply = reply_record(&messages);
    display::record(&reply);

    let refetch = RefetchRequest::from_messages(&messages);
    if !refetch.is_empty() {
        let holdings = assets.snapshot().await;
        display::kv("NFTs", &holdings.nfts.join(", "));
        display::kv("tokens", &holdings.tokens.join(", "));
    }

    if reply.kind() == RecordKind::Error {
        anyhow::bail!("agent returned an error");
    }
    Ok(())
}
