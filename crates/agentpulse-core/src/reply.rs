//! Turning a chat backend reply into one stream record

use agentpulse_types::{ActivityRecord, ChatEventKind, ChatMessage};

use crate::markdown::markdown_to_plain_text;

/// Function names that change on-chain holdings
pub const DEPLOY_NFT_FUNCTION: &str = "deploy_nft";
pub const DEPLOY_TOKEN_FUNCTION: &str = "deploy_token";

/// Which holdings must be fetched again after a reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefetchRequest {
    pub nfts: bool,
    pub tokens: bool,
}

impl RefetchRequest {
    pub fn is_empty(&self) -> bool {
        !self.nfts && !self.tokens
    }

    /// Inspect the first tools message for deploy calls.
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        let functions = messages
            .iter()
            .find(|m| m.event == ChatEventKind::Tools)
            .map(|m| m.functions.as_slice())
            .unwrap_or_default();
        Self {
            nfts: functions.iter().any(|f| f == DEPLOY_NFT_FUNCTION),
            tokens: functions.iter().any(|f| f == DEPLOY_TOKEN_FUNCTION),
        }
    }
}

/// First message of the highest-priority event present: agent, then tools, then error.
pub fn select_reply_message(messages: &[ChatMessage]) -> Option<&ChatMessage> {
    [ChatEventKind::Agent, ChatEventKind::Tools, ChatEventKind::Error]
        .into_iter()
        .find_map(|event| messages.iter().find(|m| m.event == event))
}

/// Build the stream record for a reply.
///
/// Error events become `Error` records; everything else, including the case
/// where no message is present at all, becomes an `Agent` record.
pub fn reply_record(messages: &[ChatMessage]) -> ActivityRecord {
    match select_reply_message(messages) {
        Some(message) => {
            let content = markdown_to_plain_text(&message.data);
            match message.event {
                ChatEventKind::Error => ActivityRecord::error(content),
                ChatEventKind::Agent | ChatEventKind::Tools => ActivityRecord::agent(content),
            }
        }
        None => ActivityRecord::agent(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentpulse_types::RecordKind;

    #[test]
    fn test_agent_wins_over_tools_and_error() {
        let messages = vec![
            ChatMessage::error("boom"),
            ChatMessage::tools("called deploy_nft", vec!["deploy_nft".into()]),
            ChatMessage::agent("**Done**"),
        ];
        let record = reply_record(&messages);
        assert_eq!(record.kind(), RecordKind::Agent);
        assert_eq!(record.content(), "Done");
    }

    #[test]
    fn test_tools_used_without_agent() {
        let messages = vec![
            ChatMessage::error("boom"),
            ChatMessage::tools("called deploy_token", vec![]),
        ];
        assert_eq!(reply_record(&messages).content(), "called deploy_token");
    }

    #[test]
    fn test_error_fallback() {
        let record = reply_record(&[ChatMessage::error("rate limited")]);
        assert_eq!(record.kind(), RecordKind::Error);
        assert_eq!(record.content(), "rate limited");
    }

    #[test]
    fn test_empty_reply_still_produces_record() {
        let record = reply_record(&[]);
        assert_eq!(record.kind(), RecordKind::Agent);
        assert_eq!(record.content(), "");
    }

    #[test]
    fn test_refetch_from_tools_functions() {
        let messages = vec![ChatMessage::tools(
            "",
            vec!["deploy_nft".into(), "deploy_token".into()],
        )];
        let refetch = RefetchRequest::from_messages(&messages);
        assert!(refetch.nfts && refetch.tokens);

        let none = RefetchRequest::from_messages(&[ChatMessage::agent("deploy_nft")]);
        assert!(none.is_empty());
    }
}
