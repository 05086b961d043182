//! Chat client contract and per-session wrapper

use std::sync::Arc;

use agentpulse_types::{ChatMessage, ConversationId};
use async_trait::async_trait;

use crate::error::Result;
use crate::router::ChatBackendKind;

/// Prompt posted by observe mode
pub const DEFAULT_PROMPT: &str =
    "Summarize what you are doing on-chain right now in one or two sentences.";

/// A chat backend that answers a text with a list of event messages
#[async_trait]
pub trait ChatClient: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> ChatBackendKind;

    /// Post `text` to the agent, grouping it under `conversation_id` when given.
    async fn post_chat(
        &self,
        text: &str,
        conversation_id: Option<&ConversationId>,
    ) -> Result<Vec<ChatMessage>>;
}

/// A chat client bound to one conversation
#[derive(Clone)]
pub struct ChatSession {
    client: Arc<dyn ChatClient>,
    conversation_id: ConversationId,
}

impl ChatSession {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self::with_conversation(client, ConversationId::new())
    }

    pub fn with_conversation(client: Arc<dyn ChatClient>, conversation_id: ConversationId) -> Self {
        Self {
            client,
            conversation_id,
        }
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn backend(&self) -> &'static str {
        self.client.name()
    }

    /// Send `text` and return the reply.
    ///
    /// Client failures are reported as a single error message so they show up
    /// in the stream. Nothing is retried.
    pub async fn send(&self, text: &str) -> Vec<ChatMessage> {
        tracing::debug!(
            backend = self.client.name(),
            conversation = %self.conversation_id,
            "posting chat message"
        );
        match self.client.post_chat(text, Some(&self.conversation_id)).await {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(backend = self.client.name(), "chat request failed: {}", e);
                vec![ChatMessage::error(e.to_string())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use agentpulse_types::ChatEventKind;

    struct FailingClient;

    #[async_trait]
    impl ChatClient for FailingClient {
        fn name(&self) -> &'static str {
            "Failing"
        }

        fn kind(&self) -> ChatBackendKind {
            ChatBackendKind::Http
        }

        async fn post_chat(
            &self,
            _text: &str,
            _conversation_id: Option<&ConversationId>,
        ) -> Result<Vec<ChatMessage>> {
            Err(ChatError::NetworkError {
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_session_folds_errors_into_error_event() {
        let session = ChatSession::new(Arc::new(FailingClient));
        let messages = session.send("hello").await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].event, ChatEventKind::Error);
        assert!(messages[0].data.contains("connection refused"));
    }

    #[derive(Default)]
    struct RecordingClient {
        seen: std::sync::Mutex<Vec<Option<ConversationId>>>,
    }

    #[async_trait]
    impl ChatClient for RecordingClient {
        fn name(&self) -> &'static str {
            "Recording"
        }

        fn kind(&self) -> ChatBackendKind {
            ChatBackendKind::Deterministic
        }

        async fn post_chat(
            &self,
            text: &str,
            conversation_id: Option<&ConversationId>,
        ) -> Result<Vec<ChatMessage>> {
            self.seen.lock().unwrap().push(conversation_id.cloned());
            Ok(vec![ChatMessage::agent(text)])
        }
    }

    #[tokio::test]
    async fn test_session_posts_its_conversation_id() {
        let client = Arc::new(RecordingClient::default());
        let session = ChatSession::new(client.clone());
        session.send("one").await;
        session.send("two").await;

        let seen = client.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                Some(session.conversation_id().clone()),
                Some(session.conversation_id().clone())
            ]
        );
    }

    #[test]
    fn test_session_keeps_conversation_id() {
        let id = ConversationId::from("conv-1".to_string());
        let session = ChatSession::with_conversation(Arc::new(FailingClient), id.clone());
        assert_eq!(session.conversation_id(), &id);
    }
}
