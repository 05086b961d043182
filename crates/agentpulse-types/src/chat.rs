//! Chat backend messages
//!
//! The chat backend answers a submission with a list of messages, each tagged
//! with the event that produced it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypesError;

/// Event tag of a chat backend message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatEventKind {
    /// Natural language reply from the agent
    Agent,
    /// Summary of the tool/function calls the agent made
    Tools,
    /// Backend-side failure
    Error,
}

impl ChatEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Tools => "tools",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ChatEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatEventKind {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agent" => Ok(Self::Agent),
            "tools" => Ok(Self::Tools),
            "error" => Ok(Self::Error),
            other => Err(TypesError::UnknownChatEvent {
                event: other.to_string(),
            }),
        }
    }
}

/// One entry of a chat backend reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub event: ChatEventKind,
    /// Markdown text
    #[serde(default)]
    pub data: String,
    /// Names of the functions the agent called (tools events only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<String>,
}

impl ChatMessage {
    pub fn agent(data: impl Into<String>) -> Self {
        Self {
            event: ChatEventKind::Agent,
            data: data.into(),
            functions: Vec::new(),
        }
    }

    pub fn tools(data: impl Into<String>, functions: Vec<String>) -> Self {
        Self {
            event: ChatEventKind::Tools,
            data: data.into(),
            functions,
        }
    }

    pub fn error(data: impl Into<String>) -> Self {
        Self {
            event: ChatEventKind::Error,
            data: data.into(),
            functions: Vec::new(),
        }
    }
}

/// Stable identifier grouping one session's submissions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ConversationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_deserializes_without_optional_fields() {
        let msg: ChatMessage = serde_json::from_str(r#"{"event":"agent"}"#).unwrap();
        assert_eq!(msg, ChatMessage::agent(""));
    }

    #[test]
    fn test_tools_message_keeps_functions() {
        let msg: ChatMessage = serde_json::from_str(
            r#"{"event":"tools","data":"deployed","functions":["deploy_nft"]}"#,
        )
        .unwrap();
        assert_eq!(msg.event, ChatEventKind::Tools);
        assert_eq!(msg.functions, vec!["deploy_nft".to_string()]);
    }

    #[test]
    fn test_conversation_ids_are_unique() {
        assert_ne!(ConversationId::new(), ConversationId::new());
    }
}
