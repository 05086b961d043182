//! HTTP chat backend

use std::time::Duration;

use agentpulse_types::{ChatMessage, ConversationId};
use async_trait::async_trait;
use serde::Serialize;

use crate::client::ChatClient;
use crate::error::{ChatError, Result};
use crate::router::ChatBackendKind;

/// Configuration for the HTTP chat backend
#[derive(Debug, Clone)]
pub struct HttpChatConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for HttpChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

pub struct HttpChatClient {
    config: HttpChatConfig,
    client: reqwest::Client,
}

impl HttpChatClient {
    pub fn new(config: HttpChatConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::NotConfigured {
                message: e.to_string(),
            })?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/chat", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<&'a str>,
}

#[async_trait]
impl ChatClient for HttpChatClient {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    fn kind(&self) -> ChatBackendKind {
        ChatBackendKind::Http
    }

    async fn post_chat(
        &self,
        text: &str,
        conversation_id: Option<&ConversationId>,
    ) -> Result<Vec<ChatMessage>> {
        let request = ChatRequest {
            input: text,
            conversation_id: conversation_id.map(|id| id.as_str()),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::NetworkError {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::RequestFailed {
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let body = response.text().await.map_err(|e| ChatError::InvalidResponse {
            message: e.to_string(),
        })?;

        parse_chat_body(&body)
    }
}

/// Parse a reply body.
///
/// The backend streams newline-delimited JSON messages, optionally with SSE
/// `data:` prefixes. A single JSON array is accepted as well.
pub fn parse_chat_body(body: &str) -> Result<Vec<ChatMessage>> {
    let trimmed = body.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| ChatError::InvalidResponse {
            message: e.to_string(),
        });
    }

    trimmed
        .lines()
        .map(str::trim)
        .map(|line| line.strip_prefix("data:").map(str::trim).unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str::<ChatMessage>(line).map_err(|e| ChatError::InvalidResponse {
                message: format!("{}: {}", e, line),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentpulse_types::ChatEventKind;
    use serde_json::json;

    #[test]
    fn test_request_body_carries_conversation_id() {
        let request = ChatRequest {
            input: "Deploy an NFT",
            conversation_id: Some("conv-7"),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"input": "Deploy an NFT", "conversation_id": "conv-7"})
        );

        let request = ChatRequest {
            input: "hi",
            conversation_id: None,
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"input": "hi"}));
    }

    #[test]
    fn test_parse_ndjson_stream() {
        let body = concat!(
            r#"{"event":"tools","data":"deploy_nft(...)","functions":["deploy_nft"]}"#,
            "\n\n",
            r#"{"event":"agent","data":"Deployed!"}"#,
            "\n"
        );
        let messages = parse_chat_body(body).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].functions, vec!["deploy_nft".to_string()]);
        assert_eq!(messages[1].event, ChatEventKind::Agent);
    }

    #[test]
    fn test_parse_sse_prefixed_lines() {
        let body = "data: {\"event\":\"error\",\"data\":\"quota\"}\n";
        let messages = parse_chat_body(body).unwrap();
        assert_eq!(messages, vec![ChatMessage::error("quota")]);
    }

    #[test]
    fn test_parse_json_array() {
        let messages = parse_chat_body(r#"[{"event":"agent","data":"hi"}]"#).unwrap();
        assert_eq!(messages, vec![ChatMessage::agent("hi")]);
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        assert!(parse_chat_body("").unwrap().is_empty());
        assert!(parse_chat_body("not json").is_err());
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = HttpChatClient::new(HttpChatConfig {
            base_url: "http://agent.local/".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        assert_eq!(client.endpoint(), "http://agent.local/api/chat");
    }
}
