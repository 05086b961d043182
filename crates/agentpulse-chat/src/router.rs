//! Chat Router - Selects the chat backend from configuration

use std::fmt;
use std::sync::Arc;

use crate::assets::InMemoryAssets;
use crate::client::ChatClient;
use crate::deterministic::DeterministicChatClient;
use crate::http::{HttpChatClient, HttpChatConfig};

/// Backend kind for routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatBackendKind {
    /// Agent backend over HTTP
    Http,
    /// Offline canned agent
    Deterministic,
}

impl ChatBackendKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "http" | "remote" | "server" => Some(Self::Http),
            "deterministic" | "offline" | "none" | "fallback" => Some(Self::Deterministic),
            _ => None,
        }
    }
}

impl fmt::Display for ChatBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Deterministic => write!(f, "deterministic"),
        }
    }
}

pub struct ChatRouter {
    client: Arc<dyn ChatClient>,
    kind: ChatBackendKind,
}

impl ChatRouter {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        let kind = client.kind();
        Self { client, kind }
    }

    /// Create a router for a backend kind, falling back to the deterministic
    /// client when the HTTP client cannot be built.
    pub fn from_kind(kind: ChatBackendKind, http: HttpChatConfig, assets: InMemoryAssets) -> Self {
        let client: Arc<dyn ChatClient> = match kind {
            ChatBackendKind::Http => match HttpChatClient::new(http) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    tracing::warn!("HTTP chat backend unavailable ({}), using deterministic fallback", e);
                    Arc::new(DeterministicChatClient::with_assets(assets))
                }
            },
            ChatBackendKind::Deterministic => Arc::new(DeterministicChatClient::with_assets(assets)),
        };
        Self::new(client)
    }

    pub fn client(&self) -> Arc<dyn ChatClient> {
        self.client.clone()
    }

    pub fn kind(&self) -> ChatBackendKind {
        self.kind
    }
}
