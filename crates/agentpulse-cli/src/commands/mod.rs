//! Subcommand implementations

pub mod chat;
pub mod run;
pub mod stream;

use std::sync::Arc;

use agentpulse_chat::{ChatRouter, ChatSession, InMemoryAssets};
use agentpulse_core::Variant;
use agentpulse_engine::DashboardEngine;
use clap::Args;

use crate::config::AppConfig;

/// Flags shared by the dashboard commands; each overrides its config key.
#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Dashboard variant (simulated, chat)
    #[arg(long)]
    pub variant: Option<String>,

    /// Language (en, es)
    #[arg(long = "lang")]
    pub language: Option<String>,

    /// Seed for generated activity
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stream capacity, 0 for unbounded
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Run the activity generator in the chat variant too
    #[arg(long)]
    pub simulate: bool,

    #[command(flatten)]
    pub chat: ChatArgs,
}

#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    /// Chat backend (http, deterministic)
    #[arg(long, env = "AGENTPULSE_CHAT_BACKEND")]
    pub backend: Option<String>,

    /// Base URL of the agent backend
    #[arg(long, env = "AGENTPULSE_CHAT_URL")]
    pub chat_url: Option<String>,
}

impl DashboardArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(variant) = &self.variant {
            config.stream.variant = variant.clone();
        }
        if let Some(language) = &self.language {
            config.stream.language = language.clone();
        }
        if let Some(seed) = self.seed {
            config.stream.seed = seed;
        }
        if let Some(capacity) = self.capacity {
            config.stream.capacity = Some(capacity);
        }
        if self.simulate {
            config.stream.simulate = Some(true);
        }
        self.chat.apply(config);
    }
}

impl ChatArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(backend) = &self.backend {
            config.chat.backend = backend.clone();
        }
        if let Some(url) = &self.chat_url {
            config.chat.base_url = url.clone();
        }
    }
}

/// Chat router over holdings seeded from configuration
pub fn build_router(config: &AppConfig, assets: InMemoryAssets) -> anyhow::Result<ChatRouter> {
    Ok(ChatRouter::from_kind(
        config.chat_backend()?,
        config.http_chat_config(),
        assets,
    ))
}

/// Wire an engine from configuration
pub fn build_engine(config: &AppConfig) -> anyhow::Result<DashboardEngine> {
    let options = config.dashboard_options()?;
    let assets = InMemoryAssets::new(config.initial_holdings());

    let mut builder = DashboardEngine::builder(options)
        .config(config.engine_config()?)
        .assets(Arc::new(assets.clone()));

    if options.variant == Variant::Chat {
        let router = build_router(config, assets)?;
        tracing::info!(backend = %router.kind(), "chat backend selected");
        builder = builder.chat(ChatSession::new(router.client()));
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = AppConfig::default();
        let args = DashboardArgs {
            variant: Some("chat".to_string()),
            language: Some("es".to_string()),
            capacity: Some(0),
            simulate: true,
            chat: ChatArgs {
                backend: Some("http".to_string()),
                chat_url: None,
            },
            ..DashboardArgs::default()
        };
        args.apply(&mut config);

        let options = config.dashboard_options().unwrap();
        assert_eq!(options.variant, Variant::Chat);
        assert!(options.simulate);
        assert_eq!(config.chat.backend, "http");
        assert_eq!(config.chat.base_url, "http://localhost:3000");
        assert_eq!(config.stream.seed, 42);
    }

    #[tokio::test]
    async fn test_build_engine_for_chat_variant() {
        let mut config = AppConfig::default();
        config.stream.variant = "chat".to_string();
        let engine = build_engine(&config).unwrap();
        assert_eq!(engine.chat().map(|c| c.backend()), Some("Deterministic"));

        config.stream.variant = "simulated".to_string();
        assert!(build_engine(&config).unwrap().chat().is_none());
    }
}
