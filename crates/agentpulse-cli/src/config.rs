//! Application configuration
//!
//! Layered from lowest to highest priority: built-in defaults, an optional
//! TOML file, `AGENTPULSE__SECTION__KEY` environment variables, then CLI
//! flags (applied by the caller).

use std::str::FromStr;
use std::time::Duration;

use agentpulse_chat::{ChatBackendKind, HttpChatConfig, DEFAULT_PROMPT};
use agentpulse_core::{Capacity, DashboardOptions, Variant, DEFAULT_THOUGHT_PROBABILITY};
use agentpulse_engine::EngineConfig;
use agentpulse_tui::ShellOptions;
use agentpulse_types::{Holdings, Language};
use anyhow::{anyhow, Context};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub agent: AgentSettings,

    #[serde(default)]
    pub stream: StreamSettings,

    #[serde(default)]
    pub timing: TimingSettings,

    #[serde(default)]
    pub chat: ChatSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Agent profile shown in the navbar and sidebar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    #[serde(default = "default_agent_name")]
    pub name: String,

    #[serde(default = "default_network")]
    pub network: String,

    #[serde(default = "default_wallet_address")]
    pub wallet_address: String,

    /// NFT contract addresses owned at startup
    #[serde(default)]
    pub nfts: Vec<String>,

    /// Token contract addresses owned at startup
    #[serde(default)]
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    /// `simulated` or `chat`
    #[serde(default = "default_variant")]
    pub variant: String,

    /// Stream capacity; `0` means unbounded, unset uses the variant default
    #[serde(default)]
    pub capacity: Option<usize>,

    #[serde(default = "default_language")]
    pub language: String,

    /// Run the generator; unset uses the variant default
    #[serde(default)]
    pub simulate: Option<bool>,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_thought_probability")]
    pub thought_probability: f64,
}

/// Timer periods in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingSettings {
    #[serde(default = "default_generator_ms")]
    pub generator_ms: u64,

    #[serde(default = "default_thinking_ms")]
    pub thinking_ms: u64,

    #[serde(default = "default_metrics_ms")]
    pub metrics_ms: u64,

    #[serde(default = "default_liveness_ms")]
    pub liveness_ms: u64,

    #[serde(default = "default_dots_ms")]
    pub dots_ms: u64,

    #[serde(default = "default_observe_poll_ms")]
    pub observe_poll_ms: u64,

    #[serde(default = "default_true")]
    pub observe_on_start: bool,

    /// Terminal redraw period
    #[serde(default = "default_redraw_ms")]
    pub redraw_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// `http` or `deterministic`
    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Prompt posted by observe mode
    #[serde(default = "default_prompt")]
    pub default_prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log file used while the dashboard owns the terminal
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_agent_name() -> String {
    "Based Agent".to_string()
}

fn default_network() -> String {
    "Base Sepolia".to_string()
}

fn default_wallet_address() -> String {
    "0x453b6e3a8c9f2d1e7b4a5c0d9e8f7a6b5c4d3432".to_string()
}

fn default_variant() -> String {
    Variant::Simulated.as_str().to_string()
}

fn default_language() -> String {
    Language::En.code().to_string()
}

fn default_seed() -> u64 {
    42
}

fn default_thought_probability() -> f64 {
    DEFAULT_THOUGHT_PROBABILITY
}

fn default_generator_ms() -> u64 {
    3000
}

fn default_thinking_ms() -> u64 {
    1500
}

fn default_metrics_ms() -> u64 {
    2000
}

fn default_liveness_ms() -> u64 {
    1000
}

fn default_dots_ms() -> u64 {
    500
}

fn default_observe_poll_ms() -> u64 {
    500
}

fn default_redraw_ms() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

fn default_backend() -> String {
    ChatBackendKind::Deterministic.to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_file() -> String {
    "agentpulse.log".to_string()
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            network: default_network(),
            wallet_address: default_wallet_address(),
            nfts: Vec::new(),
            tokens: Vec::new(),
        }
    }
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            capacity: None,
            language: default_language(),
            simulate: None,
            seed: default_seed(),
            thought_probability: default_thought_probability(),
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            generator_ms: default_generator_ms(),
            thinking_ms: default_thinking_ms(),
            metrics_ms: default_metrics_ms(),
            liveness_ms: default_liveness_ms(),
            dots_ms: default_dots_ms(),
            observe_poll_ms: default_observe_poll_ms(),
            observe_on_start: true,
            redraw_ms: default_redraw_ms(),
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            default_prompt: default_prompt(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder
            .add_source(config::File::with_name("agentpulse").required(false))
            .add_source(
                config::Environment::with_prefix("AGENTPULSE")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
        builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    pub fn variant(&self) -> anyhow::Result<Variant> {
        Variant::from_str(&self.stream.variant)
            .ok_or_else(|| anyhow!("unknown variant '{}'", self.stream.variant))
    }

    pub fn language(&self) -> anyhow::Result<Language> {
        Ok(Language::from_str(&self.stream.language)?)
    }

    pub fn chat_backend(&self) -> anyhow::Result<ChatBackendKind> {
        ChatBackendKind::from_str(&self.chat.backend)
            .ok_or_else(|| anyhow!("unknown chat backend '{}'", self.chat.backend))
    }

    pub fn dashboard_options(&self) -> anyhow::Result<DashboardOptions> {
        let mut options =
            DashboardOptions::for_variant(self.variant()?).with_language(self.language()?);
        match self.stream.capacity {
            Some(0) => options = options.with_capacity(Capacity::Unbounded),
            Some(n) => options = options.with_capacity(Capacity::Bounded(n)),
            None => {}
        }
        if let Some(simulate) = self.stream.simulate {
            options = options.with_simulation(simulate);
        }
        Ok(options)
    }

    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let t = &self.timing;
        let config = EngineConfig {
            generator_period: Duration::from_millis(t.generator_ms),
            thinking_delay: Duration::from_millis(t.thinking_ms),
            metrics_period: Duration::from_millis(t.metrics_ms),
            liveness_period: Duration::from_millis(t.liveness_ms),
            dots_period: Duration::from_millis(t.dots_ms),
            observe_poll: Duration::from_millis(t.observe_poll_ms),
            observe_on_start: t.observe_on_start,
            thought_probability: self.stream.thought_probability,
            seed: self.stream.seed,
            default_prompt: self.chat.default_prompt.clone(),
        };
        config.validate().context("invalid [timing] settings")?;
        Ok(config)
    }

    pub fn http_chat_config(&self) -> HttpChatConfig {
        HttpChatConfig {
            base_url: self.chat.base_url.clone(),
            timeout: Duration::from_secs(self.chat.timeout_secs),
        }
    }

    pub fn shell_options(&self) -> ShellOptions {
        ShellOptions {
            agent_name: self.agent.name.clone(),
            network: self.agent.network.clone(),
            wallet_address: self.agent.wallet_address.clone(),
            tick_rate: Duration::from_millis(self.timing.redraw_ms),
        }
    }

    pub fn initial_holdings(&self) -> Holdings {
        Holdings::new(self.agent.nfts.clone(), self.agent.tokens.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> anyhow::Result<AppConfig> {
        AppConfig::from_builder(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("").unwrap();
        let options = config.dashboard_options().unwrap();
        assert_eq!(options.variant, Variant::Simulated);
        assert_eq!(options.capacity, Capacity::Bounded(10));
        assert!(options.simulate);
        assert_eq!(config.engine_config().unwrap().generator_period, Duration::from_millis(3000));
        assert_eq!(config.chat_backend().unwrap(), ChatBackendKind::Deterministic);
        assert_eq!(config.logging.file, "agentpulse.log");
    }

    #[test]
    fn test_chat_variant_from_file() {
        let config = from_toml(
            r#"
            [stream]
            variant = "chat"
            language = "es"
            capacity = 0

            [chat]
            backend = "http"
            base_url = "http://agent.local:3000"

            [agent]
            nfts = ["0xnft"]
            "#,
        )
        .unwrap();

        let options = config.dashboard_options().unwrap();
        assert_eq!(options.variant, Variant::Chat);
        assert_eq!(options.language, Language::Es);
        assert_eq!(options.capacity, Capacity::Unbounded);
        assert!(!options.simulate);
        assert_eq!(config.chat_backend().unwrap(), ChatBackendKind::Http);
        assert_eq!(config.http_chat_config().base_url, "http://agent.local:3000");
        assert_eq!(config.initial_holdings().nfts, vec!["0xnft".to_string()]);
    }

    #[test]
    fn test_simulation_override() {
        let config = from_toml("[stream]\nvariant = \"chat\"\nsimulate = true\ncapacity = 25\n").unwrap();
        let options = config.dashboard_options().unwrap();
        assert!(options.simulate);
        assert_eq!(options.capacity, Capacity::Bounded(25));
    }

    #[test]
    fn test_zero_timer_period_rejected() {
        let config = from_toml("[timing]\nliveness_ms = 0\n").unwrap();
        assert!(config.engine_config().is_err());

        let config = from_toml("[timing]\nthinking_ms = 0\n").unwrap();
        assert!(config.engine_config().is_ok());
    }

    #[test]
    fn test_unknown_values_rejected() {
        let mut config = AppConfig::default();
        config.stream.variant = "hologram".to_string();
        assert!(config.dashboard_options().is_err());

        let mut config = AppConfig::default();
        config.stream.language = "klingon".to_string();
        assert!(config.language().is_err());
    }
}
