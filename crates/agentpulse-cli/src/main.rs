//! agentpulse CLI - Crypto agent activity dashboard
//!
//! # Quick Start
//!
//! ```bash
//! # Simulated agent in the terminal dashboard
//! agentpulse run
//!
//! # Chat variant against a running agent backend
//! agentpulse run --variant chat --backend http --chat-url http://localhost:3000
//!
//! # Print ten generated records without the dashboard
//! agentpulse stream --ticks 10 --lang es
//!
//! # One message through the configured chat backend
//! agentpulse chat "Deploy an NFT"
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod display;
mod logging;

use commands::{ChatArgs, DashboardArgs};
use config::AppConfig;
use logging::{init_logging, LogTarget};

/// agentpulse - watch a crypto agent think, trade and chat
#[derive(Parser)]
#[command(name = "agentpulse")]
#[command(version)]
#[command(about = "Terminal dashboard for an on-chain AI agent", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true, env = "AGENTPULSE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "AGENTPULSE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, global = true, env = "AGENTPULSE_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the terminal dashboard
    Run {
        #[command(flatten)]
        dashboard: DashboardArgs,

        /// Write logs to this file while the dashboard is open
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Print the activity stream to stdout
    Stream {
        #[command(flatten)]
        dashboard: DashboardArgs,

        /// Stop after this many generated records
        #[arg(short, long, default_value = "10")]
        ticks: u32,
    },

    /// Send one message to the agent and print its reply
    Chat {
        /// Message text
        text: String,

        #[command(flatten)]
        chat: ChatArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut app_config = AppConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        app_config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        app_config.logging.format = format;
    }

    match &cli.command {
        Commands::Run { dashboard, log_file } => {
            dashboard.apply(&mut app_config);
            if let Some(file) = log_file {
                app_config.logging.file = file.clone();
            }
            init_logging(
                &app_config.logging,
                LogTarget::File(Path::new(&app_config.logging.file)),
            )?;
        }
        Commands::Stream { dashboard, .. } => {
            dashboard.apply(&mut app_config);
            init_logging(&app_config.logging, LogTarget::Stderr)?;
        }
        Commands::Chat { chat, .. } => {
            chat.apply(&mut app_config);
            init_logging(&app_config.logging, LogTarget::Stderr)?;
        }
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "agentpulse starting");

    let result = match cli.command {
        Commands::Run { .. } => commands::run::run(&app_config).await,
        Commands::Stream { ticks, .. } => commands::stream::run(&app_config, ticks).await,
        Commands::Chat { text, .. } => commands::chat::run(&app_config, &text).await,
    };

    if let Err(e) = &result {
        display::error(&e.to_string());
    }
    result
}
