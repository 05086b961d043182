//! Interactive dashboard

use agentpulse_tui::run_dashboard;

use crate::config::AppConfig;
use crate::display;

use super::build_engine;

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let engine = build_engine(config)?;
    let result = run_dashboard(engine, config.shell_options()).await?;

    display::section("Session ended");
    display::kv("records", &result.records.to_string());
    display::kv("language", result.language.display_name());
    display::kv("log file", &config.logging.file);
    Ok(())
}
