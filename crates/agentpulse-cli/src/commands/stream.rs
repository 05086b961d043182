//! Headless activity stream

use agentpulse_engine::EngineEvent;
use tokio::sync::broadcast::error::RecvError;

use crate::config::AppConfig;
use crate::display;

use super::build_engine;

/// Print records as they are appended until `ticks` generator emissions
/// have been seen or Ctrl+C is pressed.
pub async fn run(config: &AppConfig, ticks: u32) -> anyhow::Result<()> {
    let mut config = config.clone();
    config.stream.simulate = Some(true);
    let engine = build_engine(&config)?;
    let mut events = engine.subscribe();

    display::section(&format!("Agent stream ({} ticks)", ticks));
    engine.start().await?;

    let mut emitted = 0;
    while emitted < ticks {
        tokio::select! {
            event = events.recv() => match event {
                Ok(EngineEvent::RecordAppended(record)) => {
                    if record.kind().is_thought() || record.kind().subtype().is_some() {
                        emitted += 1;
                    }
                    display::record(&record);
                }
                Ok(EngineEvent::LanguageChanged(language)) => {
                    display::info(&format!("language: {}", language.display_name()));
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "stream output lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                display::info("interrupted");
                break;
            }
        }
    }

    let state = engine.snapshot().await;
    engine.stop().await?;

    display::section("Agent stats");
    display::metrics(state.metrics(), state.language());
    display::success(&format!("{} records in buffer", state.records().len()));
    Ok(())
}
