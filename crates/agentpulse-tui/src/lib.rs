//! agentpulse TUI - Ratatui shell over the dashboard engine
//!
//! The shell owns the terminal and the key loop only. Every frame renders a
//! fresh snapshot of the engine state; every key press maps to one engine call.

pub mod clock;
pub mod keys;
pub mod ui;

use std::time::Duration;

use agentpulse_engine::{DashboardEngine, EngineError};
use agentpulse_types::Language;
use crossterm::event::{self, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use thiserror::Error;

pub use keys::{map_key, ShellCommand};
pub use ui::{draw, Panel, ViewState, NARROW_WIDTH};

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Static navbar/profile content and the redraw rate
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub agent_name: String,
    pub network: String,
    pub wallet_address: String,
    pub tick_rate: Duration,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            agent_name: "Based Agent".to_string(),
            network: "Base Sepolia".to_string(),
            wallet_address: "0x0000000000000000000000000000000000000000".to_string(),
            tick_rate: Duration::from_millis(100),
        }
    }
}

pub struct TuiRunResult {
    pub records: usize,
    pub language: Language,
}

/// Start the engine, run the dashboard until the user quits, then stop it.
pub async fn run_dashboard(
    engine: DashboardEngine,
    options: ShellOptions,
) -> Result<TuiRunResult, TuiError> {
    engine.start().await?;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &engine, &options).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if engine.is_running() {
        engine.stop().await?;
    }
    tracing::info!("dashboard closed");
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    engine: &DashboardEngine,
    options: &ShellOptions,
) -> Result<TuiRunResult, TuiError> {
    let mut view = ViewState {
        status_line: format!(
            "chat: {}",
            engine.chat().map(|c| c.backend()).unwrap_or("off")
        ),
        ..ViewState::default()
    };

    loop {
        let state = engine.snapshot().await;
        terminal.draw(|frame| ui::draw(frame, &state, options, &view, chrono::Utc::now()))?;

        if !event::poll(options.tick_rate)? {
            continue;
        }
        let CEvent::Key(key) = event::read()? else {
            continue;
        };
        let Some(command) = map_key(key) else {
            continue;
        };

        match command {
            ShellCommand::Quit => {
                return Ok(TuiRunResult {
                    records: state.records().len(),
                    language: state.language(),
                });
            }
            ShellCommand::Submit => {
                engine.press_enter(false).await;
            }
            ShellCommand::Newline => {
                engine.press_enter(true).await;
            }
            ShellCommand::Insert(c) => engine.insert_char(c).await,
            ShellCommand::Backspace => engine.backspace().await,
            ShellCommand::Premade(index) => {
                engine.use_premade_prompt(index).await;
            }
            ShellCommand::CycleLanguage => {
                let language = engine.cycle_language().await?;
                view.status_line = format!("language: {}", language.display_name());
            }
            ShellCommand::ToggleObserve => {
                let observing = engine.toggle_observing().await;
                view.status_line =
                    format!("observe: {}", if observing { "on" } else { "off" });
            }
            ShellCommand::TogglePanel => view.panel = view.panel.toggled(),
        }
    }
}
