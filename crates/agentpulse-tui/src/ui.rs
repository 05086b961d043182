//! Dashboard rendering
//!
//! Drawing is a pure function of a `DashboardState` snapshot, the shell
//! options and the view state, so it can be exercised on a `TestBackend`.

use agentpulse_core::{phrases, DashboardState, UiLabels, Variant, PREMADE_PROMPTS};
use agentpulse_types::{ActivityRecord, RecordKind};
use chrono::{DateTime, Utc};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::clock::{format_usd, ict_clock, ict_time, short_address};
use crate::ShellOptions;

/// Below this width only one of sidebar and main panel is shown
pub const NARROW_WIDTH: u16 = 100;

const SIDEBAR_WIDTH: u16 = 36;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Main,
    Sidebar,
}

impl Panel {
    pub fn toggled(self) -> Self {
        match self {
            Self::Main => Self::Sidebar,
            Self::Sidebar => Self::Main,
        }
    }
}

/// Shell-only state that never reaches the engine
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub panel: Panel,
    pub status_line: String,
}

pub fn draw(
    frame: &mut Frame<'_>,
    state: &DashboardState,
    shell: &ShellOptions,
    view: &ViewState,
    now: DateTime<Utc>,
) {
    let labels = &phrases(state.language()).labels;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_navbar(frame, vertical[0], state, shell, labels, now);

    let body = vertical[1];
    if body.width < NARROW_WIDTH {
        match view.panel {
            Panel::Main => render_main(frame, body, state, labels),
            Panel::Sidebar => render_sidebar(frame, body, state, shell, labels),
        }
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
            .split(body);
        render_sidebar(frame, columns[0], state, shell, labels);
        render_main(frame, columns[1], state, labels);
    }

    render_footer(frame, vertical[2], state, view, body.width < NARROW_WIDTH);
}

fn render_navbar(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &DashboardState,
    shell: &ShellOptions,
    labels: &UiLabels,
    now: DateTime<Utc>,
) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(14)])
        .split(inner);

    let dot = if state.is_live_dot_visible() { "●" } else { " " };
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", shell.agent_name),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(dot, Style::default().fg(Color::Green)),
        Span::raw(format!(" {} {}", labels.live_on, shell.network)),
    ]);
    frame.render_widget(Paragraph::new(title), split[0]);

    frame.render_widget(
        Paragraph::new(ict_clock(now)).alignment(Alignment::Right),
        split[1],
    );
}

fn render_sidebar(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &DashboardState,
    shell: &ShellOptions,
    labels: &UiLabels,
) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(6)])
        .split(area);

    let mut profile = vec![
        Line::from(Span::styled(
            shell.agent_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(short_address(&shell.wallet_address)),
        Line::from(format!("{} ({})", state.language().display_name(), state.language())),
    ];
    if state.options().variant == Variant::Chat {
        let observe = if state.is_observing() { "observing" } else { "idle" };
        profile.push(Line::from(format!("mode: {}", observe)));
    }
    frame.render_widget(
        Paragraph::new(profile).block(Block::default().borders(Borders::ALL).title("Agent")),
        split[0],
    );

    match state.options().variant {
        Variant::Simulated => render_stats(frame, split[1], state, labels),
        Variant::Chat => render_holdings(frame, split[1], state, labels),
    }
}

fn render_stats(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, labels: &UiLabels) {
    let m = state.metrics();
    let rows = [
        (labels.earned, format_usd(m.earned)),
        (labels.spent, format_usd(m.spent)),
        (labels.nfts_owned, m.nfts_owned.to_string()),
        (labels.tokens_owned, m.tokens_owned.to_string()),
        (labels.transactions, m.transactions.to_string()),
        (labels.thoughts, m.thoughts.to_string()),
        (labels.wallet_balance, format_usd(m.wallet_balance)),
    ];
    let lines: Vec<Line<'_>> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
                Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(labels.stats_title),
        ),
        area,
    );
}

fn render_holdings(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, labels: &UiLabels) {
    let holdings = state.holdings();
    let mut lines = vec![Line::from(Span::styled(
        format!("NFTs ({})", holdings.nfts.len()),
        Style::default().fg(Color::Magenta),
    ))];
    lines.extend(holdings.nfts.iter().map(|a| Line::from(format!("  {}", short_address(a)))));
    lines.push(Line::from(Span::styled(
        format!("Tokens ({})", holdings.tokens.len()),
        Style::default().fg(Color::Yellow),
    )));
    lines.extend(
        holdings
            .tokens
            .iter()
            .map(|a| Line::from(format!("  {}", short_address(a)))),
    );

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(labels.holdings_title),
        ),
        area,
    );
}

/// Input box height: one row per line plus borders and hint, kept in 5..=9
fn input_height(text: &str) -> u16 {
    let lines = u16::try_from(text.split('\n').count()).unwrap_or(u16::MAX);
    lines.saturating_add(3).clamp(5, 9)
}

fn render_main(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, labels: &UiLabels) {
    let input_height = input_height(state.input().text());

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(input_height)])
        .split(area);

    render_stream(frame, split[0], state, labels);
    render_input(frame, split[1], state, labels);
}

fn render_stream(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, labels: &UiLabels) {
    let mut items: Vec<ListItem<'_>> = state.records().iter().map(record_item).collect();

    let waiting = if state.is_thinking() {
        Some(labels.thinking)
    } else if state.input().is_pending() {
        Some(labels.awaiting_reply)
    } else {
        None
    };
    if let Some(label) = waiting {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{}{}", label, state.loading_dots()),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))));
    }

    // Keep the newest entry in view
    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(items.len() - 1));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(labels.stream_title),
    );
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn record_item(record: &ActivityRecord) -> ListItem<'static> {
    let kind = record.kind();
    let color = kind_color(kind);
    let mut lines = record.content().lines();

    let mut first = vec![
        Span::styled(
            format!("{} ", ict_time(record.timestamp())),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("[{}] ", kind.label()), Style::default().fg(color)),
    ];
    if let Some(line) = lines.next() {
        first.push(Span::raw(line.to_string()));
    }

    let mut text = Text::from(Line::from(first));
    for line in lines {
        text.lines.push(Line::from(format!("    {}", line)));
    }
    ListItem::new(text)
}

fn kind_color(kind: RecordKind) -> Color {
    match kind {
        RecordKind::Thought => Color::Magenta,
        RecordKind::Action(_) => Color::Cyan,
        RecordKind::User => Color::Yellow,
        RecordKind::Agent => Color::Green,
        RecordKind::Error => Color::Red,
    }
}

fn render_input(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, labels: &UiLabels) {
    let input = state.input();
    let send_style = if input.send_enabled() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines: Vec<Line<'_>> = if input.text().is_empty() {
        vec![Line::from(Span::styled(
            labels.input_placeholder,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        input.text().split('\n').map(|l| Line::from(l.to_string())).collect()
    };

    let mut prompts = vec![Span::styled("Enter send", send_style)];
    for (i, prompt) in PREMADE_PROMPTS.iter().enumerate() {
        prompts.push(Span::raw("  "));
        prompts.push(Span::styled(
            format!("F{} {}", i + 1, prompt),
            Style::default().fg(Color::Blue),
        ));
    }
    lines.push(Line::from(prompts));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Message")),
        area,
    );
}

fn render_footer(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &DashboardState,
    view: &ViewState,
    narrow: bool,
) {
    let mut hotkeys = String::from("Enter send | Alt+Enter newline | F3 language");
    if state.options().variant == Variant::Chat {
        hotkeys.push_str(" | F4 observe");
    }
    if narrow {
        hotkeys.push_str(" | Tab panel");
    }
    hotkeys.push_str(" | Esc quit");

    let footer = Paragraph::new(format!("{}   {}", hotkeys, view.status_line))
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"));
    frame.render_widget(footer, area);
}
