//! Key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Quit,
    Submit,
    Newline,
    Insert(char),
    Backspace,
    /// Fill the input with premade prompt `n`
    Premade(usize),
    CycleLanguage,
    ToggleObserve,
    /// Switch between sidebar and main panel on narrow terminals
    TogglePanel,
}

pub fn map_key(key: KeyEvent) -> Option<ShellCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => Some(ShellCommand::Quit),
        KeyCode::Esc => Some(ShellCommand::Quit),
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT | KeyModifiers::CONTROL) =>
        {
            Some(ShellCommand::Newline)
        }
        KeyCode::Enter => Some(ShellCommand::Submit),
        KeyCode::F(1) => Some(ShellCommand::Premade(0)),
        KeyCode::F(2) => Some(ShellCommand::Premade(1)),
        KeyCode::F(3) => Some(ShellCommand::CycleLanguage),
        KeyCode::F(4) => Some(ShellCommand::ToggleObserve),
        KeyCode::Tab => Some(ShellCommand::TogglePanel),
        KeyCode::Backspace => Some(ShellCommand::Backspace),
        KeyCode::Char(c) if !ctrl => Some(ShellCommand::Insert(c)),
        _ => None,
    }
}
