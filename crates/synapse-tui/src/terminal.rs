//! Terminal setup and teardown.
//!
//! Restoration is idempotent and wired into a panic hook so a crash never
//! leaves the user's shell in raw mode.

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

pub fn restore_terminal() -> Result<()> {
    if terminal::is_raw_mode_enabled()? {
        let mut stdout = io::stdout();
        execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen)?;
        disable_raw_mode()?;
    }
    Ok(())
}

/// Must run before `setup_terminal` so panics inside the event loop still
/// leave the terminal usable.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

pub fn enable_input_features() -> Result<()> {
    execute!(io::stdout(), EnableBracketedPaste)?;
    Ok(())
}

pub fn disable_input_features() -> Result<()> {
    execute!(io::stdout(), DisableBracketedPaste)?;
    Ok(())
}
