//! Modal overlays drawn above the main chat view.
//!
//! While an overlay is open it owns keyboard input. Handlers receive the
//! main state mutably, which is why `AppState` keeps the overlay in its own
//! field instead of inside `TuiState`.

pub mod history;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::state::TuiState;

pub enum Overlay {
    History(history::HistoryState),
}

pub enum OverlayTransition {
    /// Remain open.
    Stay,
    /// Close and return input to the main view.
    Close,
}

pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            effects: Vec::new(),
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            effects: Vec::new(),
        }
    }
}

impl Overlay {
    pub fn handle_key(&mut self, tui: &mut TuiState, key: &KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::History(state) => state.handle_key(tui, key),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        match self {
            Overlay::History(state) => state.render(frame, area, tui),
        }
    }
}
