//! Application state for the interactive session.

use std::time::Instant;

use synapse_core::session::SessionStore;

use crate::features::input::InputState;
use crate::features::transcript::TranscriptState;
use crate::overlays::Overlay;
use crate::toast::Toast;

/// Top-level state. The overlay lives outside `TuiState` so overlay key
/// handlers can mutate the main state while the overlay itself is borrowed.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(store: SessionStore) -> Self {
        Self {
            tui: TuiState::new(store),
            overlay: None,
        }
    }
}

pub struct TuiState {
    pub store: SessionStore,
    pub input: InputState,
    pub transcript: TranscriptState,
    pub toast: Option<Toast>,
    pub spinner_frame: usize,
    /// Set when a search request is dispatched, cleared when it resolves.
    pub search_started_at: Option<Instant>,
    pub should_quit: bool,
}

impl TuiState {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            input: InputState::new(),
            transcript: TranscriptState::new(),
            toast: None,
            spinner_frame: 0,
            search_started_at: None,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.store.conversation.is_loading
    }
}
