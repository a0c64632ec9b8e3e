//! Event loop: owns the terminal, drains the event inbox, runs the reducer,
//! and executes the effects it returns.
//!
//! Background search tasks post their results back through the inbox, so
//! the reducer only ever runs on this loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event;
use synapse_core::config::Config;
use synapse_core::search::{SearchClient, SearchRequest};
use synapse_core::session::SessionStore;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::{SearchUiEvent, UiEvent};
use crate::render;
use crate::state::AppState;
use crate::terminal::{self, Tui};
use crate::update;

/// Poll timeout while a search is in flight, keeps the spinner smooth.
const FRAME_DURATION: Duration = Duration::from_millis(16);
/// Poll timeout when idle.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: Tui,
    state: AppState,
    client: Arc<SearchClient>,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
}

impl TuiRuntime {
    pub fn new(config: &Config) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal()?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let store = SessionStore::new(config.greeting.clone());
        let client = Arc::new(SearchClient::new(
            config.mock.latency(),
            config.mock.seed,
            config.mock.fail,
        ));

        Ok(Self {
            terminal,
            state: AppState::new(store),
            client,
            inbox_tx,
            inbox_rx,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        terminal::disable_input_features()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut needs_render = true;
        while !self.state.tui.should_quit {
            if needs_render {
                let state = &self.state;
                self.terminal.draw(|frame| render::render(state, frame))?;
                needs_render = false;
            }

            for event in self.collect_events()? {
                if self.marks_dirty(&event) {
                    needs_render = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }
        }
        Ok(())
    }

    /// Animation ticks only force a redraw when something on screen moves.
    fn marks_dirty(&self, event: &UiEvent) -> bool {
        match event {
            UiEvent::Terminal(_) | UiEvent::Search(_) => true,
            UiEvent::Tick => self.state.tui.is_loading() || self.state.tui.toast.is_some(),
            UiEvent::Frame { .. } => false,
        }
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Geometry first so later handlers see the current layout.
        let size = self.terminal.size()?;
        events.push(UiEvent::Frame {
            width: size.width,
            height: size.height,
        });

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let poll_timeout = if self.state.tui.is_loading() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        if event::poll(poll_timeout)? {
            // Drain everything already buffered so a paste arrives in one
            // batch instead of one event per loop iteration.
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        events.push(UiEvent::Tick);
        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::Quit => self.state.tui.should_quit = true,
                UiEffect::StartSearch { request } => self.spawn_search(request),
            }
        }
    }

    fn spawn_search(&self, request: SearchRequest) {
        let client = Arc::clone(&self.client);
        let inbox = self.inbox_tx.clone();
        tokio::spawn(async move {
            let event = match client.send(request).await {
                Ok(response) => UiEvent::Search(SearchUiEvent::Completed {
                    reply: response.reply,
                    candidates: response.candidates,
                }),
                Err(error) => UiEvent::Search(SearchUiEvent::Failed {
                    error: format!("{error:#}"),
                }),
            };
            if inbox.send(event).is_err() {
                tracing::debug!("inbox closed before the search result arrived");
            }
        });
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        if let Err(error) = terminal::restore_terminal() {
            tracing::warn!(error = %error, "failed to restore terminal");
        }
    }
}
