//! Events consumed by the reducer.
//!
//! The runtime collects terminal input, timer ticks, and completions from
//! background search tasks into a single stream so `update` stays the one
//! place state changes happen.

use synapse_core::search::Candidate;

/// A single unit of input for the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer used for spinner animation and toast expiry.
    Tick,
    /// Terminal dimensions, emitted once per loop iteration before other
    /// events so layout-dependent handlers see current geometry.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// Outcome of an in-flight search request.
    Search(SearchUiEvent),
}

#[derive(Debug)]
pub enum SearchUiEvent {
    Completed {
        reply: String,
        candidates: Vec<Candidate>,
    },
    Failed {
        error: String,
    },
}
