//! Conversation transcript: message layout, word wrap, and scrollback.

pub mod render;
pub mod state;

pub use state::TranscriptState;
