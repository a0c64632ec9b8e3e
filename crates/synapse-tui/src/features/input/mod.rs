//! Single-line input editor with emacs-style keys and submit history.

pub mod render;
pub mod state;
pub mod update;

pub use state::InputState;
