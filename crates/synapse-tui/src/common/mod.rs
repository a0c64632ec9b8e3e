//! Shared utilities for the TUI.

pub mod text;

pub use text::{format_relative, sanitize_for_display, truncate_with_ellipsis};
