//! Transient notifications rendered in the top-right corner.

use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastSeverity {
    Info,
    Error,
}

#[derive(Debug)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub severity: ToastSeverity,
    created_at: Instant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, ToastSeverity::Info)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, ToastSeverity::Error)
    }

    fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: ToastSeverity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            created_at: Instant::now(),
        }
    }

    /// Checked on every tick; expired toasts are dropped from state.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_TTL
    }
}
