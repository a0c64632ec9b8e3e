//! Session store and lifecycle: the active conversation, the archived
//! session history, and the transitions between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::{Conversation, Message, Role};

/// Max chars of the first user message used for a derived session title.
const TITLE_MAX_CHARS: usize = 50;

/// Max chars of the last message kept as a session preview.
const PREVIEW_MAX_CHARS: usize = 100;

/// Title used while no user message exists to derive one from.
const UNTITLED: &str = "New Search";

/// Lifecycle status of an archived session, derived from its messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    Completed,
    InProgress,
    Draft,
}

impl SessionStatus {
    pub fn label(self) -> &'static str {
        match self {
            SessionStatus::Completed => "completed",
            SessionStatus::InProgress => "in progress",
            SessionStatus::Draft => "draft",
        }
    }
}

/// An archived, immutable snapshot of a past conversation.
///
/// Created only when a conversation with more than the seed message is
/// archived; never mutated afterwards, only deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub message_count: usize,
    pub last_message: String,
    pub status: SessionStatus,
    pub messages: Vec<Message>,
}

/// Owns the active conversation, the session history (newest first), and the
/// pointer to the session the active conversation was loaded from.
///
/// All mutation goes through the methods below; the UI layer holds the store
/// by value and renders from it.
#[derive(Debug)]
pub struct SessionStore {
    pub conversation: Conversation,
    pub history: Vec<Session>,
    pub current_session_id: Option<String>,
    greeting: String,
}

impl SessionStore {
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            conversation: Conversation::fresh(&greeting),
            history: Vec::new(),
            current_session_id: None,
            greeting,
        }
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Appends a user message and marks a request in flight.
    ///
    /// Rejects (returns false, state untouched) when the trimmed text is
    /// empty or a request is already in flight.
    pub fn append_user_message(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.conversation.is_loading {
            return false;
        }
        self.conversation.messages.push(Message::user(trimmed));
        self.conversation.input.clear();
        self.conversation.is_loading = true;
        true
    }

    /// Appends the collaborator's reply and clears the loading flag.
    pub fn complete_with_assistant_reply(&mut self, text: &str) {
        self.conversation.messages.push(Message::assistant(text));
        self.conversation.is_loading = false;
    }

    /// Clears the loading flag after a failed request.
    ///
    /// The already-sent user message stays in the conversation; surfacing the
    /// error to the user is the caller's responsibility.
    pub fn fail_request(&mut self) {
        self.conversation.is_loading = false;
    }

    /// Derives a session title from the first user message, truncated to
    /// 50 chars with an ellipsis when longer. Placeholder when no user
    /// message exists yet.
    pub fn derive_title(messages: &[Message]) -> String {
        messages
            .iter()
            .find(|m| m.role == Role::User)
            .map_or_else(|| UNTITLED.to_string(), |m| truncate_chars(&m.content, TITLE_MAX_CHARS))
    }

    /// Derives a session status from the message sequence: `Draft` for a
    /// seed-only sequence, otherwise `Completed` when the last message is
    /// from the assistant and `InProgress` when it is from the user.
    pub fn derive_status(messages: &[Message]) -> SessionStatus {
        if messages.len() <= 1 {
            return SessionStatus::Draft;
        }
        match messages.last().map(|m| m.role) {
            Some(Role::Assistant) => SessionStatus::Completed,
            _ => SessionStatus::InProgress,
        }
    }

    /// Archives the active conversation as a new session at the head of the
    /// history, if it holds more than the seed message. Returns whether a
    /// session was created.
    pub fn archive_active_if_nontrivial(&mut self) -> bool {
        if self.conversation.is_seed_only() {
            return false;
        }
        let messages = &self.conversation.messages;
        let last_message = messages
            .last()
            .map(|m| truncate_chars(&m.content, PREVIEW_MAX_CHARS))
            .unwrap_or_default();
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            title: Self::derive_title(messages),
            timestamp: Utc::now(),
            message_count: messages.len(),
            last_message,
            status: Self::derive_status(messages),
            messages: messages.clone(),
        };
        tracing::debug!(id = %session.id, title = %session.title, "archived session");
        self.history.insert(0, session);
        true
    }

    /// Archives the current conversation (if non-trivial) and starts a fresh
    /// draft.
    pub fn start_new_search(&mut self) {
        self.archive_active_if_nontrivial();
        self.conversation.reset(&self.greeting);
        self.current_session_id = None;
    }

    /// Resets the active conversation to the seed WITHOUT archiving.
    ///
    /// Unsaved work is discarded; idempotent.
    pub fn clear_search(&mut self) {
        self.conversation.reset(&self.greeting);
    }

    /// Replaces the active conversation with a copy of the session's
    /// snapshot and points at it. Silent no-op for an unknown id.
    pub fn load_session(&mut self, id: &str) -> bool {
        let Some(session) = self.history.iter().find(|s| s.id == id) else {
            return false;
        };
        self.conversation.messages = session.messages.clone();
        self.conversation.input.clear();
        self.conversation.is_loading = false;
        self.current_session_id = Some(id.to_string());
        true
    }

    /// Removes a session from history. When the deleted session is the one
    /// the active conversation was loaded from, the conversation resets to a
    /// fresh draft. Silent no-op for an unknown id.
    pub fn delete_session(&mut self, id: &str) -> bool {
        let before = self.history.len();
        self.history.retain(|s| s.id != id);
        if self.history.len() == before {
            return false;
        }
        if self.current_session_id.as_deref() == Some(id) {
            self.conversation.reset(&self.greeting);
            self.current_session_id = None;
        }
        true
    }
}

/// Truncates to at most `max` chars, appending `...` when truncated.
///
/// Char-based on purpose: this feeds the session data model, not the
/// terminal; display-width truncation happens at render time.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}
