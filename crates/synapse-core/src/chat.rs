//! Conversation model: messages, roles, and the single active conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Greeting shown at the start of every fresh conversation.
pub const DEFAULT_GREETING: &str = "Welcome to Synapse! I'm your AI recruitment assistant. \
    Describe your ideal candidate requirements (skills, experience, location, etc.) \
    and I'll help you find the perfect candidates. What type of candidate are you looking for?";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message. Immutable once created: messages are appended to a
/// conversation in order and never edited or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates a user message with a fresh ID and the current timestamp.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message with a fresh ID and the current timestamp.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// The single active conversation: ordered messages plus the transient input
/// text and loading flag.
///
/// Invariant: holds at least the seed greeting message after any
/// clear/new/load operation.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub input: String,
    pub is_loading: bool,
}

impl Conversation {
    /// Creates a fresh conversation seeded with the assistant greeting.
    pub fn fresh(greeting: &str) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
            input: String::new(),
            is_loading: false,
        }
    }

    /// Resets to a fresh seeded conversation, clearing input and loading.
    pub fn reset(&mut self, greeting: &str) {
        *self = Self::fresh(greeting);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True if the conversation holds only the seed greeting.
    pub fn is_seed_only(&self) -> bool {
        self.messages.len() <= 1
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
