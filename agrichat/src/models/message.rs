//! Message model representing one turn of a chat session.

use serde::{Deserialize, Serialize};

/// Role of a message sender, as the chat view distinguishes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Message produced by the backend (answers, errors, welcome text).
    Bot,
}

impl MessageRole {
    /// Convert role to its display string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }

    /// Map a role reported by the backend.
    ///
    /// The backend labels its own turns `assistant`; anything that is not
    /// `user` is shown as a bot message.
    pub fn from_wire(s: &str) -> Self {
        if s == "user" {
            Self::User
        } else {
            Self::Bot
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message in a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender.
    pub role: MessageRole,
    /// Content of the message, possibly spanning several lines.
    pub content: String,
}

impl Message {
    /// Create a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Split text into paragraph lines, dropping lines that are blank.
///
/// Non-blank lines are kept verbatim, including their indentation.
pub fn paragraphs(content: &str) -> Vec<String> {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Content of the first user message in a history, if any.
pub fn first_user_message(history: &[Message]) -> Option<&str> {
    history
        .iter()
        .find(|m| m.role == MessageRole::User)
        .map(|m| m.content.as_str())
}
