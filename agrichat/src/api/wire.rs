//! JSON bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

use crate::models::{Message, MessageRole};

#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
    pub session_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SessionRequest<'a> {
    pub session_id: &'a str,
}

/// Reply to `/ask`. The backend sets exactly one of the two fields.
#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewChatResponse {
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChatResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

impl From<HistoryEntry> for Message {
    fn from(entry: HistoryEntry) -> Self {
        Self::new(MessageRole::from_wire(&entry.role), entry.content)
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SessionsResponse {
    #[serde(default)]
    pub sessions: Vec<String>,
}
