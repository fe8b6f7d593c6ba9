//! Client side of the chat backend API.
//!
//! Endpoints:
//! - POST /ask - Ask a question in a session
//! - POST /new_chat - Create a session
//! - POST /delete_chat - Delete a session
//! - POST /get_history - Fetch a session's messages
//! - GET /get_all_sessions - List session ids

mod error;
mod http;
mod wire;

#[cfg(test)]
pub mod testing;

pub use error::ApiError;
pub use http::HttpBackend;

use crate::models::Message;

/// What the backend said in reply to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskReply {
    /// The answer text.
    Answer(String),
    /// The backend rejected the question and reported why.
    Refused(String),
}

/// The operations the chat view needs from a backend.
///
/// Every call is a single request/response round trip. Nothing is retried.
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
    /// Ask a question within a session.
    async fn ask(&self, question: &str, session_id: &str) -> Result<AskReply, ApiError>;

    /// Create a session and return its id.
    async fn new_chat(&self) -> Result<String, ApiError>;

    /// Delete a session. Returns whether the backend reported success.
    async fn delete_chat(&self, session_id: &str) -> Result<bool, ApiError>;

    /// Fetch the messages of a session, oldest first.
    async fn history(&self, session_id: &str) -> Result<Vec<Message>, ApiError>;

    /// List the ids of all sessions the backend knows, oldest first.
    async fn sessions(&self) -> Result<Vec<String>, ApiError>;
}
