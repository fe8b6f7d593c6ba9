//! In-memory [`ChatBackend`] for tests.

use std::sync::{Mutex, MutexGuard};

use super::{ApiError, AskReply, ChatBackend};
use crate::models::{Message, MessageRole};

/// Knobs and storage behind [`FakeBackend`].
#[derive(Debug, Default)]
pub struct FakeState {
    /// Sessions with their messages, oldest first.
    pub sessions: Vec<(String, Vec<Message>)>,
    /// Every call made, as `endpoint` or `endpoint:session`.
    pub calls: Vec<String>,
    pub created: usize,
    pub fail_sessions: bool,
    pub fail_history: bool,
    pub fail_ask: bool,
    pub fail_new_chat: bool,
    pub fail_delete: bool,
    pub decline_delete: bool,
    pub refuse_ask: Option<String>,
}

/// Backend that behaves like the real one, minus the model.
///
/// Answers are `About <question>`; created sessions are `new-1`, `new-2`, ...
/// and, like the real backend, only show up in the session list once asked.
#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        body: "unavailable".to_string(),
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session holding `turns`.
    pub fn with_session(self, id: &str, turns: &[(MessageRole, &str)]) -> Self {
        let messages = turns
            .iter()
            .map(|(role, content)| Message::new(*role, *content))
            .collect();
        self.state().sessions.push((id.to_string(), messages));
        self
    }

    pub fn configure(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

impl ChatBackend for FakeBackend {
    async fn ask(&self, question: &str, session_id: &str) -> Result<AskReply, ApiError> {
        let mut state = self.state();
        state.calls.push(format!("ask:{session_id}"));
        if state.fail_ask {
            return Err(unavailable());
        }
        if let Some(reason) = state.refuse_ask.clone() {
            return Ok(AskReply::Refused(reason));
        }

        let answer = format!("About {question}");
        if !state.sessions.iter().any(|(id, _)| id == session_id) {
            state.sessions.push((session_id.to_string(), Vec::new()));
        }
        if let Some((_, messages)) = state.sessions.iter_mut().find(|(id, _)| id == session_id) {
            messages.push(Message::new(MessageRole::User, question));
            messages.push(Message::new(MessageRole::Bot, answer.clone()));
        }
        Ok(AskReply::Answer(answer))
    }

    async fn new_chat(&self) -> Result<String, ApiError> {
        let mut state = self.state();
        state.calls.push("new_chat".to_string());
        if state.fail_new_chat {
            return Err(unavailable());
        }
        state.created += 1;
        Ok(format!("new-{}", state.created))
    }

    async fn delete_chat(&self, session_id: &str) -> Result<bool, ApiError> {
        let mut state = self.state();
        state.calls.push(format!("delete_chat:{session_id}"));
        if state.fail_delete {
            return Err(unavailable());
        }
        if state.decline_delete {
            return Ok(false);
        }
        state.sessions.retain(|(id, _)| id != session_id);
        Ok(true)
    }

    async fn history(&self, session_id: &str) -> Result<Vec<Message>, ApiError> {
        let mut state = self.state();
        state.calls.push(format!("get_history:{session_id}"));
        if state.fail_history {
            return Err(unavailable());
        }
        Ok(state
            .sessions
            .iter()
            .find(|(id, _)| id == session_id)
            .map(|(_, messages)| messages.clone())
            .unwrap_or_default())
    }

    async fn sessions(&self) -> Result<Vec<String>, ApiError> {
        let mut state = self.state();
        state.calls.push("get_all_sessions".to_string());
        if state.fail_sessions {
            return Err(unavailable());
        }
        Ok(state.sessions.iter().map(|(id, _)| id.clone()).collect())
    }
}
