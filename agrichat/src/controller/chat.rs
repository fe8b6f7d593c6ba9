//! The chat controller.
//!
//! Every operation is one or a few backend round trips followed by surface
//! updates. Operations take `&mut self`, so they run one at a time: a second
//! question cannot be sent before the first one is answered.

use futures::future::join_all;
use thiserror::Error;

use crate::api::{AskReply, ChatBackend};
use crate::models::{first_user_message, FALLBACK, LOADING, NEW_CONVERSATION};
use crate::session::generate_session_id;
use crate::view::{BlockKind, Surface};

use super::SessionState;

/// Text of the placeholder shown while an answer is pending.
pub const THINKING: &str = "Thinking";

/// Why a session could not be selected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("unknown session: {0}")]
    UnknownSession(String),
}

/// Mediates between user actions, the chat backend and a surface.
pub struct ChatController<B, S> {
    backend: B,
    surface: S,
    state: SessionState,
    welcome: String,
}

impl<B: ChatBackend, S: Surface> ChatController<B, S> {
    pub fn new(backend: B, surface: S, state: SessionState, welcome: impl Into<String>) -> Self {
        Self {
            backend,
            surface,
            state,
            welcome: welcome.into(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Load the session list and the current session's messages.
    ///
    /// Never fails: without a session list the current session is the only
    /// one, and without history the welcome message is shown.
    pub async fn initialize(&mut self) {
        match self.backend.sessions().await {
            Ok(sessions) if !sessions.is_empty() => {
                tracing::debug!("backend lists {} sessions", sessions.len());
                self.state.replace_known(sessions);
                self.refresh_sidebar().await;
            }
            Ok(_) => self.show_only_current(),
            Err(e) => {
                tracing::error!("failed to load sessions: {e}");
                self.show_only_current();
            }
        }

        self.load_current_chat().await;
    }

    fn show_only_current(&mut self) {
        self.state.replace_known(Vec::new());
        self.surface.clear_sessions();
        self.surface
            .show_session(self.state.current(), NEW_CONVERSATION, true);
    }

    /// Send the text in the input field as a question.
    ///
    /// Returns false without touching anything when the input is blank.
    pub async fn submit(&mut self) -> bool {
        let question = self.surface.input().trim().to_string();
        if question.is_empty() {
            return false;
        }

        self.surface.append_message(BlockKind::User, &question);
        self.surface.clear_input();
        let thinking = self.surface.append_message(BlockKind::Thinking, THINKING);

        let session_id = self.state.current().to_string();
        let result = self.backend.ask(&question, &session_id).await;
        self.surface.remove_message(thinking);

        match result {
            Ok(AskReply::Answer(answer)) => {
                self.surface.append_message(BlockKind::Bot, &answer);
                self.state.track(&session_id);
                self.surface.show_session(&session_id, &question, true);
            }
            Ok(AskReply::Refused(error)) => {
                tracing::warn!("backend refused question in session {session_id}: {error}");
                self.surface
                    .append_message(BlockKind::Bot, &format!("Error: {error}"));
            }
            Err(e) => {
                tracing::error!("failed to ask in session {session_id}: {e}");
                self.surface
                    .append_message(BlockKind::Bot, &format!("Error: {e}"));
            }
        }

        true
    }

    /// Type `question` into the input field and submit it.
    pub async fn ask(&mut self, question: &str) -> bool {
        self.surface.set_input(question);
        self.submit().await
    }

    /// Create a session on the backend and switch to it.
    ///
    /// Returns false, leaving everything as it was, if the backend fails.
    pub async fn new_chat(&mut self) -> bool {
        match self.backend.new_chat().await {
            Ok(session_id) => {
                tracing::info!("started session {session_id}");
                self.start_session(&session_id).await;
                true
            }
            Err(e) => {
                tracing::error!("failed to start new chat: {e}");
                false
            }
        }
    }

    async fn start_session(&mut self, session_id: &str) {
        self.state.adopt(session_id);
        self.refresh_sidebar().await;
        self.surface.clear_messages();
        self.show_welcome();
        self.surface.show_session(session_id, NEW_CONVERSATION, true);
    }

    /// Delete a session. Deleting the current session switches to a new one.
    ///
    /// Returns whether the backend deleted the session.
    pub async fn delete_chat(&mut self, session_id: &str) -> bool {
        match self.backend.delete_chat(session_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("backend did not delete session {session_id}");
                return false;
            }
            Err(e) => {
                tracing::error!("failed to delete session {session_id}: {e}");
                return false;
            }
        }

        tracing::info!("deleted session {session_id}");
        self.state.forget(session_id);
        self.surface.remove_session(session_id);

        if self.state.is_current(session_id) && !self.new_chat().await {
            // The backend creates sessions on first use, so a local id works.
            let replacement = generate_session_id();
            tracing::warn!("continuing in local session {replacement}");
            self.start_session(&replacement).await;
        }

        true
    }

    /// Switch to a known session and show its messages.
    pub async fn select_chat(&mut self, session_id: &str) -> Result<(), SelectError> {
        if self.state.is_current(session_id) {
            return Ok(());
        }
        if !self.state.select(session_id) {
            return Err(SelectError::UnknownSession(session_id.to_string()));
        }

        self.surface.set_active(session_id);
        self.load_current_chat().await;
        Ok(())
    }

    /// Rebuild the sidebar from the known sessions.
    ///
    /// Entries show `Loading...` until their history arrives. Histories are
    /// fetched concurrently and previews are filled in place.
    pub async fn refresh_sidebar(&mut self) {
        let known = self.state.known().to_vec();

        self.surface.clear_sessions();
        for session_id in known.iter().rev() {
            let active = self.state.is_current(session_id);
            self.surface.show_session(session_id, LOADING, active);
        }

        let backend = &self.backend;
        let previews = join_all(known.iter().map(|session_id| async move {
            match backend.history(session_id).await {
                Ok(history) => first_user_message(&history)
                    .unwrap_or(NEW_CONVERSATION)
                    .to_string(),
                Err(e) => {
                    tracing::warn!("failed to load preview for session {session_id}: {e}");
                    FALLBACK.to_string()
                }
            }
        }))
        .await;

        for (session_id, preview) in known.iter().zip(previews) {
            self.surface.set_preview(session_id, &preview);
        }
    }

    async fn load_current_chat(&mut self) {
        let session_id = self.state.current().to_string();

        match self.backend.history(&session_id).await {
            Ok(history) => {
                self.surface.clear_messages();
                if history.is_empty() {
                    self.show_welcome();
                    return;
                }

                for message in &history {
                    self.surface
                        .append_message(message.role.into(), &message.content);
                }
                if let Some(first) = first_user_message(&history) {
                    self.surface.set_preview(&session_id, first);
                }
            }
            Err(e) => {
                tracing::error!("failed to load history for session {session_id}: {e}");
                self.surface.clear_messages();
                self.show_welcome();
            }
        }
    }

    fn show_welcome(&mut self) {
        self.surface.append_message(BlockKind::Bot, &self.welcome);
    }
}
