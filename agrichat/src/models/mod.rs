//! Data models for chat entities.

mod message;
mod preview;

pub use message::{first_user_message, paragraphs, Message, MessageRole};
pub use preview::{truncate_preview, FALLBACK, LOADING, NEW_CONVERSATION};
