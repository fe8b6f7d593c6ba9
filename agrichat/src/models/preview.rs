//! Sidebar preview text for a session.

/// Previews longer than this many characters are cut.
pub const PREVIEW_MAX_CHARS: usize = 30;

/// Preview shown for a session without user messages.
pub const NEW_CONVERSATION: &str = "New conversation";

/// Preview shown while a session's history is being fetched.
pub const LOADING: &str = "Loading...";

/// Preview shown when a session's history could not be fetched.
pub const FALLBACK: &str = "Chat session";

/// Render preview text for the sidebar.
///
/// Text over [`PREVIEW_MAX_CHARS`] characters keeps its first
/// [`PREVIEW_MAX_CHARS`] characters followed by `...`; shorter text is
/// returned verbatim.
pub fn truncate_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
