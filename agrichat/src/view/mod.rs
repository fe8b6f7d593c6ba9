//! Render targets for the chat controller.
//!
//! A [`Surface`] is what the controller mutates: a message list, a session
//! sidebar and a text input. [`Page`] keeps that state in memory;
//! [`TerminalSurface`] also prints messages as they arrive.

mod page;
mod render;
mod terminal;

pub use page::{BlockId, BlockKind, MessageBlock, MessageList, Page, Sidebar, SidebarItem};
pub use render::{write_sidebar, write_transcript};
pub use terminal::TerminalSurface;

/// The widgets the chat controller drives.
pub trait Surface {
    /// Append a message block and return a handle to it.
    fn append_message(&mut self, kind: BlockKind, content: &str) -> BlockId;

    /// Remove a previously appended block. Unknown handles are ignored.
    fn remove_message(&mut self, id: BlockId);

    /// Remove every message block.
    fn clear_messages(&mut self);

    /// Put a sidebar entry at the top, replacing any entry for the same session.
    fn show_session(&mut self, session_id: &str, preview: &str, active: bool);

    /// Change an entry's preview without moving it.
    fn set_preview(&mut self, session_id: &str, preview: &str);

    /// Remove a sidebar entry.
    fn remove_session(&mut self, session_id: &str);

    /// Mark one entry active and every other entry inactive.
    fn set_active(&mut self, session_id: &str);

    /// Remove every sidebar entry.
    fn clear_sessions(&mut self);

    /// Current text of the input field.
    fn input(&self) -> &str;

    fn set_input(&mut self, text: &str);

    fn clear_input(&mut self);

    /// Everything currently shown.
    fn page(&self) -> &Page;
}
