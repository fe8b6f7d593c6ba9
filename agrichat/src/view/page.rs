//! In-memory page model: message list, sidebar and input field.

use crate::models::{paragraphs, truncate_preview, MessageRole};

use super::Surface;

/// Handle to a block in a [`MessageList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(u64);

/// What a message block shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A message from the user.
    User,
    /// A message from the bot.
    Bot,
    /// Transient placeholder while an answer is pending.
    Thinking,
}

impl From<MessageRole> for BlockKind {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => Self::User,
            MessageRole::Bot => Self::Bot,
        }
    }
}

/// One rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBlock {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Non-blank lines of the content, in order.
    pub paragraphs: Vec<String>,
}

/// The scrollable list of messages.
#[derive(Debug, Default)]
pub struct MessageList {
    blocks: Vec<MessageBlock>,
    next_id: u64,
}

impl MessageList {
    pub fn append(&mut self, kind: BlockKind, content: &str) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.push(MessageBlock {
            id,
            kind,
            paragraphs: paragraphs(content),
        });
        id
    }

    pub fn remove(&mut self, id: BlockId) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        self.blocks.len() != before
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn get(&self, id: BlockId) -> Option<&MessageBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn blocks(&self) -> &[MessageBlock] {
        &self.blocks
    }

    pub fn last(&self) -> Option<&MessageBlock> {
        self.blocks.last()
    }
}

/// One session in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub session_id: String,
    /// Preview as displayed, already truncated.
    pub text: String,
    pub active: bool,
}

/// Session list, top entry first.
#[derive(Debug, Default)]
pub struct Sidebar {
    items: Vec<SidebarItem>,
}

impl Sidebar {
    /// Insert an entry at the top, dropping any existing entry for the session.
    pub fn prepend(&mut self, session_id: &str, preview: &str, active: bool) {
        self.remove(session_id);
        self.items.insert(
            0,
            SidebarItem {
                session_id: session_id.to_string(),
                text: truncate_preview(preview),
                active,
            },
        );
    }

    pub fn set_text(&mut self, session_id: &str, preview: &str) -> bool {
        match self.items.iter_mut().find(|i| i.session_id == session_id) {
            Some(item) => {
                item.text = truncate_preview(preview);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, session_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.session_id != session_id);
        self.items.len() != before
    }

    pub fn set_active(&mut self, session_id: &str) {
        for item in &mut self.items {
            item.active = item.session_id == session_id;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, session_id: &str) -> Option<&SidebarItem> {
        self.items.iter().find(|i| i.session_id == session_id)
    }

    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    /// Entries currently marked active.
    pub fn active(&self) -> impl Iterator<Item = &SidebarItem> {
        self.items.iter().filter(|i| i.active)
    }
}

/// Everything the chat view shows.
#[derive(Debug, Default)]
pub struct Page {
    pub messages: MessageList,
    pub sidebar: Sidebar,
    pub input: String,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for Page {
    fn append_message(&mut self, kind: BlockKind, content: &str) -> BlockId {
        self.messages.append(kind, content)
    }

    fn remove_message(&mut self, id: BlockId) {
        self.messages.remove(id);
    }

    fn clear_messages(&mut self) {
        self.messages.clear();
    }

    fn show_session(&mut self, session_id: &str, preview: &str, active: bool) {
        self.sidebar.prepend(session_id, preview, active);
    }

    fn set_preview(&mut self, session_id: &str, preview: &str) {
        self.sidebar.set_text(session_id, preview);
    }

    fn remove_session(&mut self, session_id: &str) {
        self.sidebar.remove(session_id);
    }

    fn set_active(&mut self, session_id: &str) {
        self.sidebar.set_active(session_id);
    }

    fn clear_sessions(&mut self) {
        self.sidebar.clear();
    }

    fn input(&self) -> &str {
        &self.input
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn page(&self) -> &Page {
        self
    }
}
