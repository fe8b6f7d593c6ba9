//! Surface that prints the conversation to a terminal as it changes.

use std::io::Write;

use super::page::{BlockId, BlockKind, Page};
use super::render::write_block;
use super::Surface;

/// ANSI: move the cursor up `n` lines and clear to the end of the screen.
fn erase_lines(n: usize) -> String {
    format!("\x1b[{n}A\x1b[J")
}

/// A [`Page`] that echoes message changes to a writer.
///
/// Placeholders are only printed when the writer understands ANSI escapes,
/// since removing them means erasing their line.
pub struct TerminalSurface<W: Write> {
    page: Page,
    out: W,
    ansi: bool,
    echo: bool,
    /// Last block printed and how many lines it took.
    last_printed: Option<(BlockId, usize)>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, ansi: bool) -> Self {
        Self {
            page: Page::new(),
            out,
            ansi,
            echo: true,
            last_printed: None,
        }
    }

    /// Turn printing on or off. The page is kept up to date either way.
    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    /// The underlying writer.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn print(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!("failed to write to terminal: {e}");
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn append_message(&mut self, kind: BlockKind, content: &str) -> BlockId {
        let id = self.page.append_message(kind, content);
        if !self.echo || (kind == BlockKind::Thinking && !self.ansi) {
            return id;
        }

        let Some(block) = self.page.messages.get(id) else {
            return id;
        };
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let lines = write_block(&mut buf, block).unwrap_or(0);
        self.print(&String::from_utf8_lossy(&buf));
        self.last_printed = Some((id, lines));
        id
    }

    fn remove_message(&mut self, id: BlockId) {
        self.page.remove_message(id);
        if let Some((last, lines)) = self.last_printed {
            if last == id {
                self.last_printed = None;
                if self.echo && self.ansi {
                    self.print(&erase_lines(lines));
                }
            }
        }
    }

    fn clear_messages(&mut self) {
        self.page.clear_messages();
        self.last_printed = None;
        if self.echo {
            self.print(&format!("{}\n", "-".repeat(40)));
        }
    }

    fn show_session(&mut self, session_id: &str, preview: &str, active: bool) {
        self.page.show_session(session_id, preview, active);
    }

    fn set_preview(&mut self, session_id: &str, preview: &str) {
        self.page.set_preview(session_id, preview);
    }

    fn remove_session(&mut self, session_id: &str) {
        self.page.remove_session(session_id);
    }

    fn set_active(&mut self, session_id: &str) {
        self.page.set_active(session_id);
    }

    fn clear_sessions(&mut self) {
        self.page.clear_sessions();
    }

    fn input(&self) -> &str {
        self.page.input()
    }

    fn set_input(&mut self, text: &str) {
        self.page.set_input(text);
    }

    fn clear_input(&mut self) {
        self.page.clear_input();
    }

    fn page(&self) -> &Page {
        &self.page
    }
}
