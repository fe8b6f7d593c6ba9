//! Plain-text rendering of page contents.

use std::io::{self, Write};

use super::page::{BlockKind, MessageBlock, MessageList, Sidebar};

const USER_LABEL: &str = "you: ";
const BOT_LABEL: &str = "bot: ";
const CONTINUATION: &str = "     ";

/// Write one message block. Returns the number of lines written.
pub fn write_block(out: &mut impl Write, block: &MessageBlock) -> io::Result<usize> {
    let label = match block.kind {
        BlockKind::User => USER_LABEL,
        BlockKind::Bot | BlockKind::Thinking => BOT_LABEL,
    };

    if block.kind == BlockKind::Thinking {
        let text = block.paragraphs.first().map_or("", String::as_str);
        writeln!(out, "{label}{text}...")?;
        return Ok(1);
    }

    if block.paragraphs.is_empty() {
        writeln!(out, "{}", label.trim_end())?;
        return Ok(1);
    }

    for (i, line) in block.paragraphs.iter().enumerate() {
        let prefix = if i == 0 { label } else { CONTINUATION };
        writeln!(out, "{prefix}{line}")?;
    }
    Ok(block.paragraphs.len())
}

/// Write every block of a message list.
pub fn write_transcript(out: &mut impl Write, messages: &MessageList) -> io::Result<()> {
    for block in messages.blocks() {
        write_block(out, block)?;
    }
    Ok(())
}

/// Write the sidebar as a numbered list, marking the active entry with `*`.
pub fn write_sidebar(out: &mut impl Write, sidebar: &Sidebar) -> io::Result<()> {
    if sidebar.items().is_empty() {
        writeln!(out, "No conversations.")?;
        return Ok(());
    }

    for (i, item) in sidebar.items().iter().enumerate() {
        let marker = if item.active { '*' } else { ' ' };
        writeln!(
            out,
            "{marker} {:>2}. {:<33}  {}",
            i + 1,
            item.text,
            item.session_id
        )?;
    }
    Ok(())
}
