//! Current-session file.
//!
//! The chat backend identifies a visitor's conversation by a session id it
//! never has to issue up front. The CLI keeps the last one it used in
//! `<data dir>/current-session` so consecutive runs continue the same chat.

use std::path::Path;

use anyhow::{Context, Result};
use uuid::Uuid;

const SESSION_FILE: &str = "current-session";

/// Generate a UUIDv7 (time-ordered, globally unique) session id.
pub fn generate_session_id() -> String {
    Uuid::now_v7().to_string()
}

/// Pick the session to start in.
///
/// Priority order:
/// 1. An explicit id (the `--session` flag)
/// 2. The id saved in the data directory
/// 3. A freshly generated id
pub fn resolve_session_id(explicit: Option<&str>, data_dir: &Path) -> Result<String> {
    if let Some(session_id) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(session_id.to_string());
    }

    if let Some(session_id) = read_session_file(data_dir)? {
        return Ok(session_id);
    }

    let session_id = generate_session_id();
    tracing::debug!("no saved session, starting {session_id}");
    Ok(session_id)
}

/// Read the saved session id, if any.
fn read_session_file(data_dir: &Path) -> Result<Option<String>> {
    let path = data_dir.join(SESSION_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let session_id = content.trim().to_string();

    if session_id.is_empty() {
        return Ok(None);
    }

    Ok(Some(session_id))
}

/// Save the current session id for the next run.
pub fn save_session_id(data_dir: &Path, session_id: &str) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let path = data_dir.join(SESSION_FILE);
    std::fs::write(&path, format!("{session_id}\n"))
        .with_context(|| format!("Failed to write {}", path.display()))
}
