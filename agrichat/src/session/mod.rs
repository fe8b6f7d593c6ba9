//! Tracking which session the client is in across runs.

mod store;

pub use store::{generate_session_id, resolve_session_id, save_session_id};
