//! Chat view-controller: session bookkeeping plus the operations the UI triggers.

mod chat;
mod state;

pub use chat::{ChatController, SelectError, THINKING};
pub use state::SessionState;
