//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// agrichat - talk to the Agricultural Disease Expert from your terminal
#[derive(Parser, Debug)]
#[command(name = "agrichat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the chat backend
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Session ID to start in (defaults to the last one used)
    #[arg(short, long, global = true)]
    pub session: Option<String>,

    /// Config file (defaults to ~/.agrichat/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (defaults to `chat`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactive chat (default)
    Chat,

    /// Ask a single question in the current session
    Ask {
        /// Question to ask
        #[arg(trailing_var_arg = true, required = true)]
        question: Vec<String>,
    },

    /// List conversations
    Sessions,

    /// Show the messages of a conversation
    History {
        /// Session ID or list position (defaults to the current session)
        id: Option<String>,
    },

    /// Start a new conversation
    New,

    /// Delete a conversation
    Delete {
        /// Session ID or list position
        id: String,
    },
}
