//! Line commands understood by the interactive chat.

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text: a question.
    Ask(String),
    New,
    Delete(String),
    Select(String),
    Sessions,
    History,
    Help,
    Quit,
    /// A known command used wrong; holds its usage line.
    Usage(&'static str),
    /// An unrecognized slash command.
    Unknown(String),
}

pub const HELP: &str = "\
Type a question and press Enter. Commands:
  /new              start a new conversation
  /sessions         list conversations (* marks the current one)
  /select <id|#>    switch to a conversation
  /delete <id|#>    delete a conversation
  /history          show the current conversation again
  /help             show this help
  /quit             leave";

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Ask(line.to_string());
        };

        let (name, arg) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, arg)| (name, arg.trim()));

        match (name, arg) {
            ("new", _) => Self::New,
            ("sessions" | "ls", _) => Self::Sessions,
            ("history", _) => Self::History,
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit" | "q", _) => Self::Quit,
            ("select" | "open", "") => Self::Usage("/select <id|#>"),
            ("select" | "open", arg) => Self::Select(arg.to_string()),
            ("delete" | "rm", "") => Self::Usage("/delete <id|#>"),
            ("delete" | "rm", arg) => Self::Delete(arg.to_string()),
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}
