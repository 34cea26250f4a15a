//! Terminal color utilities using ANSI escape codes.
//!
//! Used for plain-terminal output (the `list` and `run` commands); the
//! full-screen UI styles entries through ratatui instead.

use crate::relay::{LogEntry, Tag};

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
}

use codes::*;

/// Color success messages (green + bold).
pub fn success(text: &str) -> String {
    format!("{}{}{}{}", BOLD, GREEN, text, RESET)
}

/// Color error messages (red + bold).
pub fn error(text: &str) -> String {
    format!("{}{}{}{}", BOLD, RED, text, RESET)
}

/// Color info messages (cyan + bold).
pub fn info(text: &str) -> String {
    format!("{}{}{}{}", BOLD, CYAN, text, RESET)
}

/// Color a label (bold).
pub fn label(text: &str) -> String {
    format!("{}{}{}", BOLD, text, RESET)
}

/// Dim secondary text such as paths.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", DIM, text, RESET)
}

/// Render a log entry with the color of its tag.
pub fn entry(entry: &LogEntry) -> String {
    match entry.tag {
        Tag::Info => info(&entry.text),
        Tag::Success => success(&entry.text),
        Tag::Error => error(&entry.text),
        Tag::Plain => entry.text.clone(),
    }
}

/// Emoji constants for consistent usage
pub mod emoji {
    pub const ZAP: &str = "⚡";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARNING: &str = "⚠️";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_green_bold() {
        let text = success("done");
        assert!(text.contains(GREEN));
        assert!(text.contains(BOLD));
        assert!(text.ends_with(RESET));
    }

    #[test]
    fn test_error_red_bold() {
        let text = error("boom");
        assert!(text.contains(RED));
        assert!(text.contains(BOLD));
    }

    #[test]
    fn test_entry_plain_unchanged() {
        let e = LogEntry::plain("raw \x1b[33mtext\x1b[0m");
        assert_eq!(entry(&e), e.text);
    }

    #[test]
    fn test_entry_info_cyan() {
        let colored = entry(&LogEntry::info("Starting"));
        assert!(colored.starts_with(BOLD));
        assert!(colored.contains(CYAN));
        assert!(colored.contains("Starting"));
    }
}
