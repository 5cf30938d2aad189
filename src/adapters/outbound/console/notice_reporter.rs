use crate::ports::outbound::NoticeReporter;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// ConsoleNoticeReporter adapter printing notices to stderr
///
/// Notices are colored only when stderr is a terminal.
pub struct ConsoleNoticeReporter {
    colored: bool,
}

impl ConsoleNoticeReporter {
    pub fn new() -> Self {
        Self {
            colored: std::io::stderr().is_terminal(),
        }
    }

    fn render(&self, message: &str) -> String {
        if self.colored {
            format!("{} {}", "⚠️".yellow(), message.yellow().bold())
        } else {
            format!("⚠️ {}", message)
        }
    }
}

impl Default for ConsoleNoticeReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeReporter for ConsoleNoticeReporter {
    fn notify(&self, message: &str) {
        eprintln!("{}", self.render(message));
    }
}
