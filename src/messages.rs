//! User-facing message log.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogLine {
    pub time: DateTime<Local>,
    pub level: Level,
    pub text: String,
}

/// Messages produced by commands, waiting to be rendered.
#[derive(Debug, Default)]
pub struct MessageLog {
    lines: Vec<LogLine>,
}

impl MessageLog {
    pub fn push(&mut self, level: Level, text: impl Into<String>) {
        self.lines.push(LogLine {
            time: Local::now(),
            level,
            text: text.into(),
        });
    }

    pub fn last(&self) -> Option<&LogLine> {
        self.lines.last()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Take all pending lines, oldest first.
    pub fn drain(&mut self) -> Vec<LogLine> {
        std::mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_log() {
        let mut log = MessageLog::default();
        log.push(Level::Info, "one");
        log.push(Level::Error, "two");
        assert_eq!(log.last().unwrap().text, "two");

        let lines = log.drain();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, Level::Info);
        assert!(log.is_empty());
    }
}
