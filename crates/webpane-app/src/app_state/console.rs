//! Message console log logic.
//!
//! The chrome WebView renders the console; this struct owns the bounded log
//! and the local send rules: blank input is rejected outright, and sending
//! with no bridge attached records a diagnostic instead of forwarding.

use std::collections::VecDeque;

/// Maximum visible log length; oldest entries are evicted first.
pub(super) const CONSOLE_LOG_CAPACITY: usize = 1000;

/// Direction tag shown next to each log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Direction {
    ToPage,
    FromPage,
    System,
}

impl Direction {
    pub(super) fn label(self) -> &'static str {
        match self {
            Direction::ToPage => "host → page",
            Direction::FromPage => "page → host",
            Direction::System => "system",
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct ConsoleEntry {
    /// `HH:MM:SS` wall-clock time the entry was logged.
    pub timestamp: String,
    pub direction: Direction,
    pub text: String,
}

/// Outcome of a console send attempt.
#[derive(Debug)]
pub(super) enum SendOutcome {
    /// Forward this payload over the bridge.
    Forward(String),
    /// Blank input; nothing happened.
    Blank,
    /// No bridge attached; a diagnostic entry was logged instead.
    NotAttached(ConsoleEntry),
}

pub(super) struct MessageConsole {
    entries: VecDeque<ConsoleEntry>,
    capacity: usize,
    attached: bool,
}

impl MessageConsole {
    pub fn new() -> Self {
        Self::with_capacity(CONSOLE_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            attached: false,
        }
    }

    /// Record whether a bridge is attached. Transitions log a system entry.
    pub fn set_attached(&mut self, attached: bool) -> Option<ConsoleEntry> {
        if self.attached == attached {
            return None;
        }
        self.attached = attached;
        let text = if attached {
            "message channel connected"
        } else {
            "message channel disconnected"
        };
        Some(self.push(Direction::System, text))
    }

    /// Validate a console send. The successful payload is returned for
    /// forwarding; the host→page log entry is written later, when the bridge
    /// reports the dispatch.
    pub fn send(&mut self, text: &str) -> SendOutcome {
        let payload = text.trim();
        if payload.is_empty() {
            return SendOutcome::Blank;
        }
        if !self.attached {
            let entry = self.push(Direction::System, "cannot send: engine pane not available");
            return SendOutcome::NotAttached(entry);
        }
        SendOutcome::Forward(payload.to_string())
    }

    pub fn push_outgoing(&mut self, text: &str) -> ConsoleEntry {
        self.push(Direction::ToPage, text)
    }

    pub fn push_incoming(&mut self, text: &str) -> ConsoleEntry {
        self.push(Direction::FromPage, text)
    }

    pub fn push_system(&mut self, text: &str) -> ConsoleEntry {
        self.push(Direction::System, text)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ConsoleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, direction: Direction, text: &str) -> ConsoleEntry {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        let entry = ConsoleEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            direction,
            text: text.to_string(),
        };
        self.entries.push_back(entry.clone());
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_send_is_rejected_without_logging() {
        let mut console = MessageConsole::new();
        console.set_attached(true);
        let before = console.len();
        assert!(matches!(console.send(""), SendOutcome::Blank));
        assert!(matches!(console.send("   "), SendOutcome::Blank));
        assert_eq!(console.len(), before);
    }

    #[test]
    fn send_without_bridge_logs_diagnostic() {
        let mut console = MessageConsole::new();
        match console.send("hello") {
            SendOutcome::NotAttached(entry) => {
                assert_eq!(entry.direction, Direction::System);
                assert!(entry.text.contains("cannot send"));
            }
            other => panic!("expected NotAttached, got {other:?}"),
        }
        assert_eq!(console.len(), 1);
    }

    #[test]
    fn send_with_bridge_forwards_trimmed_payload() {
        let mut console = MessageConsole::new();
        console.set_attached(true);
        match console.send("  hello  ") {
            SendOutcome::Forward(payload) => assert_eq!(payload, "hello"),
            other => panic!("expected Forward, got {other:?}"),
        }
    }

    #[test]
    fn attach_transitions_log_once() {
        let mut console = MessageConsole::new();
        assert!(console.set_attached(true).is_some());
        assert!(console.set_attached(true).is_none());
        assert!(console.set_attached(false).is_some());
        assert_eq!(console.len(), 2);
    }

    #[test]
    fn log_is_bounded_and_evicts_oldest() {
        let mut console = MessageConsole::with_capacity(3);
        console.push_incoming("one");
        console.push_incoming("two");
        console.push_incoming("three");
        console.push_incoming("four");
        assert_eq!(console.len(), 3);
        let texts: Vec<_> = console.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three", "four"]);
    }

    #[test]
    fn directions_carry_labels() {
        let mut console = MessageConsole::new();
        let entry = console.push_outgoing("x");
        assert_eq!(entry.direction.label(), "host → page");
        let entry = console.push_incoming("y");
        assert_eq!(entry.direction.label(), "page → host");
    }
}
