use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity of a user-visible status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// A transient status-line message shown in the chrome.
#[derive(Debug, Clone)]
pub struct StatusNotice {
    pub level: StatusLevel,
    pub text: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl StatusNotice {
    /// Creates an info notice with a 5-second TTL.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
            created_at: Instant::now(),
            ttl: Duration::from_secs(5),
        }
    }

    /// Creates an error notice with an 8-second TTL.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
            created_at: Instant::now(),
            ttl: Duration::from_secs(8),
        }
    }

    /// Returns `true` once this notice has exceeded its TTL.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    /// TTL in milliseconds, for forwarding to the chrome UI.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl.as_millis() as u64
    }
}

/// A bounded queue of status notices that auto-evicts expired entries.
/// The newest non-expired notice is the one the chrome displays.
#[derive(Debug)]
pub struct StatusLine {
    items: VecDeque<StatusNotice>,
    capacity: usize,
}

impl StatusLine {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a notice, evicting expired entries first.
    /// If still at capacity after eviction, the oldest entry is removed.
    pub fn push(&mut self, notice: StatusNotice) {
        self.evict_expired();
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notice);
    }

    /// The notice the status line should currently show.
    pub fn current(&mut self) -> Option<&StatusNotice> {
        self.evict_expired();
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn evict_expired(&mut self) {
        self.items.retain(|n| !n.is_expired());
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(16)
    }
}
