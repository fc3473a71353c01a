//! Transient notifications shown below a page.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);
const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    fn label(&self) -> &'static str {
        match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "ok",
            ToastLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

/// Bounded queue of toasts with time-based expiry.
#[derive(Debug, Clone)]
pub struct Toasts {
    entries: VecDeque<Toast>,
    ttl: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            ttl,
        }
    }

    /// Adds a toast. Repeating the newest message only refreshes it, so a
    /// failing poll does not flood the queue.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        let message = message.into();
        if let Some(last) = self.entries.back_mut() {
            if last.level == level && last.message == message {
                last.created_at = now;
                return;
            }
        }
        if self.entries.len() == MAX_TOASTS {
            self.entries.pop_front();
        }
        self.entries.push_back(Toast {
            level,
            message,
            created_at: now,
        });
    }

    /// Drops toasts older than the TTL.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|t| now.saturating_duration_since(t.created_at) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|t| format!("[{}] {}", t.level.label(), t.message))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_after_ttl() {
        let start = Instant::now();
        let mut toasts = Toasts::new(Duration::from_secs(5));
        toasts.push(ToastLevel::Error, "boom", start);
        toasts.push(ToastLevel::Info, "later", start + Duration::from_secs(3));

        toasts.prune(start + Duration::from_secs(6));
        assert_eq!(toasts.lines(), vec!["[info] later"]);

        toasts.prune(start + Duration::from_secs(9));
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_repeated_message_refreshes_instead_of_stacking() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push(ToastLevel::Error, "down", start);
        toasts.push(ToastLevel::Error, "down", start + Duration::from_secs(4));
        assert_eq!(toasts.iter().count(), 1);

        toasts.prune(start + Duration::from_secs(6));
        assert_eq!(toasts.iter().count(), 1);
    }

    #[test]
    fn test_queue_is_bounded() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        for i in 0..8 {
            toasts.push(ToastLevel::Info, format!("msg {}", i), now);
        }
        let lines = toasts.lines();
        assert_eq!(lines.len(), MAX_TOASTS);
        assert_eq!(lines[0], "[info] msg 3");
    }
}
