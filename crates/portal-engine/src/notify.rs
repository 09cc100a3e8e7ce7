//! Notification sinks (toasts)

use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

/// Receives the outcome of user-initiated operations
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes notifications to the log only
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "portal::notify", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "portal::notify", "{message}");
    }
}

/// Bounded queue of recent notifications, newest last
pub struct ToastQueue {
    toasts: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl ToastQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            toasts: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    fn push(&self, level: Level, message: &str) {
        let mut toasts = self.toasts.lock().unwrap_or_else(|e| e.into_inner());
        if toasts.len() == self.capacity {
            toasts.pop_front();
        }
        toasts.push_back(Notification {
            level,
            message: message.to_string(),
        });
    }

    pub fn latest(&self) -> Option<Notification> {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .back()
            .cloned()
    }

    pub fn drain(&self) -> Vec<Notification> {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Notifier for ToastQueue {
    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
