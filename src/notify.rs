//! Notification channel: dismissible success/error messages for the toast stack.

use chrono::{DateTime, Local, TimeDelta};

use crate::error::AppError;

/// Keep only this many notifications.
const MAX_NOTIFICATIONS: usize = 100;

/// Notification severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

/// A message shown to the user.
#[derive(Clone, Debug)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
    pub created_at: DateTime<Local>,
}

/// Ordered notifications, oldest first.
#[derive(Debug, Default)]
pub struct Notifier {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notification and return its id.
    pub fn push(&mut self, level: Level, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Notification {
            id: self.next_id,
            level,
            message: message.into(),
            created_at: Local::now(),
        });

        if self.items.len() > MAX_NOTIFICATIONS {
            self.items.remove(0);
        }

        self.next_id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Error, message)
    }

    /// Surface an error as a single notification.
    pub fn report(&mut self, err: &AppError) -> u64 {
        tracing::warn!("{err}");
        self.error(err.to_string())
    }

    /// Remove one notification. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    /// Drop notifications older than `ttl` as of `now`.
    pub fn expire(&mut self, ttl: TimeDelta, now: DateTime<Local>) {
        self.items.retain(|n| now - n.created_at < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Messages of a given level, oldest first.
    pub fn messages(&self, level: Level) -> Vec<&str> {
        self.items
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.as_str())
            .collect()
    }
}
