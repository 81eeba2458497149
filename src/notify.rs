//! Notifications
//!
//! The single user-message contract of the client. Only the latest
//! notification is kept; showing a new one replaces it, and each one
//! expires after a level-dependent time-to-live.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

impl Level {
    /// Bootstrap alert class
    pub fn class(&self) -> &'static str {
        match self {
            Level::Success => "alert-success",
            Level::Info => "alert-info",
            Level::Warning => "alert-warning",
            Level::Danger => "alert-danger",
        }
    }

    /// How long a notification of this level stays visible
    pub fn ttl(&self) -> Duration {
        match self {
            Level::Danger | Level::Warning => Duration::seconds(5),
            Level::Success | Level::Info => Duration::seconds(3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// Text as displayed; errors carry a `❌` prefix
    pub fn text(&self) -> String {
        match self.level {
            Level::Danger => format!("❌ {}", self.message),
            _ => self.message.clone(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= self.level.ttl()
    }
}

/// Holds the latest notification
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current notification
    pub fn show(&mut self, notification: Notification) {
        match notification.level {
            Level::Danger => tracing::warn!(message = %notification.message, "Notify"),
            _ => tracing::debug!(message = %notification.message, "Notify"),
        }
        self.current = Some(notification);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(Notification::new(Level::Success, message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(Notification::new(Level::Info, message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.show(Notification::new(Level::Warning, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(Notification::new(Level::Danger, message));
    }

    /// Latest notification, expired or not
    pub fn latest(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Latest notification if still visible at `now`
    pub fn visible(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.current.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Drop the notification once its time-to-live has passed
    pub fn expire(&mut self, now: DateTime<Utc>) {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Hand the latest notification over to a display that owns its expiry
    pub fn take(&mut self) -> Option<Notification> {
        self.current.take()
    }
}
