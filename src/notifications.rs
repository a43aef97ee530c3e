//! Notifications
//!
//! Short-lived messages describing the outcome of the last cart mutation.
//! A notification becomes visible when shown and hides itself once its
//! display duration has elapsed, or earlier when dismissed. Showing a new
//! notification replaces the previous one together with its deadline, so a
//! stale deadline never hides a newer message.

use std::{
    fmt,
    time::{Duration, Instant},
};

use serde::Serialize;

use crate::clock::Clock;

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// The action succeeded
    #[default]
    Success,

    /// Neutral information
    Info,

    /// Something needs attention
    Warning,

    /// The action failed
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Snapshot of the notification state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,

    /// Display message
    pub message: String,

    /// Whether the notification should currently be shown
    pub visible: bool,
}

/// Owner of the current notification and its hide deadline.
#[derive(Debug)]
pub struct Notifier<C> {
    clock: C,
    duration: Duration,
    kind: NotificationKind,
    message: String,
    hides_at: Option<Instant>,
}

impl<C: Clock> Notifier<C> {
    /// Creates a hidden notifier.
    pub fn new(clock: C, duration: Duration) -> Self {
        Self {
            clock,
            duration,
            kind: NotificationKind::default(),
            message: String::new(),
            hides_at: None,
        }
    }

    /// Shows a notification, replacing any current one and its deadline.
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.kind = kind;
        self.message = message.into();
        self.hides_at = Some(self.clock.now() + self.duration);
    }

    /// Hides the current notification immediately.
    pub fn dismiss(&mut self) {
        self.hides_at = None;
    }

    /// Returns true while the current notification is within its display window.
    pub fn is_visible(&self) -> bool {
        self.hides_at
            .is_some_and(|deadline| self.clock.now() < deadline)
    }

    /// The instant the visible notification will hide, if one is visible.
    pub fn hides_at(&self) -> Option<Instant> {
        self.hides_at.filter(|_| self.is_visible())
    }

    /// Returns a snapshot of the current notification.
    pub fn current(&self) -> Notification {
        Notification {
            kind: self.kind,
            message: self.message.clone(),
            visible: self.is_visible(),
        }
    }

    /// The configured display duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}
