//! User-facing alert messages.
//!
//! Every failed user action pushes exactly one alert. Alerts are shown one at
//! a time in a modal window until dismissed.

use std::collections::VecDeque;

/// Category of the action that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Graph node edit was rejected
    Edit,
    /// Graph file could not be imported
    Import,
    /// Graph file could not be exported
    Export,
}

impl AlertKind {
    /// Window title for this kind of alert.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Edit => "Cannot save node",
            Self::Import => "Import failed",
            Self::Export => "Export failed",
        }
    }
}

/// A single pending alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// FIFO of alerts waiting to be acknowledged.
#[derive(Debug, Default)]
pub struct AlertQueue {
    pending: VecDeque<Alert>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an alert and logs it.
    pub fn push(&mut self, kind: AlertKind, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}: {}", kind.title(), message);
        self.pending.push_back(Alert { kind, message });
    }

    /// The alert currently on screen, if any.
    pub fn current(&self) -> Option<&Alert> {
        self.pending.front()
    }

    /// Acknowledges the current alert.
    pub fn dismiss(&mut self) {
        self.pending.pop_front();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts_shown_in_order() {
        let mut alerts = AlertQueue::new();
        alerts.push(AlertKind::Import, "first");
        alerts.push(AlertKind::Edit, "second");

        assert_eq!(alerts.current().map(|a| a.message.as_str()), Some("first"));
        alerts.dismiss();
        assert_eq!(alerts.current().map(|a| a.kind), Some(AlertKind::Edit));
        assert_eq!(alerts.pending_count(), 1);
        alerts.dismiss();
        assert!(alerts.current().is_none());
    }

    #[test]
    fn test_dismiss_empty_is_noop() {
        let mut alerts = AlertQueue::new();
        alerts.dismiss();
        assert!(alerts.current().is_none());
        assert_eq!(alerts.pending_count(), 0);
    }
}
