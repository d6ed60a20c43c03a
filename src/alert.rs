//! Transient user-facing notifications.
//!
//! Only one alert is visible at a time. Each alert gets a time-based id so a
//! scheduled dismissal can tell whether "its" alert is still the one shown.

use web_time::{SystemTime, UNIX_EPOCH};

/// Alert severity, mapped to a CSS modifier and an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// Parse a severity name. Unknown names fall back to [`Severity::Info`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "danger" => Severity::Danger,
            _ => Severity::Info,
        }
    }

    /// Name used in the `alert-{name}` class.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    /// Bootstrap icon name (without the `bi-` prefix and `-fill` suffix).
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "info-circle",
            Severity::Success => "check-circle",
            Severity::Warning => "exclamation-circle",
            Severity::Danger => "exclamation-triangle",
        }
    }
}

/// A notification currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    /// DOM id of the rendered alert element.
    pub fn element_id(&self) -> String {
        format!("alert-{}", self.id)
    }
}

/// Owns the single visible alert.
#[derive(Debug, Default)]
pub struct AlertPresenter {
    current: Option<Alert>,
    last_id: u64,
}

impl AlertPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is shown with a new alert, returning its id.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.show_at(message, severity, now_millis())
    }

    /// Same as [`show`](Self::show) with an explicit timestamp.
    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now_ms: u64) -> u64 {
        // Two alerts in the same millisecond still need distinct ids
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;

        let alert = Alert {
            id,
            severity,
            message: message.into(),
        };
        log::debug!("Alert {} ({}): {}", id, severity.name(), alert.message);
        self.current = Some(alert);
        id
    }

    /// Remove the alert with `id`. No-op if it was already replaced or closed.
    pub fn dismiss(&mut self, id: u64) -> bool {
        match &self.current {
            Some(alert) if alert.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
