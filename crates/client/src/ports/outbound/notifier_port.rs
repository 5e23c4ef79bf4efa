//! Notifier Port - user-visible, dismissible messages

use std::fmt;

/// How prominently a UI shell should present a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Warning,
    Error,
}

impl fmt::Display for NoticeSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeSeverity::Warning => "warning",
            NoticeSeverity::Error => "error",
        };
        f.write_str(label)
    }
}

/// A message meant for the end user, not the operator log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl UserNotice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait NotifierPort: Send + Sync {
    fn notify(&self, notice: UserNotice);
}
