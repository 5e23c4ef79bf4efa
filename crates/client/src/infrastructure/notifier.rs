//! Notifier that routes user notices into the tracing log.
//!
//! Headless shells (the CLI, background sync) have no toast area, so notices
//! land in the log at a level matching their severity.

use crate::ports::outbound::{NoticeSeverity, NotifierPort, UserNotice};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotifierPort for TracingNotifier {
    fn notify(&self, notice: UserNotice) {
        match notice.severity {
            NoticeSeverity::Warning => {
                tracing::warn!(target: "eventhub::notice", "{}", notice.message)
            }
            NoticeSeverity::Error => {
                tracing::error!(target: "eventhub::notice", "{}", notice.message)
            }
        }
    }
}
