//! Results of bulk operations issued as independent per-session requests

use super::ServiceError;
use crate::session::SessionId;

/// Per-session outcome of a bulk operation. The service offers no
/// transaction across the batch, so partial success is reported as is.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub succeeded: Vec<SessionId>,
    pub failed: Vec<(SessionId, ServiceError)>,
}

impl BulkOutcome {
    pub fn from_results(results: impl IntoIterator<Item = (SessionId, Result<(), ServiceError>)>) -> Self {
        let mut outcome = Self::default();
        for (id, result) in results {
            match result {
                Ok(()) => outcome.succeeded.push(id),
                Err(e) => outcome.failed.push((id, e)),
            }
        }
        outcome
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// True when every request in the batch succeeded
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        !self.succeeded.is_empty() && !self.failed.is_empty()
    }

    /// One-line description suitable for a status message
    pub fn describe(&self, action: &str) -> String {
        if self.is_complete() {
            format!("{} {} session(s)", action, self.succeeded.len())
        } else {
            let failed: Vec<String> = self.failed.iter().map(|(id, _)| id.to_string()).collect();
            format!(
                "{} {} of {} session(s); failed: {}",
                action,
                self.succeeded.len(),
                self.total(),
                failed.join(", ")
            )
        }
    }
}
