//! What an operation hands back to its caller and to the activity log

use crate::LogEntry;

/// Outcome of [`crate::Execute::execute`].
///
/// Mutations succeed as `Logged` and carry their audit entry. Reads succeed
/// as `Unlogged`. `Failed` may still carry an entry so rejected mutations
/// show up in the activity log.
pub enum ExecutionResult<T, E> {
    Logged { value: T, log_entry: LogEntry },
    Unlogged { value: T },
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Drop the log entry and keep the outcome
    pub fn into_result(self) -> Result<T, E> {
        self.split().0
    }

    /// Outcome and log entry, for processors that record the entry
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// The audit entry, if there is one
    pub fn log_entry(&self) -> Option<&LogEntry> {
        match self {
            Self::Logged { log_entry, .. } => Some(log_entry),
            Self::Failed { log_entry, .. } => log_entry.as_ref(),
            Self::Unlogged { .. } => None,
        }
    }

    pub fn should_log(&self) -> bool {
        self.log_entry().is_some()
    }

    /// Borrow the error, if the operation failed
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
