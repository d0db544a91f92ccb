//! Operation processor - runs operations and persists their log entries

use crate::{Execute, LogEntry};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Display;
use tracing::warn;

/// Runs operations against a context and records what they did.
///
/// Implementations decide where log entries go. The default
/// [`OperationProcessor::process`] executes the operation, attaches the
/// processor's actor to the log entry when the operation did not set one,
/// hands the entry to [`OperationProcessor::record`], and returns the plain
/// result.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send + Display,
{
    /// Actor attributed to log entries that do not carry their own
    fn actor(&self) -> Option<&str>;

    /// Persist a log entry
    async fn record(&self, ctx: &C, entry: &LogEntry) -> Result<(), E>;

    /// Execute an operation and record its log entry, if any.
    ///
    /// The operation's own outcome is what the caller gets back. An
    /// operation has already committed by the time its entry is recorded,
    /// so a failure to record is logged and does not turn a saved change
    /// into an error.
    async fn process<O>(&self, op: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E> + 'static,
    {
        let (result, entry) = op.execute(ctx).await.split();

        if let Some(mut entry) = entry {
            if entry.actor.is_none() {
                if let Some(actor) = self.actor() {
                    entry.actor = Some(actor.to_string());
                }
            }
            if let Err(error) = self.record(ctx, &entry).await {
                warn!(op = %entry.op, id = %entry.id, %error, "failed to record activity");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExecutionResult, Operation, ParamMeta};
    use std::sync::Mutex;

    struct Rename;

    impl Operation for Rename {
        fn verb(&self) -> &'static str {
            "rename"
        }

        fn noun(&self) -> &'static str {
            "lane"
        }

        fn description(&self) -> &'static str {
            "Rename a lane"
        }

        fn parameters(&self) -> &'static [ParamMeta] {
            &[]
        }
    }

    #[async_trait]
    impl Execute<(), String> for Rename {
        async fn execute(&self, _ctx: &()) -> ExecutionResult<Value, String> {
            let value = serde_json::json!({"name": "Review"});
            ExecutionResult::Logged {
                value: value.clone(),
                log_entry: LogEntry::new(self.op_string(), Value::Null, value, None, 1),
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        entries: Mutex<Vec<LogEntry>>,
        broken: bool,
    }

    #[async_trait]
    impl OperationProcessor<(), String> for Recorder {
        fn actor(&self) -> Option<&str> {
            Some("intake")
        }

        async fn record(&self, _ctx: &(), entry: &LogEntry) -> Result<(), String> {
            if self.broken {
                return Err("activity store unavailable".into());
            }
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_process_records_with_fallback_actor() {
        let recorder = Recorder::default();
        let value = recorder.process(&Rename, &()).await.unwrap();
        assert_eq!(value["name"], "Review");

        let entries = recorder.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].op, "rename lane");
        assert_eq!(entries[0].actor.as_deref(), Some("intake"));
    }

    #[tokio::test]
    async fn test_record_failure_keeps_operation_result() {
        let recorder = Recorder {
            broken: true,
            ..Recorder::default()
        };
        let value = recorder.process(&Rename, &()).await.unwrap();
        assert_eq!(value["name"], "Review");
        assert!(recorder.entries.lock().unwrap().is_empty());
    }
}
