//! Operation processor that records activity in the store

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::Actor;
use async_trait::async_trait;
use caseflow_operations::{ExecutionResult, LogEntry, OperationProcessor};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// Runs kanban operations and appends their log entries to the activity log
#[derive(Debug, Clone, Default)]
pub struct KanbanOperationProcessor {
    actor: Option<String>,
}

impl KanbanOperationProcessor {
    /// Processor without a default actor
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute entries that carry no actor of their own to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }
}

#[async_trait]
impl OperationProcessor<KanbanContext, KanbanError> for KanbanOperationProcessor {
    fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    async fn record(&self, ctx: &KanbanContext, entry: &LogEntry) -> Result<()> {
        ctx.append_activity(entry).await
    }
}

/// Normalized operation input for a log entry, tagged with its family
pub(crate) fn log_input<T: Serialize>(op: &T, family: &str) -> Value {
    let mut input = serde_json::to_value(op).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut input {
        map.insert("family".into(), Value::String(family.into()));
    }
    input
}

/// Wrap a mutating operation's result with its log entry
pub(crate) fn logged(
    op: String,
    input: Value,
    actor: &Actor,
    started: Instant,
    result: Result<Value>,
) -> ExecutionResult<Value, KanbanError> {
    let duration_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(value) => ExecutionResult::Logged {
            log_entry: LogEntry::new(op, input, value.clone(), Some(actor.to_string()), duration_ms),
            value,
        },
        Err(error) => ExecutionResult::Failed {
            log_entry: Some(
                LogEntry::failure(op, input, &error.to_string(), duration_ms)
                    .with_actor(actor.to_string()),
            ),
            error,
        },
    }
}

/// Wrap a read-only operation's result
pub(crate) fn unlogged(result: Result<Value>) -> ExecutionResult<Value, KanbanError> {
    match result {
        Ok(value) => ExecutionResult::Unlogged { value },
        Err(error) => ExecutionResult::Failed {
            error,
            log_entry: None,
        },
    }
}
