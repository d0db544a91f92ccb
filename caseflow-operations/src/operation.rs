//! Operation metadata and execution traits

use crate::{ExecutionResult, ParamMeta};
use async_trait::async_trait;
use serde_json::Value;

/// Static description of an operation.
///
/// Implemented by the `#[operation]` attribute macro; the struct fields are
/// the parameters.
pub trait Operation {
    /// The verb (e.g. "move", "create")
    fn verb(&self) -> &'static str;

    /// The noun the verb acts on (e.g. "item", "container")
    fn noun(&self) -> &'static str;

    /// Human readable description
    fn description(&self) -> &'static str;

    /// Parameter metadata derived from the struct fields
    fn parameters(&self) -> &'static [ParamMeta];

    /// Canonical op string used in log entries ("verb noun")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context `C`, failing with `E`.
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
{
    /// Run the operation.
    ///
    /// Mutations return [`ExecutionResult::Logged`], reads return
    /// [`ExecutionResult::Unlogged`].
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogEntry;

    struct Ping;

    impl Operation for Ping {
        fn verb(&self) -> &'static str {
            "ping"
        }

        fn noun(&self) -> &'static str {
            "server"
        }

        fn description(&self) -> &'static str {
            "Ping the server"
        }

        fn parameters(&self) -> &'static [ParamMeta] {
            &[]
        }
    }

    #[async_trait]
    impl Execute<(), String> for Ping {
        async fn execute(&self, _ctx: &()) -> ExecutionResult<Value, String> {
            let value = serde_json::json!({"pong": true});
            ExecutionResult::Logged {
                value: value.clone(),
                log_entry: LogEntry::new(self.op_string(), Value::Null, value, None, 0),
            }
        }
    }

    #[test]
    fn test_op_string() {
        assert_eq!(Ping.op_string(), "ping server");
    }

    #[tokio::test]
    async fn test_execute_logged() {
        let result = Ping.execute(&()).await;
        assert!(result.should_log());
        assert_eq!(result.into_result().unwrap()["pong"], true);
    }
}
