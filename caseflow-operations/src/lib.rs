//! # Caseflow Operations
//!
//! This crate provides the `Operation` trait for defining case-tracking operations.
//! Operations are structs where the fields ARE the parameters - no duplication.
//!
//! ## Example
//!
//! ```ignore
//! use caseflow_operations::*;
//!
//! #[operation(verb = "reorder", noun = "item", description = "Move an item within its lane")]
//! #[derive(Debug, Deserialize)]
//! pub struct ReorderItem {
//!     /// The item to move
//!     pub item_id: i64,
//!     /// Zero-based index in the lane's visual order
//!     pub target_index: i64,
//! }
//!
//! #[async_trait]
//! impl Execute<KanbanContext, KanbanError> for ReorderItem {
//!     async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
//!         // implementation returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod parameter;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use parameter::{ParamMeta, ParamType};
pub use processor::OperationProcessor;

// Re-export proc macros
pub use caseflow_operations_macros::{operation, param};

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
