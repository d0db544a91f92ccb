//! Drag-and-drop repositioning for case management boards
//!
//! Applications (cases) are organized in two independent families of
//! ordered containers:
//!
//! - **Boards** hold ordered **Lists**
//! - **Services** hold ordered **Stages**
//!
//! An application can sit in one List and one Stage at the same time. Within
//! a lane, application positions are always the contiguous run `0..n`; every
//! reorder, transfer and detach renumbers the lanes it touches inside one
//! SQLite transaction.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use caseflow_kanban::{
//!     application::CreateApplication, board::{AddToList, CreateBoard, TransferToList},
//!     types::{Actor, ContainerView, ItemId}, Execute, KanbanContext,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = KanbanContext::open_path("/var/lib/caseflow/cases.db")?;
//! let owner = Actor::member(7);
//!
//! let board: ContainerView = serde_json::from_value(
//!     CreateBoard::new(owner, "Visa Cases").execute(&ctx).await.into_result()?,
//! )?;
//! let (todo, done) = (board.lanes[0].lane.id, board.lanes[2].lane.id);
//!
//! let created = CreateApplication::new(owner, "H-1B renewal")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//! let case: ItemId = serde_json::from_value(created["id"].clone())?;
//!
//! AddToList::new(owner, case, todo).execute(&ctx).await.into_result()?;
//! TransferToList::new(owner, case, done, 0).execute(&ctx).await.into_result()?;
//! # Ok(())
//! # }
//! ```
//!
//! Run operations through [`KanbanOperationProcessor`] to have them recorded
//! in the activity log.

mod config;
mod context;
pub mod engine;
mod error;
mod processor;
pub mod types;

// Command modules
pub mod application;
pub mod board;
pub mod container;
pub mod item;
pub mod lane;
pub mod service;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Re-export Execute trait and types from operations crate
pub use caseflow_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use config::KanbanConfig;
pub use context::KanbanContext;
pub use error::{ErrorKind, KanbanError, Result};
pub use processor::KanbanOperationProcessor;

// Re-export commonly used types
pub use types::{
    Actor, Application, Boards, Container, ContainerId, ContainerView, Family, ItemId, Lane,
    LaneId, LaneView, Placement, PositionUpdate, Role, Services, TimelineEvent, UserId,
};
