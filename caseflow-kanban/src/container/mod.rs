//! Container commands (boards, services)

mod create;
mod delete;
mod get;
mod list;
mod sync;

pub use create::CreateContainer;
pub use delete::DeleteContainer;
pub use get::GetContainer;
pub use list::ListContainers;
pub use sync::SyncContainerPositions;
