//! Lane commands (lists, stages)

mod add;
mod delete;
mod sync;

pub use add::AddLane;
pub use delete::DeleteLane;
pub use sync::SyncLanePositions;
