//! Core types for the placement engine

mod actor;
mod container;
mod family;
mod ids;
mod item;

// Re-export all types
pub use actor::{Actor, Role};
pub use container::{Container, ContainerView, Lane, LaneView, PositionUpdate};
pub use family::{Boards, Family, Services};
pub use ids::{ContainerId, EventId, ItemId, LaneId, UserId};
pub use item::{Application, ItemSummary, Placement, TimelineEvent};
