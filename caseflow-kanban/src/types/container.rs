//! Containers (boards, services) and their lanes (lists, stages)

use super::ids::{ContainerId, LaneId, UserId};
use super::item::ItemSummary;
use serde::{Deserialize, Serialize};

/// Names of the lanes every new container starts with, in order
pub const DEFAULT_LANES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// A board or service, owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub owner_id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub is_starred: bool,
    pub position: i64,
}

impl Container {
    /// Lane names seeded into a freshly created container
    pub fn default_lanes() -> &'static [&'static str] {
        &DEFAULT_LANES
    }
}

/// A list or stage inside a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub id: LaneId,
    pub container_id: ContainerId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub position: i64,
}

/// A lane together with its items in visual order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneView {
    #[serde(flatten)]
    pub lane: Lane,
    pub items: Vec<ItemSummary>,
}

impl LaneView {
    /// Item ids in visual order
    pub fn item_ids(&self) -> Vec<super::ItemId> {
        self.items.iter().map(|i| i.id).collect()
    }
}

/// Canonical persisted state of one container.
///
/// Clients resynchronize to this after a failed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerView {
    pub family: String,
    pub container: Container,
    pub lanes: Vec<LaneView>,
}

/// One row of a position batch sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate<Id> {
    pub id: Id,
    pub position: i64,
}

impl<Id> PositionUpdate<Id> {
    pub fn new(id: impl Into<Id>, position: i64) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}
