//! Applications and their placement within one family

use super::ids::{ContainerId, EventId, ItemId, LaneId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An application (case) as far as the engine is concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ItemId,
    pub owner_id: UserId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Where an application sits within one family.
///
/// `lane_id` set implies `container_id` set; `container_id` unset implies
/// `lane_id` unset and `position == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub item_id: ItemId,
    pub owner_id: UserId,
    pub container_id: Option<ContainerId>,
    pub lane_id: Option<LaneId>,
    pub position: i64,
}

impl Placement {
    /// Unassigned in this family
    pub fn is_detached(&self) -> bool {
        self.container_id.is_none() && self.lane_id.is_none() && self.position == 0
    }
}

/// Compact item entry inside a lane view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub title: String,
    pub position: i64,
}

/// A note on an application's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: EventId,
    pub application_id: ItemId,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub created_at: DateTime<Utc>,
}
