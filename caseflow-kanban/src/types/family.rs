//! Container/lane families.
//!
//! Applications are placed on Boards (in Lists) and, independently, in
//! Services (in Stages). Both families share one repositioning engine; a
//! [`Family`] tells the engine which tables and columns to touch.

/// Static description of one container/lane/item family
pub trait Family: Copy + Default + std::fmt::Debug + Send + Sync + 'static {
    /// Lower-case container noun, e.g. "board"
    const CONTAINER: &'static str;
    /// Lower-case lane noun, e.g. "list"
    const LANE: &'static str;
    /// Capitalized container noun for timeline notes
    const CONTAINER_LABEL: &'static str;
    /// Capitalized lane noun for timeline notes
    const LANE_LABEL: &'static str;

    /// Container table
    const CONTAINER_TABLE: &'static str;
    /// Lane table
    const LANE_TABLE: &'static str;
    /// Lane column referencing its container
    const LANE_CONTAINER_COLUMN: &'static str;

    /// Application column referencing the container
    const ITEM_CONTAINER_COLUMN: &'static str;
    /// Application column referencing the lane
    const ITEM_LANE_COLUMN: &'static str;
    /// Application column holding the ordering key within the lane
    const ITEM_POSITION_COLUMN: &'static str;
}

/// Boards and their Lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boards;

impl Family for Boards {
    const CONTAINER: &'static str = "board";
    const LANE: &'static str = "list";
    const CONTAINER_LABEL: &'static str = "Board";
    const LANE_LABEL: &'static str = "List";

    const CONTAINER_TABLE: &'static str = "boards";
    const LANE_TABLE: &'static str = "lists";
    const LANE_CONTAINER_COLUMN: &'static str = "board_id";

    const ITEM_CONTAINER_COLUMN: &'static str = "board_id";
    const ITEM_LANE_COLUMN: &'static str = "list_id";
    const ITEM_POSITION_COLUMN: &'static str = "board_position";
}

/// Services and their Stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Services;

impl Family for Services {
    const CONTAINER: &'static str = "service";
    const LANE: &'static str = "stage";
    const CONTAINER_LABEL: &'static str = "Service";
    const LANE_LABEL: &'static str = "Stage";

    const CONTAINER_TABLE: &'static str = "services";
    const LANE_TABLE: &'static str = "stages";
    const LANE_CONTAINER_COLUMN: &'static str = "service_id";

    const ITEM_CONTAINER_COLUMN: &'static str = "service_id";
    const ITEM_LANE_COLUMN: &'static str = "stage_id";
    const ITEM_POSITION_COLUMN: &'static str = "service_position";
}
