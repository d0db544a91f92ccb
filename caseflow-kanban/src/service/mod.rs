//! Service and Stage commands
//!
//! The generic container, lane and item commands instantiated for the
//! [`Services`] family.

use crate::container::{
    CreateContainer, DeleteContainer, GetContainer, ListContainers, SyncContainerPositions,
};
use crate::item::{AddItemToLane, DetachItem, ReorderItemInLane, TransferItem};
use crate::lane::{AddLane, DeleteLane, SyncLanePositions};
use crate::types::Services;

pub type CreateService = CreateContainer<Services>;
pub type DeleteService = DeleteContainer<Services>;
pub type GetService = GetContainer<Services>;
pub type ListServices = ListContainers<Services>;
pub type SyncServicePositions = SyncContainerPositions<Services>;

pub type AddStage = AddLane<Services>;
pub type DeleteStage = DeleteLane<Services>;
pub type SyncStagePositions = SyncLanePositions<Services>;

pub type AddToStage = AddItemToLane<Services>;
pub type ReorderInStage = ReorderItemInLane<Services>;
pub type TransferToStage = TransferItem<Services>;
pub type DetachFromService = DetachItem<Services>;
