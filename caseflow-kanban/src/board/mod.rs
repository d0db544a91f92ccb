//! Board and List commands
//!
//! The generic container, lane and item commands instantiated for the
//! [`Boards`] family.

use crate::container::{
    CreateContainer, DeleteContainer, GetContainer, ListContainers, SyncContainerPositions,
};
use crate::item::{AddItemToLane, DetachItem, ReorderItemInLane, TransferItem};
use crate::lane::{AddLane, DeleteLane, SyncLanePositions};
use crate::types::Boards;

pub type CreateBoard = CreateContainer<Boards>;
pub type DeleteBoard = DeleteContainer<Boards>;
pub type GetBoard = GetContainer<Boards>;
pub type ListBoards = ListContainers<Boards>;
pub type SyncBoardPositions = SyncContainerPositions<Boards>;

pub type AddList = AddLane<Boards>;
pub type DeleteList = DeleteLane<Boards>;
pub type SyncListPositions = SyncLanePositions<Boards>;

pub type AddToList = AddItemToLane<Boards>;
pub type ReorderInList = ReorderItemInLane<Boards>;
pub type TransferToList = TransferItem<Boards>;
pub type DetachFromBoard = DetachItem<Boards>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Actor;
    use crate::Operation;

    #[test]
    fn test_board_ops_share_the_generic_metadata() {
        let op = TransferToList::new(Actor::member(1), 1, 2, 0);
        assert_eq!(op.op_string(), "transfer item");
        assert!(op.parameters().iter().any(|p| p.matches("index")));
    }
}
