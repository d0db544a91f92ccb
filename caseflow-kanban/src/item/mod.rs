//! Application placement commands: the drag-and-drop surface

mod add;
mod detach;
mod reorder;
mod transfer;

pub use add::AddItemToLane;
pub use detach::DetachItem;
pub use reorder::ReorderItemInLane;
pub use transfer::TransferItem;

use crate::error::{KanbanError, Result};

/// A client-sent visual index. Negative values are rejected, large ones are
/// clamped by the engine.
pub(crate) fn visual_index(index: i64) -> Result<usize> {
    usize::try_from(index).map_err(|_| {
        KanbanError::invalid_value("target_index", format!("{index} must not be negative"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_index() {
        assert_eq!(visual_index(0).unwrap(), 0);
        assert_eq!(visual_index(12).unwrap(), 12);
        assert!(matches!(
            visual_index(-1),
            Err(KanbanError::InvalidValue { .. })
        ));
    }
}
