//! Pure ordering arithmetic for one lane.
//!
//! A [`LaneOrder`] is a lane's items in visual order together with the
//! positions currently stored for them. Moves edit the sequence; renumbering
//! yields the writes that make stored positions equal `0..n` in that order.

use crate::types::ItemId;

/// Stored position of an item that is not yet in this lane
const UNSTORED: i64 = -1;

/// One lane's items in visual order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneOrder {
    entries: Vec<(ItemId, i64)>,
}

impl LaneOrder {
    /// Build from stored `(item, position)` rows.
    ///
    /// Ties on position keep the order given (the store reads by
    /// `position, id`, i.e. insertion order).
    pub fn new(mut entries: Vec<(ItemId, i64)>) -> Self {
        entries.sort_by_key(|&(_, position)| position);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item ids in visual order
    pub fn ids(&self) -> Vec<ItemId> {
        self.entries.iter().map(|&(id, _)| id).collect()
    }

    /// Visual index of `item`
    pub fn index_of(&self, item: ItemId) -> Option<usize> {
        self.entries.iter().position(|&(id, _)| id == item)
    }

    /// Largest stored position, if any
    pub fn max_position(&self) -> Option<i64> {
        self.entries.iter().map(|&(_, p)| p).max()
    }

    /// Take `item` out of the sequence. Returns false if it was not there.
    pub fn remove(&mut self, item: ItemId) -> bool {
        match self.index_of(item) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Put `item` at visual `index`, clamped to `0..=len`.
    ///
    /// An item already in the sequence is moved. Returns the index used.
    pub fn insert(&mut self, item: ItemId, index: usize) -> usize {
        let stored = self
            .index_of(item)
            .map(|i| self.entries.remove(i).1)
            .unwrap_or(UNSTORED);
        let index = index.min(self.entries.len());
        self.entries.insert(index, (item, stored));
        index
    }

    /// Renumber to consecutive positions from 0 in the current order.
    ///
    /// Returns only the `(item, new_position)` pairs whose stored value
    /// changes, so renumbering an already contiguous lane writes nothing.
    pub fn renumber(&mut self) -> Vec<(ItemId, i64)> {
        let mut changes = Vec::new();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            let target = index as i64;
            if entry.1 != target {
                entry.1 = target;
                changes.push((entry.0, target));
            }
        }
        changes
    }

    /// True if stored positions are exactly `0..n` in order
    pub fn is_contiguous(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(index, &(_, position))| position == index as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId::new).collect()
    }

    fn lane(rows: &[(i64, i64)]) -> LaneOrder {
        LaneOrder::new(
            rows.iter()
                .map(|&(id, pos)| (ItemId::new(id), pos))
                .collect(),
        )
    }

    #[test]
    fn test_new_sorts_by_position_keeping_tie_order() {
        let order = lane(&[(3, 5), (1, 0), (2, 5)]);
        assert_eq!(order.ids(), ids(&[1, 3, 2]));
    }

    #[test]
    fn test_move_last_to_front() {
        // A(0) B(1) C(2), move C to 0 => C A B
        let mut order = lane(&[(1, 0), (2, 1), (3, 2)]);
        assert_eq!(order.insert(ItemId::new(3), 0), 0);
        let changes = order.renumber();
        assert_eq!(order.ids(), ids(&[3, 1, 2]));
        assert_eq!(
            changes,
            vec![
                (ItemId::new(3), 0),
                (ItemId::new(1), 1),
                (ItemId::new(2), 2)
            ]
        );
        assert!(order.is_contiguous());
    }

    #[test]
    fn test_move_to_current_index_writes_nothing() {
        let mut order = lane(&[(1, 0), (2, 1), (3, 2)]);
        order.insert(ItemId::new(2), 1);
        assert!(order.renumber().is_empty());
        assert_eq!(order.ids(), ids(&[1, 2, 3]));
    }

    #[test]
    fn test_index_is_clamped() {
        let mut order = lane(&[(1, 0), (2, 1)]);
        assert_eq!(order.insert(ItemId::new(9), 40), 2);
        assert_eq!(order.renumber(), vec![(ItemId::new(9), 2)]);
    }

    #[test]
    fn test_remove_closes_gap() {
        let mut order = lane(&[(1, 0), (2, 1), (3, 2)]);
        assert!(order.remove(ItemId::new(1)));
        assert!(!order.remove(ItemId::new(1)));
        assert_eq!(
            order.renumber(),
            vec![(ItemId::new(2), 0), (ItemId::new(3), 1)]
        );
    }

    #[test]
    fn test_renumber_repairs_gaps_and_duplicates() {
        let mut order = lane(&[(1, 4), (2, 4), (3, 10)]);
        assert!(!order.is_contiguous());
        order.renumber();
        assert!(order.is_contiguous());
        assert_eq!(order.ids(), ids(&[1, 2, 3]));
    }

    #[test]
    fn test_inserted_item_is_always_written() {
        let mut order = LaneOrder::default();
        order.insert(ItemId::new(5), 0);
        assert_eq!(order.renumber(), vec![(ItemId::new(5), 0)]);
        assert_eq!(order.max_position(), Some(0));
    }
}
