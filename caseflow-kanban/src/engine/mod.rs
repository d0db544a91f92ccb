//! The repositioning engine.
//!
//! One generic implementation serves both families. Every method runs on a
//! connection that the caller has already put inside a write transaction
//! (see [`crate::KanbanContext::write`]); the engine never commits.
//!
//! Positions inside a lane are kept contiguous: every path that adds,
//! moves or removes an application renumbers the affected lanes to
//! `0..n` in visual order.

mod ordering;
pub(crate) mod rows;
mod structure;

pub use ordering::LaneOrder;
pub use structure::SyncReport;
pub(crate) use structure::validate_positions;

use crate::error::{KanbanError, Result};
use crate::types::{
    Actor, Container, ContainerId, Family, ItemId, Lane, LaneId, LaneView, Placement,
};
use rusqlite::Connection;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Result of a cross-lane transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Lane the application left, if it had one
    pub source: Option<LaneId>,
    /// Lane the application is now in
    pub target: LaneId,
    /// Visual index it landed on
    pub index: usize,
}

/// Repositioning engine for family `F`, bound to one transaction
pub struct RepositioningEngine<'c, F: Family> {
    conn: &'c Connection,
    family: PhantomData<F>,
}

impl<'c, F: Family> RepositioningEngine<'c, F> {
    /// Bind to an open transaction (or any connection, for reads)
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            family: PhantomData,
        }
    }

    pub(crate) fn conn(&self) -> &'c Connection {
        self.conn
    }

    // =========================================================================
    // Scope checks
    // =========================================================================

    /// Load a container the actor may act on
    pub fn authorized_container(&self, actor: &Actor, id: ContainerId) -> Result<Container> {
        let container = rows::container::<F>(self.conn, id)?;
        if !actor.may_act_for(container.owner_id) {
            warn!(%actor, container = %id, family = F::CONTAINER, "container access denied");
            return Err(KanbanError::unauthorized(F::CONTAINER, id));
        }
        Ok(container)
    }

    /// Load a lane (and its container) the actor may act on
    pub fn authorized_lane(&self, actor: &Actor, id: LaneId) -> Result<(Lane, Container)> {
        let lane = rows::lane::<F>(self.conn, id)?;
        let container = rows::container::<F>(self.conn, lane.container_id)?;
        if !actor.may_act_for(container.owner_id) {
            warn!(%actor, lane = %id, family = F::CONTAINER, "lane access denied");
            return Err(KanbanError::unauthorized(F::LANE, id));
        }
        Ok((lane, container))
    }

    /// Whether the actor can reach an application placed as `placement`.
    ///
    /// Reachable means: placed in a container the actor may act on, or
    /// unplaced in this family and owned by the actor. Staff and admins reach
    /// everything.
    pub fn can_reach(&self, actor: &Actor, placement: &Placement) -> Result<bool> {
        if actor.role.is_privileged() {
            return Ok(true);
        }
        Ok(match placement.container_id {
            Some(container) => {
                actor.may_act_for(rows::container::<F>(self.conn, container)?.owner_id)
            }
            None => placement.owner_id == actor.user_id,
        })
    }

    /// Load an application's placement if the actor can reach it
    pub fn authorized_item(&self, actor: &Actor, id: ItemId) -> Result<Placement> {
        let placement = rows::placement::<F>(self.conn, id)?;
        if !self.can_reach(actor, &placement)? {
            warn!(%actor, application = %id, family = F::CONTAINER, "application access denied");
            return Err(KanbanError::unauthorized("application", id));
        }
        Ok(placement)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// A lane with its applications in visual order
    pub fn lane_view(&self, lane: Lane) -> Result<LaneView> {
        let items = rows::lane_items::<F>(self.conn, lane.id)?;
        Ok(LaneView { lane, items })
    }

    /// Reload a lane by id and view it
    pub fn lane_view_by_id(&self, id: LaneId) -> Result<LaneView> {
        let lane = rows::lane::<F>(self.conn, id)?;
        self.lane_view(lane)
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Take an application out of its lane and close the gap it leaves.
    ///
    /// The application's own placement columns are left for the caller.
    fn vacate(&self, placement: &Placement) -> Result<Option<LaneId>> {
        let Some(lane) = placement.lane_id else {
            return Ok(None);
        };
        let mut order = rows::lane_order::<F>(self.conn, lane)?;
        order.remove(placement.item_id);
        let changes = order.renumber();
        debug!(lane = %lane, writes = changes.len(), "renumbered vacated {}", F::LANE);
        rows::write_positions::<F>(self.conn, &changes)?;
        Ok(Some(lane))
    }

    /// Move an application within the lane it is already in.
    ///
    /// `index` is a visual index, clamped to the lane length. Returns the
    /// index used. Moving to the current index writes nothing on a
    /// contiguous lane.
    pub fn reorder(&self, placement: &Placement, index: usize) -> Result<usize> {
        let lane = placement.lane_id.ok_or_else(|| KanbanError::NotPlaced {
            id: placement.item_id.to_string(),
            lane: F::LANE.to_string(),
        })?;

        let mut order = rows::lane_order::<F>(self.conn, lane)?;
        let index = order.insert(placement.item_id, index);
        let changes = order.renumber();
        debug!(
            application = %placement.item_id,
            lane = %lane,
            index,
            writes = changes.len(),
            "reordered within {}", F::LANE
        );
        rows::write_positions::<F>(self.conn, &changes)?;
        Ok(index)
    }

    /// Move an application into `target` at visual `index`.
    ///
    /// The source lane (if any) is renumbered, the application's container
    /// follows the target lane, then the target lane is renumbered with the
    /// application inserted. A transfer into the lane the application is
    /// already in is a reorder.
    pub fn transfer(&self, placement: &Placement, target: &Lane, index: usize) -> Result<Transfer> {
        if placement.lane_id == Some(target.id) {
            let index = self.reorder(placement, index)?;
            return Ok(Transfer {
                source: Some(target.id),
                target: target.id,
                index,
            });
        }

        let source = self.vacate(placement)?;

        let mut order = rows::lane_order::<F>(self.conn, target.id)?;
        let index = order.insert(placement.item_id, index);
        let changes = order.renumber();

        rows::set_placement::<F>(
            self.conn,
            placement.item_id,
            Some(target.container_id),
            Some(target.id),
            index as i64,
        )?;
        rows::write_positions::<F>(self.conn, &changes)?;

        info!(
            application = %placement.item_id,
            from = ?source.map(|l| l.get()),
            to = %target.id,
            index,
            "transferred between {}s", F::LANE
        );
        Ok(Transfer {
            source,
            target: target.id,
            index,
        })
    }

    /// Append an application to the end of `target` (`max(position) + 1`).
    ///
    /// An application already in `target` stays where it is. One placed in
    /// another lane of this family leaves it first, and that lane is
    /// renumbered. Returns the position assigned.
    pub fn append(&self, placement: &Placement, target: &Lane) -> Result<i64> {
        if placement.lane_id == Some(target.id) {
            return Ok(placement.position);
        }

        self.vacate(placement)?;

        let order = rows::lane_order::<F>(self.conn, target.id)?;
        let position = order.max_position().map_or(0, |max| max + 1);
        rows::set_placement::<F>(
            self.conn,
            placement.item_id,
            Some(target.container_id),
            Some(target.id),
            position,
        )?;
        debug!(application = %placement.item_id, lane = %target.id, position, "appended");
        Ok(position)
    }

    /// Clear an application's placement in this family, renumbering the lane
    /// it leaves. Returns false if it was already detached.
    pub fn detach(&self, placement: &Placement) -> Result<bool> {
        if placement.is_detached() {
            return Ok(false);
        }
        self.vacate(placement)?;
        rows::set_placement::<F>(self.conn, placement.item_id, None, None, 0)?;
        info!(application = %placement.item_id, "detached from {}", F::CONTAINER);
        Ok(true)
    }
}
