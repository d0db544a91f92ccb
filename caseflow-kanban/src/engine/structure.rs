//! Container and lane structure: bootstrap, deletion with detachment, and
//! sibling position batch sync.

use super::{rows, RepositioningEngine};
use crate::error::{KanbanError, Result};
use crate::types::{
    Actor, Container, ContainerId, ContainerView, Family, Lane, LaneId, PositionUpdate, UserId,
};
use rusqlite::params;
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of a position batch sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport<Id> {
    /// Rows whose position was written
    pub updated: Vec<Id>,
    /// Rows outside the caller's scope (or missing), left untouched
    pub skipped: Vec<Id>,
}

impl<Id> Default for SyncReport<Id> {
    fn default() -> Self {
        Self {
            updated: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Reject a batch containing a negative position before touching the store
pub(crate) fn validate_positions<Id: std::fmt::Display>(updates: &[PositionUpdate<Id>]) -> Result<()> {
    match updates.iter().find(|u| u.position < 0) {
        Some(bad) => Err(KanbanError::invalid_value(
            "position",
            format!("{} for {} must not be negative", bad.position, bad.id),
        )),
        None => Ok(()),
    }
}

impl<F: Family> RepositioningEngine<'_, F> {
    /// Create a container for `owner` at the end of their containers, seeded
    /// with the default lanes at positions 0, 1, 2.
    pub fn create_container(
        &self,
        owner: UserId,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<ContainerId> {
        let position = rows::next_container_position::<F>(self.conn(), owner)?;
        let id =
            rows::insert_container::<F>(self.conn(), owner, name, description, color, position)?;

        for (index, lane) in Container::default_lanes().iter().enumerate() {
            rows::insert_lane::<F>(self.conn(), id, lane, None, index as i64)?;
        }

        info!(%owner, container = %id, position, "created {}", F::CONTAINER);
        Ok(id)
    }

    /// Add a lane at the end of a container's lanes
    pub fn add_lane(&self, container: ContainerId, name: &str, color: Option<&str>) -> Result<Lane> {
        let position = rows::next_lane_position::<F>(self.conn(), container)?;
        let id = rows::insert_lane::<F>(self.conn(), container, name, color, position)?;
        debug!(container = %container, lane = %id, position, "added {}", F::LANE);
        rows::lane::<F>(self.conn(), id)
    }

    /// Delete a lane. Its applications stay in the container with no lane
    /// and position 0. Returns how many were detached.
    pub fn delete_lane(&self, lane: LaneId) -> Result<usize> {
        let detached = self.conn().execute(
            &format!(
                "UPDATE applications SET {l} = NULL, {p} = 0 WHERE {l} = ?1",
                l = F::ITEM_LANE_COLUMN,
                p = F::ITEM_POSITION_COLUMN
            ),
            params![lane],
        )?;
        self.conn().execute(
            &format!("DELETE FROM {table} WHERE id = ?1", table = F::LANE_TABLE),
            params![lane],
        )?;
        info!(lane = %lane, detached, "deleted {}", F::LANE);
        Ok(detached)
    }

    /// Delete a container and its lanes. Every application referencing it,
    /// directly or through a lane, is fully detached. Returns how many were
    /// detached.
    pub fn delete_container(&self, container: ContainerId) -> Result<usize> {
        let detached = self.conn().execute(
            &format!(
                "UPDATE applications SET {c} = NULL, {l} = NULL, {p} = 0
                 WHERE {c} = ?1 OR {l} IN (SELECT id FROM {lanes} WHERE {fk} = ?1)",
                c = F::ITEM_CONTAINER_COLUMN,
                l = F::ITEM_LANE_COLUMN,
                p = F::ITEM_POSITION_COLUMN,
                lanes = F::LANE_TABLE,
                fk = F::LANE_CONTAINER_COLUMN
            ),
            params![container],
        )?;
        self.conn().execute(
            &format!(
                "DELETE FROM {lanes} WHERE {fk} = ?1",
                lanes = F::LANE_TABLE,
                fk = F::LANE_CONTAINER_COLUMN
            ),
            params![container],
        )?;
        self.conn().execute(
            &format!("DELETE FROM {table} WHERE id = ?1", table = F::CONTAINER_TABLE),
            params![container],
        )?;
        info!(container = %container, detached, "deleted {}", F::CONTAINER);
        Ok(detached)
    }

    /// Write container positions verbatim, skipping rows not owned by `owner`
    pub fn sync_container_positions(
        &self,
        owner: UserId,
        updates: &[PositionUpdate<ContainerId>],
    ) -> Result<SyncReport<ContainerId>> {
        let sql = format!(
            "UPDATE {table} SET position = ?1 WHERE id = ?2 AND owner_id = ?3",
            table = F::CONTAINER_TABLE
        );
        let mut stmt = self.conn().prepare_cached(&sql)?;
        let mut report = SyncReport::default();

        for update in updates {
            if stmt.execute(params![update.position, update.id, owner])? == 0 {
                debug!(%owner, container = %update.id, "skipped out-of-scope {}", F::CONTAINER);
                report.skipped.push(update.id);
            } else {
                report.updated.push(update.id);
            }
        }
        Ok(report)
    }

    /// Write lane positions verbatim, skipping lanes not in `container`
    pub fn sync_lane_positions(
        &self,
        container: ContainerId,
        updates: &[PositionUpdate<LaneId>],
    ) -> Result<SyncReport<LaneId>> {
        let sql = format!(
            "UPDATE {table} SET position = ?1 WHERE id = ?2 AND {fk} = ?3",
            table = F::LANE_TABLE,
            fk = F::LANE_CONTAINER_COLUMN
        );
        let mut stmt = self.conn().prepare_cached(&sql)?;
        let mut report = SyncReport::default();

        for update in updates {
            if stmt.execute(params![update.position, update.id, container])? == 0 {
                debug!(container = %container, lane = %update.id, "skipped out-of-scope {}", F::LANE);
                report.skipped.push(update.id);
            } else {
                report.updated.push(update.id);
            }
        }
        Ok(report)
    }

    /// Canonical state of a container the actor may see
    pub fn container_view(&self, actor: &Actor, id: ContainerId) -> Result<ContainerView> {
        let container = self.authorized_container(actor, id)?;
        let lanes = rows::lanes::<F>(self.conn(), id)?
            .into_iter()
            .map(|lane| self.lane_view(lane))
            .collect::<Result<Vec<_>>>()?;
        Ok(ContainerView {
            family: F::CONTAINER.to_string(),
            container,
            lanes,
        })
    }
}
