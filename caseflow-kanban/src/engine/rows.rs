//! Row access for one family.
//!
//! Table and column names come from [`Family`] constants, never from input.

use super::ordering::LaneOrder;
use crate::error::{KanbanError, Result};
use crate::types::{
    Actor, Application, Container, ContainerId, Family, ItemId, ItemSummary, Lane, LaneId, Placement,
    TimelineEvent, UserId,
};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn container_from_row(row: &Row<'_>) -> rusqlite::Result<Container> {
    Ok(Container {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        color: row.get(4)?,
        is_starred: row.get(5)?,
        position: row.get(6)?,
    })
}

fn lane_from_row(row: &Row<'_>) -> rusqlite::Result<Lane> {
    Ok(Lane {
        id: row.get(0)?,
        container_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
        position: row.get(4)?,
    })
}

// =============================================================================
// Containers and lanes
// =============================================================================

pub(crate) fn container<F: Family>(conn: &Connection, id: ContainerId) -> Result<Container> {
    let sql = format!(
        "SELECT id, owner_id, name, description, color, is_starred, position
         FROM {table} WHERE id = ?1",
        table = F::CONTAINER_TABLE
    );
    conn.query_row(&sql, params![id], container_from_row)
        .optional()?
        .ok_or_else(|| KanbanError::not_found(F::CONTAINER, id))
}

pub(crate) fn containers_for_owner<F: Family>(
    conn: &Connection,
    owner: UserId,
) -> Result<Vec<Container>> {
    let sql = format!(
        "SELECT id, owner_id, name, description, color, is_starred, position
         FROM {table} WHERE owner_id = ?1 ORDER BY position, id",
        table = F::CONTAINER_TABLE
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params![owner], container_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// `max(position) + 1` over the owner's containers, 0 if none
pub(crate) fn next_container_position<F: Family>(conn: &Connection, owner: UserId) -> Result<i64> {
    let sql = format!(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM {table} WHERE owner_id = ?1",
        table = F::CONTAINER_TABLE
    );
    Ok(conn.query_row(&sql, params![owner], |row| row.get(0))?)
}

pub(crate) fn insert_container<F: Family>(
    conn: &Connection,
    owner: UserId,
    name: &str,
    description: Option<&str>,
    color: Option<&str>,
    position: i64,
) -> Result<ContainerId> {
    let sql = format!(
        "INSERT INTO {table} (owner_id, name, description, color, position)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        table = F::CONTAINER_TABLE
    );
    conn.execute(&sql, params![owner, name, description, color, position])?;
    Ok(ContainerId::new(conn.last_insert_rowid()))
}

pub(crate) fn lane<F: Family>(conn: &Connection, id: LaneId) -> Result<Lane> {
    let sql = format!(
        "SELECT id, {fk}, name, color, position FROM {table} WHERE id = ?1",
        fk = F::LANE_CONTAINER_COLUMN,
        table = F::LANE_TABLE
    );
    conn.query_row(&sql, params![id], lane_from_row)
        .optional()?
        .ok_or_else(|| KanbanError::not_found(F::LANE, id))
}

pub(crate) fn lanes<F: Family>(conn: &Connection, container: ContainerId) -> Result<Vec<Lane>> {
    let sql = format!(
        "SELECT id, {fk}, name, color, position FROM {table}
         WHERE {fk} = ?1 ORDER BY position, id",
        fk = F::LANE_CONTAINER_COLUMN,
        table = F::LANE_TABLE
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params![container], lane_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// `max(position) + 1` over the container's lanes, 0 if none
pub(crate) fn next_lane_position<F: Family>(
    conn: &Connection,
    container: ContainerId,
) -> Result<i64> {
    let sql = format!(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM {table} WHERE {fk} = ?1",
        table = F::LANE_TABLE,
        fk = F::LANE_CONTAINER_COLUMN
    );
    Ok(conn.query_row(&sql, params![container], |row| row.get(0))?)
}

pub(crate) fn insert_lane<F: Family>(
    conn: &Connection,
    container: ContainerId,
    name: &str,
    color: Option<&str>,
    position: i64,
) -> Result<LaneId> {
    let sql = format!(
        "INSERT INTO {table} ({fk}, name, color, position) VALUES (?1, ?2, ?3, ?4)",
        table = F::LANE_TABLE,
        fk = F::LANE_CONTAINER_COLUMN
    );
    conn.execute(&sql, params![container, name, color, position])?;
    Ok(LaneId::new(conn.last_insert_rowid()))
}

// =============================================================================
// Applications
// =============================================================================

pub(crate) fn application(conn: &Connection, id: ItemId) -> Result<Application> {
    conn.query_row(
        "SELECT id, owner_id, title, status FROM applications WHERE id = ?1",
        params![id],
        |row| {
            Ok(Application {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                title: row.get(2)?,
                status: row.get(3)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("application", id))
}

pub(crate) fn insert_application(
    conn: &Connection,
    owner: UserId,
    title: &str,
    status: Option<&str>,
) -> Result<ItemId> {
    conn.execute(
        "INSERT INTO applications (owner_id, title, status) VALUES (?1, ?2, ?3)",
        params![owner, title, status],
    )?;
    Ok(ItemId::new(conn.last_insert_rowid()))
}

pub(crate) fn placement<F: Family>(conn: &Connection, id: ItemId) -> Result<Placement> {
    let sql = format!(
        "SELECT id, owner_id, {container}, {lane}, {position} FROM applications WHERE id = ?1",
        container = F::ITEM_CONTAINER_COLUMN,
        lane = F::ITEM_LANE_COLUMN,
        position = F::ITEM_POSITION_COLUMN
    );
    conn.query_row(&sql, params![id], |row| {
        Ok(Placement {
            item_id: row.get(0)?,
            owner_id: row.get(1)?,
            container_id: row.get(2)?,
            lane_id: row.get(3)?,
            position: row.get(4)?,
        })
    })
    .optional()?
    .ok_or_else(|| KanbanError::not_found("application", id))
}

/// Overwrite an application's placement in this family
pub(crate) fn set_placement<F: Family>(
    conn: &Connection,
    id: ItemId,
    container: Option<ContainerId>,
    lane: Option<LaneId>,
    position: i64,
) -> Result<()> {
    let sql = format!(
        "UPDATE applications SET {c} = ?1, {l} = ?2, {p} = ?3 WHERE id = ?4",
        c = F::ITEM_CONTAINER_COLUMN,
        l = F::ITEM_LANE_COLUMN,
        p = F::ITEM_POSITION_COLUMN
    );
    conn.execute(&sql, params![container, lane, position, id])?;
    Ok(())
}

pub(crate) fn lane_order<F: Family>(conn: &Connection, lane: LaneId) -> Result<LaneOrder> {
    let sql = format!(
        "SELECT id, {p} FROM applications WHERE {l} = ?1 ORDER BY {p}, id",
        p = F::ITEM_POSITION_COLUMN,
        l = F::ITEM_LANE_COLUMN
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params![lane], |row| Ok((row.get(0)?, row.get(1)?)))?;
    Ok(LaneOrder::new(rows.collect::<rusqlite::Result<Vec<_>>>()?))
}

pub(crate) fn lane_items<F: Family>(conn: &Connection, lane: LaneId) -> Result<Vec<ItemSummary>> {
    let sql = format!(
        "SELECT id, title, {p} FROM applications WHERE {l} = ?1 ORDER BY {p}, id",
        p = F::ITEM_POSITION_COLUMN,
        l = F::ITEM_LANE_COLUMN
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params![lane], |row| {
        Ok(ItemSummary {
            id: row.get(0)?,
            title: row.get(1)?,
            position: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Persist renumbering output
pub(crate) fn write_positions<F: Family>(conn: &Connection, changes: &[(ItemId, i64)]) -> Result<()> {
    if changes.is_empty() {
        return Ok(());
    }
    let sql = format!(
        "UPDATE applications SET {p} = ?1 WHERE id = ?2",
        p = F::ITEM_POSITION_COLUMN
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    for (id, position) in changes {
        stmt.execute(params![position, id])?;
    }
    Ok(())
}

// =============================================================================
// Timeline
// =============================================================================

pub(crate) fn insert_timeline(
    conn: &Connection,
    application: ItemId,
    note: &str,
    actor: &Actor,
) -> Result<()> {
    conn.execute(
        "INSERT INTO timeline_events (application_id, note, actor, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![application, note, actor.to_string(), Utc::now()],
    )?;
    Ok(())
}

/// Newest first
pub(crate) fn timeline(conn: &Connection, application: ItemId) -> Result<Vec<TimelineEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, application_id, note, actor, created_at FROM timeline_events
         WHERE application_id = ?1 ORDER BY id DESC",
    )?;
    let rows = stmt.query_map(params![application], |row| {
        Ok(TimelineEvent {
            id: row.get(0)?,
            application_id: row.get(1)?,
            note: row.get(2)?,
            actor: row.get(3)?,
            created_at: row.get(4)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
