//! KanbanContext - access to the SQLite store
//!
//! The context owns the connection and hands out transactions. No business
//! logic lives here; operations and the engine do all the work.

use crate::config::KanbanConfig;
use crate::error::{KanbanError, Result};
use caseflow_operations::LogEntry;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, warn};

/// Schema SQL embedded at compile time.
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Context passed to every operation - provides access, not logic.
///
/// All writers in this process serialize on the connection mutex. Each write
/// runs in a `BEGIN IMMEDIATE` transaction, so writers in other processes
/// sharing the database file wait for SQLite's write lock before reading the
/// lanes they are about to renumber.
#[derive(Clone)]
pub struct KanbanContext {
    conn: Arc<Mutex<Connection>>,
}

impl KanbanContext {
    /// Open the store described by `config`
    pub fn open(config: &KanbanConfig) -> Result<Self> {
        let conn = match &config.database_path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                let conn = Connection::open(path)?;
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn
            }
            None => Connection::open_in_memory()?,
        };
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        Self::init(conn)
    }

    /// Open (or create) a database file with default settings
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(&KanbanConfig {
            database_path: Some(path.as_ref().to_path_buf()),
            ..KanbanConfig::default()
        })
    }

    /// Fresh in-memory store
    pub fn in_memory() -> Result<Self> {
        Self::open(&KanbanConfig::default())
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA_SQL)?;
        debug!("kanban schema ready");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
        // A panic inside a closure drops its transaction (rollback) before the
        // guard is released, so the connection is still consistent.
        conn.lock().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned connection lock");
            poisoned.into_inner()
        })
    }

    // =========================================================================
    // Units of work
    // =========================================================================

    /// Run `f` inside one write transaction on the blocking pool.
    ///
    /// Commits when `f` returns `Ok`; any `Err` drops the transaction, which
    /// rolls every statement back.
    pub async fn write<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction<'_>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<R> {
            let mut guard = Self::lock(&conn);
            let tx = guard.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await
        .map_err(|e| KanbanError::Internal(format!("write task failed: {e}")))?
    }

    /// Run a read-only closure on the blocking pool
    pub async fn read<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<R> {
            let guard = Self::lock(&conn);
            f(&guard)
        })
        .await
        .map_err(|e| KanbanError::Internal(format!("read task failed: {e}")))?
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        let entry = entry.clone();
        self.write(move |tx| {
            tx.execute(
                "INSERT INTO activity (id, timestamp, op, input, output, actor, duration_ms)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    entry.id,
                    entry.timestamp,
                    entry.op,
                    serde_json::to_string(&entry.input)?,
                    serde_json::to_string(&entry.output)?,
                    entry.actor,
                    entry.duration_ms as i64,
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Read activity log entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        self.read(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, timestamp, op, input, output, actor, duration_ms
                 FROM activity ORDER BY rowid DESC LIMIT ?1",
            )?;
            let limit = limit.map(|l| l as i64).unwrap_or(-1);
            let rows = stmt.query_map(params![limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, DateTime<Utc>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, i64>(6)?,
                ))
            })?;

            let mut entries = Vec::new();
            for row in rows {
                let (id, timestamp, op, input, output, actor, duration_ms) = row?;
                entries.push(LogEntry {
                    id,
                    timestamp,
                    op,
                    input: serde_json::from_str(&input)?,
                    output: serde_json::from_str(&output)?,
                    actor,
                    duration_ms: duration_ms.max(0) as u64,
                });
            }
            Ok(entries)
        })
        .await
    }
}
