//! Store configuration loaded with figment
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. `caseflow.toml` (or an explicit file)
//! 3. `CASEFLOW_`-prefixed environment variables

use crate::error::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for opening a [`crate::KanbanContext`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanConfig {
    /// SQLite database file; `None` opens an in-memory database
    pub database_path: Option<PathBuf>,
    /// How long a writer waits for another connection's lock
    pub busy_timeout_ms: u64,
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            busy_timeout_ms: 5_000,
        }
    }
}

impl KanbanConfig {
    /// Default config file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "caseflow.toml";
    /// Environment variable prefix
    pub const ENV_PREFIX: &'static str = "CASEFLOW_";

    /// Load from `caseflow.toml` in the working directory and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    /// Load from a specific TOML file and the environment.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading kanban configuration");
        let config = Self::figment(path).extract()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }
}
