use directories::ProjectDirs;
use rusqlite::{params, Connection, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// String-keyed durable storage for session state.
///
/// Values are opaque UTF-8 text; callers own encoding and decoding. A
/// failed `get` and a missing key look the same, which is what the
/// per-key default fallback on load wants.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// SQLite-backed store: a single `kv` table in a file under the local
/// state directory.
#[derive(Debug)]
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    /// Opens the store at the default path, creating file and schema as
    /// needed.
    pub fn open_default() -> Result<Self> {
        let db_path = Self::db_path().unwrap_or_else(|| PathBuf::from("ninemax.db"));
        Self::open(db_path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(SqliteKv { conn })
    }

    /// In-memory store for tests and `--ephemeral` runs.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(SqliteKv { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(())
    }

    /// Store path under $HOME/.local/state/ninemax, falling back to the
    /// platform-specific data dir.
    fn db_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("ninemax");
            Some(state_dir.join("session.db"))
        } else {
            ProjectDirs::from("", "", "ninemax")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("session.db"))
        }
    }

    /// The path a default-opened store would use (for diagnostics).
    pub fn default_path() -> Option<PathBuf> {
        Self::db_path()
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Option<String> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .ok()
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// Plain map-backed store for unit tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
