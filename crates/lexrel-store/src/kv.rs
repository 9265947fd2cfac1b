//! Snapshot persistence implementations
//!
//! Two `SnapshotStore` backends: SQLite for durable sessions (the
//! local-storage analogue) and an in-memory map for tests and ephemeral
//! runs.

use std::collections::HashMap;
use std::convert::Infallible;
use std::path::Path;

use lexrel_domain::traits::SnapshotStore;
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed key-value store
///
/// A single `kv(key, value)` table holding whole serialized snapshots.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each session should have its
/// own `SqliteKv` instance; several instances may share one database
/// file.
///
/// # Examples
///
/// ```no_run
/// use lexrel_store::SqliteKv;
///
/// let kv = SqliteKv::open("lexrel.db").unwrap();
/// ```
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    /// Open (or create) a key-value database at the given path
    ///
    /// Use `:memory:` for an in-memory database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for testing)
    pub fn in_memory() -> Result<Self, rusqlite::Error> {
        Self::open(":memory:")
    }
}

impl SnapshotStore for SqliteKv {
    type Error = rusqlite::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory key-value store
///
/// Infallible; state dies with the value. Useful for tests and for
/// sessions that should not touch the filesystem.
#[derive(Debug, Default, Clone)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key (test setup)
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl SnapshotStore for MemoryKv {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
