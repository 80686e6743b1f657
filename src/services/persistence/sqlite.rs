use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::Path;

use super::StorageSlot;

/// Key under which the event collection is stored.
const EVENTS_KEY: &str = "timeline_events";

/// Slot stored as one row of a SQLite `kv_store` table.
pub struct SqliteSlot {
    conn: Connection,
    path: String,
    key: String,
}

impl SqliteSlot {
    /// Opens (or creates) the database at `path` and ensures the key-value
    /// table exists. Pass `":memory:"` for a throwaway database.
    pub fn open(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("Failed to open database at {}", path))?;
        Self::from_connection(conn, path, EVENTS_KEY)
    }

    fn from_connection(conn: Connection, path: &str, key: &str) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create kv_store table")?;

        Ok(Self {
            conn,
            path: path.to_string(),
            key: key.to_string(),
        })
    }

    #[cfg(test)]
    fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl StorageSlot for SqliteSlot {
    fn read(&self) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [&self.key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read key '{}'", self.key))
    }

    fn write(&mut self, data: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![self.key, data],
            )
            .with_context(|| format!("Failed to write key '{}'", self.key))?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{}#{}", self.path, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_round_trip() {
        let mut slot = SqliteSlot::open(":memory:").unwrap();
        assert_eq!(slot.read().unwrap(), None);

        slot.write("[1]").unwrap();
        slot.write("[2]").unwrap();
        assert_eq!(slot.read().unwrap(), Some("[2]".to_string()));

        let rows: i64 = slot
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_contents_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timeline.db");
        let path = path.to_str().unwrap();

        {
            let mut slot = SqliteSlot::open(path).unwrap();
            slot.write("[]").unwrap();
        }

        let slot = SqliteSlot::open(path).unwrap();
        assert_eq!(slot.read().unwrap(), Some("[]".to_string()));
        assert!(slot.describe().ends_with("#timeline_events"));
    }
}
