//! SQLite-backed lookup store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::{FilmCounter, HistoryEntry, LookupStore, StoreError};

/// SQLite-backed lookup store.
///
/// The connection is the only shared mutable resource in the core; the
/// mutex is held for the duration of a single logical operation and never
/// across a network call.
pub struct SqliteLookupStore {
    conn: Mutex<Connection>,
}

impl SqliteLookupStore {
    /// Create a new SQLite lookup store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite lookup store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- Append-only query log, one row per successful resolution
            CREATE TABLE IF NOT EXISTS history (
                user_id INTEGER NOT NULL,
                query_text TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_history_user_id ON history(user_id);

            -- Aggregated lookup counters, one row per (user, film)
            CREATE TABLE IF NOT EXISTS stats (
                user_id INTEGER NOT NULL,
                film_name TEXT NOT NULL,
                search_count INTEGER NOT NULL,
                PRIMARY KEY (user_id, film_name)
            );
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_history_entry(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        let timestamp_str: String = row.get(2)?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
            })?;

        Ok(HistoryEntry {
            user_id: row.get(0)?,
            query_text: row.get(1)?,
            timestamp,
        })
    }
}

impl LookupStore for SqliteLookupStore {
    fn append_history(
        &self,
        user_id: i64,
        query_text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO history (user_id, query_text, timestamp) VALUES (?, ?, ?)",
            params![user_id, query_text, timestamp.to_rfc3339()],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn upsert_counter(&self, user_id: i64, film_name: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        // Server-side increment: no read-modify-write window, so two
        // near-simultaneous calls for the same key both land.
        conn.execute(
            "INSERT INTO stats (user_id, film_name, search_count)
             VALUES (?, ?, 1)
             ON CONFLICT(user_id, film_name) DO UPDATE SET
                search_count = search_count + 1",
            params![user_id, film_name],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn record_lookup(
        &self,
        user_id: i64,
        query_text: &str,
        film_name: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().unwrap();

        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tx.execute(
            "INSERT INTO history (user_id, query_text, timestamp) VALUES (?, ?, ?)",
            params![user_id, query_text, timestamp.to_rfc3339()],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        tx.execute(
            "INSERT INTO stats (user_id, film_name, search_count)
             VALUES (?, ?, 1)
             ON CONFLICT(user_id, film_name) DO UPDATE SET
                search_count = search_count + 1",
            params![user_id, film_name],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        tx.commit().map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn read_history(&self, user_id: i64, limit: u32) -> Result<Vec<HistoryEntry>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT user_id, query_text, timestamp FROM history
                 WHERE user_id = ?
                 ORDER BY timestamp DESC, rowid DESC
                 LIMIT ?",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id, limit], Self::row_to_history_entry)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(entries)
    }

    fn read_counters(&self, user_id: i64) -> Result<Vec<FilmCounter>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT user_id, film_name, search_count FROM stats
                 WHERE user_id = ?
                 ORDER BY search_count DESC, film_name ASC",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(FilmCounter {
                    user_id: row.get(0)?,
                    film_name: row.get(1)?,
                    search_count: row.get(2)?,
                })
            })
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut counters = Vec::new();
        for row in rows {
            counters.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(counters)
    }

    fn compact_counters(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        // Self-repair in case the key constraint was ever bypassed by an
        // unsafe writer: group by key, sum counts, replace the table
        // contents atomically. The scratch table is TEMPORARY and never
        // survives a restart. Grouping a table with unique keys is the
        // identity operation, so reapplying is safe.
        conn.execute_batch(
            r#"
            BEGIN;
            CREATE TEMPORARY TABLE stats_compact AS
                SELECT user_id, film_name, SUM(search_count) AS search_count
                FROM stats
                GROUP BY user_id, film_name;
            DELETE FROM stats;
            INSERT INTO stats (user_id, film_name, search_count)
                SELECT user_id, film_name, search_count FROM stats_compact;
            DROP TABLE stats_compact;
            COMMIT;
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}
