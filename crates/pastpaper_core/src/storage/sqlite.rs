//! SQLite-backed storage adapter.
//!
//! # Responsibility
//! - Persist opaque key/value pairs in the `kv_entries` table.
//!
//! # Invariants
//! - The connection must have migrations applied (see `db::open_db`).
//! - `set` is an upsert; the last write for a key wins.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over an already-migrated SQLite connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection after checking its schema version.
    ///
    /// # Errors
    /// - `DbError::SchemaNotMigrated` when migrations were not applied.
    /// - `DbError::UnsupportedSchemaVersion` when the schema is newer than
    ///   this binary.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let db_version = current_user_version(conn)?;
        let latest = latest_version();
        if db_version < latest {
            return Err(StorageError::Db(DbError::SchemaNotMigrated {
                db_version,
                expected: latest,
            }));
        }
        if db_version > latest {
            return Err(StorageError::Db(DbError::UnsupportedSchemaVersion {
                db_version,
                latest_supported: latest,
            }));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(())
    }
}
