//! Local document store backed by SQLite.
//!
//! Documents are kept as JSON bodies in a single table keyed by
//! `(collection, id)`. Listing returns documents in insertion order.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::document::{Document, Fields, Write, WriteBatch};
use crate::error::StoreError;
use crate::store::DocumentStore;

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version     INTEGER NOT NULL,
    applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS documents (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    collection  TEXT NOT NULL,
    id          TEXT NOT NULL,
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
"#;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a store at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let version = schema_version(&conn)?;
        if version == 0 {
            create_schema(&conn)?;
        } else if version != CURRENT_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: CURRENT_VERSION,
                found: version,
            });
        }
        log::debug!("Opened SQLite store at {}", path.display());
        Ok(Self { conn })
    }

    /// An in-memory store. Useful for testing and dry runs.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn count(&self, collection: &str) -> Result<usize, StoreError> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            [collection],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }

    pub fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;
        body.map(|b| Ok(Document::new(id, serde_json::from_str(&b)?)))
            .transpose()
    }
}

/// Create all tables and indexes if they don't exist. Idempotent.
pub fn create_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if schema_version(conn)? == 0 {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION],
        )?;
    }
    Ok(())
}

/// The recorded schema version, or 0 if no schema exists.
fn schema_version(conn: &Connection) -> Result<i32, StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(0);
    }
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn upsert(conn: &Connection, collection: &str, id: &str, fields: &Fields) -> Result<(), StoreError> {
    let body = serde_json::to_string(fields)?;
    conn.execute(
        "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
         ON CONFLICT(collection, id) DO UPDATE SET body = excluded.body",
        params![collection, id, body],
    )?;
    Ok(())
}

impl DocumentStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM documents WHERE collection = ?1 ORDER BY seq")?;
        let rows = stmt.query_map([collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut docs = Vec::new();
        for row in rows {
            let (id, body) = row?;
            docs.push(Document::new(id, serde_json::from_str(&body)?));
        }
        Ok(docs)
    }

    fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = self.new_id();
        upsert(&self.conn, collection, &id, &fields)?;
        Ok(id)
    }

    fn commit(&self, batch: &WriteBatch) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        for write in batch.writes() {
            match write {
                Write::Set {
                    collection,
                    id,
                    fields,
                } => upsert(&tx, collection, id, fields)?,
                Write::Delete { collection, id } => {
                    tx.execute(
                        "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                        params![collection, id],
                    )?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}
