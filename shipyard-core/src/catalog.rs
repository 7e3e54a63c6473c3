//! SQLite-backed application catalog.
//!
//! The catalog is a rebuildable projection of the manifest + asset tree, not
//! the durable source of truth. [`Catalog::open`] therefore discards any
//! database file already on disk and starts from an empty schema; callers
//! repopulate it through reconciliation.
//!
//! `id` values are assigned by SQLite and are only stable within one catalog
//! build.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::error::CatalogError;
use crate::types::{AppId, AppName, AppRecord};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    app_name TEXT NOT NULL UNIQUE,
    repo_name TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

/// Record-oriented store of known applications.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open a fresh catalog at `path`, discarding any existing database file.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if path.exists() {
            std::fs::remove_file(path).map_err(|e| CatalogError::Reset {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::Reset {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let conn = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;
        Ok(Catalog { conn })
    }

    /// Open an in-memory catalog. Used by tests and callers that never need
    /// the database file on disk.
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;
        conn.execute(SCHEMA, [])?;
        Ok(Catalog { conn })
    }

    /// Insert a new application record.
    ///
    /// Returns [`CatalogError::Duplicate`] when `app_name` is already present.
    pub fn insert(&self, app_name: &str, repo_name: &str) -> Result<AppRecord, CatalogError> {
        let created_at = Utc::now();
        let result = self.conn.execute(
            "INSERT INTO applications (app_name, repo_name, created_at) VALUES (?1, ?2, ?3)",
            params![app_name, repo_name, created_at.to_rfc3339()],
        );
        match result {
            Ok(_) => Ok(AppRecord {
                id: AppId(self.conn.last_insert_rowid()),
                app_name: AppName::from(app_name),
                repo_name: repo_name.to_string(),
                created_at,
            }),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(CatalogError::Duplicate {
                    name: app_name.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a record by id.
    pub fn get(&self, id: AppId) -> Result<Option<AppRecord>, CatalogError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, app_name, repo_name, created_at FROM applications WHERE id = ?1",
                params![id.0],
                raw_row,
            )
            .optional()?;
        row.map(into_record).transpose()
    }

    /// Look up a record by application name.
    pub fn find_by_name(&self, app_name: &str) -> Result<Option<AppRecord>, CatalogError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, app_name, repo_name, created_at FROM applications WHERE app_name = ?1",
                params![app_name],
                raw_row,
            )
            .optional()?;
        row.map(into_record).transpose()
    }

    /// All records, newest-created first.
    pub fn list(&self) -> Result<Vec<AppRecord>, CatalogError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, app_name, repo_name, created_at FROM applications
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], raw_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(into_record(row?)?);
        }
        Ok(records)
    }

    /// Rewrite `app_name` and `repo_name` for an existing record.
    pub fn update_name(&self, id: AppId, new_name: &str) -> Result<(), CatalogError> {
        self.conn.execute(
            "UPDATE applications SET app_name = ?1, repo_name = ?2 WHERE id = ?3",
            params![new_name, new_name, id.0],
        )?;
        Ok(())
    }

    /// Delete a record by id. Deleting an absent id is a no-op.
    pub fn delete(&self, id: AppId) -> Result<(), CatalogError> {
        self.conn
            .execute("DELETE FROM applications WHERE id = ?1", params![id.0])?;
        Ok(())
    }
}

type RawRow = (i64, String, String, String);

fn raw_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn into_record((id, app_name, repo_name, created_at): RawRow) -> Result<AppRecord, CatalogError> {
    let created_at = DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc);
    Ok(AppRecord {
        id: AppId(id),
        app_name: AppName(app_name),
        repo_name,
        created_at,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
