use std::path::{Path, PathBuf};

use rusqlite::backup::Progress;
use rusqlite::{Connection, DatabaseName, OptionalExtension, Params, Row};
use tracing::{debug, info, warn};

use crate::database::fingerprint::{fingerprint, Stamp};
use crate::database::schema::{OPTIONAL_TABLES, REQUIRED_TABLES};
use crate::error::{ArchiveError, Result};

/// A read-only archive image held entirely in memory.
pub struct Archive {
    conn: Connection,
    source: Option<PathBuf>,
    stamp: Option<Stamp>,
    fingerprint: Option<String>,
}

impl Archive {
    /// Copies the database file at `path` into a private in-memory database.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Restoring from a missing path would silently create an empty file.
        let stamp = Stamp::of(path)?;
        let digest = fingerprint(path)?;

        let mut conn = Connection::open_in_memory()?;
        conn.restore(DatabaseName::Main, path, None::<fn(Progress)>)?;

        let mut archive = Self::from_connection(conn)?;
        archive.source = Some(path.to_path_buf());
        info!(
            "Loaded archive image {:?} ({} bytes, {})",
            path,
            stamp.size(),
            &digest[..12]
        );
        archive.stamp = Some(stamp);
        archive.fingerprint = Some(digest);
        Ok(archive)
    }

    /// Wraps an already populated connection. The connection is switched to
    /// query-only mode.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        check_tables(&conn)?;
        conn.pragma_update(None, "query_only", true)?;
        Ok(Self {
            conn,
            source: None,
            stamp: None,
            fingerprint: None,
        })
    }

    /// Reads the image again from its source file. Returns whether the
    /// content changed since the last load. A file with the same size and
    /// modification time is not read again.
    pub fn reload(&mut self) -> Result<bool> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| ArchiveError::not_found("Archive source", "<in-memory>"))?;

        if self.stamp.as_ref() == Some(&Stamp::of(&source)?) {
            debug!("Archive image {:?} untouched", source);
            return Ok(false);
        }

        let fresh = Self::load(&source)?;
        let changed = fresh.fingerprint != self.fingerprint;
        if changed {
            info!("Archive image {:?} changed on disk", source);
        } else {
            debug!("Archive image {:?} unchanged", source);
        }
        *self = fresh;
        Ok(changed)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Whether `table` has `column`. Older images lack some columns.
    pub(crate) fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.query_one(
            "SELECT EXISTS (SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2)",
            [table, column],
            |row| row.get(0),
        )
    }

    pub(crate) fn query_all<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params, f)?;
        let items = rows.collect::<rusqlite::Result<Vec<T>>>()?;
        debug!("Query returned {} rows", items.len());
        Ok(items)
    }

    pub(crate) fn query_opt<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare_cached(sql)?;
        Ok(stmt.query_row(params, f).optional()?)
    }

    pub(crate) fn query_one<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<T>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare_cached(sql)?;
        Ok(stmt.query_row(params, f)?)
    }
}

fn check_tables(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type IN ('table', 'view')")?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    let missing: Vec<String> = REQUIRED_TABLES
        .iter()
        .filter(|table| !present.iter().any(|name| name == *table))
        .map(|table| table.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ArchiveError::MissingTables(missing));
    }

    for table in OPTIONAL_TABLES {
        if !present.iter().any(|name| name == table) {
            warn!("Archive image has no '{}' table; queries using it will fail", table);
        }
    }
    Ok(())
}
