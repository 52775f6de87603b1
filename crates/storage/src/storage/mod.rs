//! `SQLite` storage implementation
//!
//! All methods are synchronous; [`crate::TargetStore`] wraps them for async
//! callers.

// SQLite uses i64 for counts/limits, Rust uses usize - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod cone;
mod names;
mod targets;

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tom_catalog_core::{
    DEFAULT_DB_POOL_SIZE, Target, TargetId, TargetName, TargetType, env_parse_with_default,
};

use crate::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Column list shared by every query that maps rows with [`row_to_target`].
pub(crate) const TARGET_COLUMNS: &str = "id, name, target_type, ra, dec, epoch, pm_ra, pm_dec, \
     parallax, distance, galactic_lng, galactic_lat, orbital_elements, extra, created, modified";

/// Bound parameters per `IN (...)` query when loading by id.
const ID_CHUNK: usize = 500;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Parse JSON from string, converting error to rusqlite error
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(s: &str) -> rusqlite::Result<T> {
    serde_json::from_str(s).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

/// Collect mapped rows, failing on the first row that does not decode.
///
/// Lookups that feed duplicate matching use this instead of
/// [`log_row_error`]: a skipped row would hide a candidate.
pub(crate) fn collect_rows<T>(
    rows: impl Iterator<Item = rusqlite::Result<T>>,
    context: &str,
) -> Result<Vec<T>, StorageError> {
    rows.map(|row| row.map_err(|e| decode_error(context, e))).collect()
}

fn decode_error(context: &str, err: rusqlite::Error) -> StorageError {
    match err {
        rusqlite::Error::ToSqlConversionFailure(source)
        | rusqlite::Error::FromSqlConversionFailure(_, _, source) => {
            StorageError::DataCorruption { context: context.to_owned(), source }
        },
        other => other.into(),
    }
}

/// Coerce a reference to `ToSql` trait object (avoids trivial cast lint)
pub(crate) fn coerce_to_sql<T: rusqlite::ToSql>(val: &T) -> &dyn rusqlite::ToSql {
    val
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

/// Map a row selected with [`TARGET_COLUMNS`]. Aliases are attached separately.
pub(crate) fn row_to_target(row: &rusqlite::Row<'_>) -> rusqlite::Result<Target> {
    let target_type_str: String = row.get(2)?;
    let target_type = TargetType::from_str(&target_type_str)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let orbital_elements = match row.get::<_, Option<String>>(12)? {
        Some(json) => Some(parse_json(&json)?),
        None => None,
    };
    Ok(Target {
        id: TargetId(row.get(0)?),
        name: row.get(1)?,
        target_type,
        ra: row.get(3)?,
        dec: row.get(4)?,
        epoch: row.get(5)?,
        pm_ra: row.get(6)?,
        pm_dec: row.get(7)?,
        parallax: row.get(8)?,
        distance: row.get(9)?,
        galactic_lng: row.get(10)?,
        galactic_lat: row.get(11)?,
        orbital_elements,
        extra: parse_json(&row.get::<_, String>(13)?)?,
        aliases: Vec::new(),
        created: parse_timestamp(&row.get::<_, String>(14)?)?,
        modified: parse_timestamp(&row.get::<_, String>(15)?)?,
    })
}

pub(crate) fn row_to_alias(row: &rusqlite::Row<'_>) -> rusqlite::Result<TargetName> {
    Ok(TargetName {
        id: row.get(0)?,
        target_id: TargetId(row.get(1)?),
        name: row.get(2)?,
        created: parse_timestamp(&row.get::<_, String>(3)?)?,
    })
}

/// Fill `aliases` on every target, oldest alias first.
pub(crate) fn attach_aliases(conn: &Connection, targets: &mut [Target]) -> Result<(), StorageError> {
    if targets.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = targets.iter().map(|t| t.id.0).collect();
    let mut by_target: HashMap<TargetId, Vec<TargetName>> = HashMap::new();
    for chunk in ids.chunks(ID_CHUNK) {
        let sql = format!(
            "SELECT id, target_id, name, created FROM target_names
              WHERE target_id IN ({}) ORDER BY id",
            placeholders(chunk.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let params: Vec<&dyn rusqlite::ToSql> = chunk.iter().map(coerce_to_sql).collect();
        let aliases =
            collect_rows(stmt.query_map(params.as_slice(), row_to_alias)?, "target alias row")?;
        for alias in aliases {
            by_target.entry(alias.target_id).or_default().push(alias);
        }
    }
    for target in targets.iter_mut() {
        target.aliases = by_target.remove(&target.id).unwrap_or_default();
    }
    Ok(())
}

/// Load targets by id on an open connection, preserving the order of `ids`.
/// Unknown ids are skipped; a row that fails to decode is an error.
pub(crate) fn load_targets(conn: &Connection, ids: &[TargetId]) -> Result<Vec<Target>, StorageError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut by_id: HashMap<TargetId, Target> = HashMap::with_capacity(ids.len());
    for chunk in ids.chunks(ID_CHUNK) {
        let sql = format!(
            "SELECT {TARGET_COLUMNS} FROM targets WHERE id IN ({})",
            placeholders(chunk.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let raw: Vec<i64> = chunk.iter().map(|id| id.0).collect();
        let params: Vec<&dyn rusqlite::ToSql> = raw.iter().map(coerce_to_sql).collect();
        let targets =
            collect_rows(stmt.query_map(params.as_slice(), row_to_target)?, "target row")?;
        for target in targets {
            by_id.insert(target.id, target);
        }
    }
    let mut ordered: Vec<Target> = ids.iter().filter_map(|id| by_id.remove(id)).collect();
    attach_aliases(conn, &mut ordered)?;
    Ok(ordered)
}

/// Concurrency settings plus foreign keys, which SQLite enables per connection.
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;",
    )?;
    Ok(())
}

fn db_pool_size() -> u32 {
    env_parse_with_default("TOM_DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE).max(1)
}

impl Storage {
    /// Create new storage instance with `SQLite` connection pool.
    ///
    /// Pool size comes from `TOM_DB_POOL_SIZE`.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or migrations fail.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        Self::with_pool_size(db_path, db_pool_size())
    }

    /// Create new storage instance with an explicit pool size.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or migrations fail.
    pub fn with_pool_size(db_path: &Path, pool_size: u32) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        // Run migrations on first connection
        let conn = pool.get()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(pool_size = pool_size, path = %db_path.display(), "Storage initialized with connection pool");

        Ok(Self { pool })
    }
}
