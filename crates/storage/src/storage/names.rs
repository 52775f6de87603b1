use chrono::Utc;
use rusqlite::{OptionalExtension as _, params};
use tom_catalog_core::{Target, TargetId, TargetName};

use super::{Storage, collect_rows, get_conn, load_targets, log_row_error, row_to_alias};
use crate::{NameRow, StorageError};

impl Storage {
    /// Attach an alias to an existing target.
    ///
    /// # Errors
    /// Returns `StorageError::NotFound` if the target does not exist and
    /// `StorageError::Duplicate` if it already has this exact alias.
    pub fn add_alias(&self, target_id: TargetId, name: &str) -> Result<TargetName, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM targets WHERE id = ?1)",
            params![target_id.0],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StorageError::NotFound { entity: "target", id: target_id.to_string() });
        }
        tx.execute(
            "INSERT INTO target_names (target_id, name, created) VALUES (?1, ?2, ?3)",
            params![target_id.0, name, Utc::now().to_rfc3339()],
        )?;
        let id = tx.last_insert_rowid();
        let alias = tx.query_row(
            "SELECT id, target_id, name, created FROM target_names WHERE id = ?1",
            params![id],
            row_to_alias,
        )?;
        tx.commit()?;
        tracing::debug!(target_id = %target_id, alias_id = id, name, "Added alias");
        Ok(alias)
    }

    /// Remove an alias. Returns `true` if a row was deleted.
    ///
    /// # Errors
    /// Returns error if database delete fails.
    pub fn remove_alias(&self, alias_id: i64) -> Result<bool, StorageError> {
        let conn = get_conn(&self.pool)?;
        let deleted = conn.execute("DELETE FROM target_names WHERE id = ?1", params![alias_id])?;
        Ok(deleted > 0)
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn get_alias(&self, alias_id: i64) -> Result<Option<TargetName>, StorageError> {
        let conn = get_conn(&self.pool)?;
        Ok(conn
            .query_row(
                "SELECT id, target_id, name, created FROM target_names WHERE id = ?1",
                params![alias_id],
                row_to_alias,
            )
            .optional()?)
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn aliases_for(&self, target_id: TargetId) -> Result<Vec<TargetName>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT id, target_id, name, created FROM target_names
              WHERE target_id = ?1 ORDER BY id",
        )?;
        let aliases =
            stmt.query_map(params![target_id.0], row_to_alias)?.filter_map(log_row_error).collect();
        Ok(aliases)
    }

    /// Every name in the catalogue: each primary name and each alias, with
    /// the id of the target that owns it.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn all_names(&self) -> Result<Vec<NameRow>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT id, name FROM targets
             UNION ALL
             SELECT target_id, name FROM target_names",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(NameRow { target_id: TargetId(row.get(0)?), name: row.get(1)? })
        })?;
        collect_rows(rows, "name row")
    }

    /// Targets whose primary name or one of whose aliases equals `name`
    /// exactly (case-sensitive), ordered by id.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn targets_with_exact_name(&self, name: &str) -> Result<Vec<Target>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let ids: Vec<TargetId> = {
            let mut stmt = conn.prepare(
                "SELECT id FROM targets WHERE name = ?1
                 UNION
                 SELECT target_id FROM target_names WHERE name = ?1
                 ORDER BY 1",
            )?;
            let rows = stmt.query_map(params![name], |row| Ok(TargetId(row.get(0)?)))?;
            collect_rows(rows, "name row")?
        };
        load_targets(&conn, &ids)
    }
}
