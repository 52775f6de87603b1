use chrono::Utc;
use rusqlite::{Connection, OptionalExtension as _, params};
use tom_catalog_core::{NewTarget, Target, TargetId, to_galactic};

use super::{
    Storage, TARGET_COLUMNS, attach_aliases, get_conn, load_targets, log_row_error, row_to_target,
};
use crate::{PaginatedResult, StorageError, StorageStats};

fn galactic(ra: Option<f64>, dec: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (ra, dec) {
        (Some(ra), Some(dec)) => {
            let (l, b) = to_galactic(ra, dec);
            (Some(l), Some(b))
        },
        _ => (None, None),
    }
}

fn not_found(id: TargetId) -> StorageError {
    StorageError::NotFound { entity: "target", id: id.to_string() }
}

/// Load one target with its aliases on an open connection.
pub(crate) fn fetch_target(conn: &Connection, id: TargetId) -> Result<Option<Target>, StorageError> {
    let sql = format!("SELECT {TARGET_COLUMNS} FROM targets WHERE id = ?1");
    let Some(target) = conn.query_row(&sql, params![id.0], row_to_target).optional()? else {
        return Ok(None);
    };
    let mut one = [target];
    attach_aliases(conn, &mut one)?;
    let [target] = one;
    Ok(Some(target))
}

impl Storage {
    /// Insert a target and its aliases in one transaction.
    ///
    /// No duplicate matching happens here; callers that need it go through
    /// the validating service. Galactic coordinates are derived from ra/dec.
    ///
    /// # Errors
    /// Returns `StorageError::Duplicate` if the same alias is listed twice,
    /// or a database error.
    pub fn insert_target(&self, target: &NewTarget) -> Result<Target, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        let now = Utc::now().to_rfc3339();
        let (galactic_lng, galactic_lat) = galactic(target.ra, target.dec);
        let orbital_elements =
            target.orbital_elements.as_ref().map(serde_json::to_string).transpose()?;
        let extra = serde_json::to_string(&target.extra)?;

        tx.execute(
            "INSERT INTO targets
               (name, target_type, ra, dec, epoch, pm_ra, pm_dec, parallax, distance,
                galactic_lng, galactic_lat, orbital_elements, extra, created, modified)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)",
            params![
                target.name,
                target.target_type.as_str(),
                target.ra,
                target.dec,
                target.epoch,
                target.pm_ra,
                target.pm_dec,
                target.parallax,
                target.distance,
                galactic_lng,
                galactic_lat,
                orbital_elements,
                extra,
                now,
            ],
        )?;
        let id = TargetId(tx.last_insert_rowid());

        {
            let mut stmt = tx.prepare(
                "INSERT INTO target_names (target_id, name, created) VALUES (?1, ?2, ?3)",
            )?;
            for alias in &target.aliases {
                stmt.execute(params![id.0, alias, now])?;
            }
        }

        let saved = fetch_target(&tx, id)?.ok_or_else(|| not_found(id))?;
        tx.commit()?;
        tracing::debug!(target_id = %id, name = %saved.name, aliases = saved.aliases.len(), "Inserted target");
        Ok(saved)
    }

    /// Overwrite every stored field of `target` (aliases excepted) and refresh
    /// the derived galactic coordinates.
    ///
    /// # Errors
    /// Returns `StorageError::NotFound` if no target has `target.id`.
    pub fn update_target(&self, target: &Target) -> Result<Target, StorageError> {
        let conn = get_conn(&self.pool)?;
        let (galactic_lng, galactic_lat) = galactic(target.ra, target.dec);
        let orbital_elements =
            target.orbital_elements.as_ref().map(serde_json::to_string).transpose()?;
        let extra = serde_json::to_string(&target.extra)?;

        let changed = conn.execute(
            "UPDATE targets SET
               name = ?1, target_type = ?2, ra = ?3, dec = ?4, epoch = ?5, pm_ra = ?6,
               pm_dec = ?7, parallax = ?8, distance = ?9, galactic_lng = ?10,
               galactic_lat = ?11, orbital_elements = ?12, extra = ?13, modified = ?14
             WHERE id = ?15",
            params![
                target.name,
                target.target_type.as_str(),
                target.ra,
                target.dec,
                target.epoch,
                target.pm_ra,
                target.pm_dec,
                target.parallax,
                target.distance,
                galactic_lng,
                galactic_lat,
                orbital_elements,
                extra,
                target.modified.to_rfc3339(),
                target.id.0,
            ],
        )?;
        if changed == 0 {
            return Err(not_found(target.id));
        }
        fetch_target(&conn, target.id)?.ok_or_else(|| not_found(target.id))
    }

    /// Get target by id, aliases included.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_target(&self, id: TargetId) -> Result<Option<Target>, StorageError> {
        let conn = get_conn(&self.pool)?;
        fetch_target(&conn, id)
    }

    /// Delete a target; its aliases go with it. Returns `true` if a row was deleted.
    ///
    /// # Errors
    /// Returns error if database delete fails.
    pub fn delete_target(&self, id: TargetId) -> Result<bool, StorageError> {
        let conn = get_conn(&self.pool)?;
        let deleted = conn.execute("DELETE FROM targets WHERE id = ?1", params![id.0])?;
        if deleted > 0 {
            tracing::debug!(target_id = %id, "Deleted target");
        }
        Ok(deleted > 0)
    }

    /// Targets ordered by id, with pagination.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_targets(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<Target>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM targets", [], |row| row.get(0))?;
        let sql = format!("SELECT {TARGET_COLUMNS} FROM targets ORDER BY id LIMIT ?1 OFFSET ?2");
        let mut stmt = conn.prepare(&sql)?;
        let mut items: Vec<Target> = stmt
            .query_map(params![limit as i64, offset as i64], row_to_target)?
            .filter_map(log_row_error)
            .collect();
        attach_aliases(&conn, &mut items)?;
        Ok(PaginatedResult {
            items,
            total: total as u64,
            offset: offset as u64,
            limit: limit as u64,
        })
    }

    /// Targets for the given ids, in the order given. Unknown ids are skipped.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn targets_by_ids(&self, ids: &[TargetId]) -> Result<Vec<Target>, StorageError> {
        let conn = get_conn(&self.pool)?;
        load_targets(&conn, ids)
    }

    /// Get catalogue statistics.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        let conn = get_conn(&self.pool)?;
        let target_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM targets", [], |row| row.get(0))?;
        let alias_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM target_names", [], |row| row.get(0))?;
        let positioned_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM targets WHERE ra IS NOT NULL AND dec IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(StorageStats {
            target_count: target_count as u64,
            alias_count: alias_count as u64,
            positioned_count: positioned_count as u64,
        })
    }
}
