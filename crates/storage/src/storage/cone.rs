use rusqlite::params;
use tom_catalog_core::Target;

use super::{Storage, TARGET_COLUMNS, attach_aliases, collect_rows, get_conn, row_to_target};
use crate::StorageError;

impl Storage {
    /// Positioned targets with `min_dec <= dec <= max_dec`, ordered by id.
    ///
    /// This is only the declination pre-filter of a cone search; callers
    /// compute the exact angular separation. Right ascension is not filtered.
    /// A row that fails to decode is an error, not a skipped candidate.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn targets_in_dec_band(
        &self,
        min_dec: f64,
        max_dec: f64,
    ) -> Result<Vec<Target>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!(
            "SELECT {TARGET_COLUMNS} FROM targets
              WHERE ra IS NOT NULL AND dec IS NOT NULL AND dec BETWEEN ?1 AND ?2
              ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut targets: Vec<Target> =
            collect_rows(stmt.query_map(params![min_dec, max_dec], row_to_target)?, "target row")?;
        attach_aliases(&conn, &mut targets)?;
        tracing::trace!(min_dec, max_dec, candidates = targets.len(), "Declination band query");
        Ok(targets)
    }
}
