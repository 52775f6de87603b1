//! Migration v2: galactic coordinates
//!
//! Columns are added with `add_column_if_not_exists`; existing positioned rows
//! are backfilled in Rust since SQLite has no trigonometry by default.

use rusqlite::{Connection, params};
use tom_catalog_core::to_galactic;

pub(super) const GALACTIC_LNG: &str = "galactic_lng";
pub(super) const GALACTIC_LAT: &str = "galactic_lat";
pub(super) const COLUMN_DEF: &str = "REAL";

pub(super) fn backfill(conn: &Connection) -> Result<usize, rusqlite::Error> {
    let rows: Vec<(i64, f64, f64)> = {
        let mut stmt = conn.prepare(
            "SELECT id, ra, dec FROM targets
              WHERE ra IS NOT NULL AND dec IS NOT NULL AND galactic_lng IS NULL",
        )?;
        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<Result<_, _>>()?
    };
    let mut update =
        conn.prepare("UPDATE targets SET galactic_lng = ?1, galactic_lat = ?2 WHERE id = ?3")?;
    for (id, ra, dec) in &rows {
        let (l, b) = to_galactic(*ra, *dec);
        update.execute(params![l, b, id])?;
    }
    Ok(rows.len())
}
