//! Migration v1: targets and their names

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS targets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    target_type TEXT NOT NULL DEFAULT 'sidereal',
    ra REAL,
    dec REAL,
    epoch REAL,
    pm_ra REAL,
    pm_dec REAL,
    parallax REAL,
    distance REAL,
    orbital_elements TEXT,
    extra TEXT NOT NULL DEFAULT '{}',
    created TEXT NOT NULL,
    modified TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS target_names (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    target_id INTEGER NOT NULL REFERENCES targets(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    created TEXT NOT NULL,
    UNIQUE(target_id, name)
);

CREATE INDEX IF NOT EXISTS idx_targets_name ON targets(name);
CREATE INDEX IF NOT EXISTS idx_targets_dec ON targets(dec);
CREATE INDEX IF NOT EXISTS idx_target_names_name ON target_names(name);
CREATE INDEX IF NOT EXISTS idx_target_names_target ON target_names(target_id);
";
