//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `molecules` table (one SMILES per row, ids never reused)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Molecules
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS molecules (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    smile TEXT NOT NULL UNIQUE
);
"#;
