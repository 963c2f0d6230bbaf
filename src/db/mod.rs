//! Database module: the molecule model, schema and data-access layer.
//!
//! Layout:
//! - `models.rs`: Rust struct mirroring the `molecules` row
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `dao.rs`: the `MoleculeDao` contract used by the HTTP layer
//! - `sqlite.rs`: `MoleculeDao` over a `SqlitePool`

pub mod dao;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use dao::MoleculeDao;
pub use models::DbMolecule;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqliteMoleculeDao, connect};
