pub mod chem;
pub mod config;
pub mod db;
pub mod error;
pub mod server;

mod utils;

pub use db::{DbMolecule, MoleculeDao, SqliteMoleculeDao};
pub use error::ChemdexError;
