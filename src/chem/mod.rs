//! Chemistry-facing helpers used at the HTTP boundary.
//!
//! - `smiles.rs`: SMILES reader producing an atom/bond graph
//! - `valence.rs`: allowed-valence rules per element
//! - `kekulize.rs`: aromatic systems must admit alternating double bonds
//! - `validate.rs`: the three checks above as one call
//! - `upload.rs`: splits an uploaded text file into SMILES entries

pub mod kekulize;
pub mod smiles;
pub mod upload;
pub mod valence;
mod validate;

pub use smiles::SmilesError;
pub use upload::parse_smiles_list;
pub use validate::{InvalidSmiles, validate_smiles};
