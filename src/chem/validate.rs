use super::kekulize::{KekulizeError, kekulize};
use super::smiles::{SmilesError, parse_smiles};
use super::valence::{ValenceError, check_valence};
use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum InvalidSmiles {
    #[error(transparent)]
    Syntax(#[from] SmilesError),

    #[error(transparent)]
    Valence(#[from] ValenceError),

    #[error(transparent)]
    Aromaticity(#[from] KekulizeError),
}

/// Accepts a SMILES string only if it parses, every atom is within its
/// allowed valence, and every aromatic system can be kekulized.
pub fn validate_smiles(input: &str) -> Result<(), InvalidSmiles> {
    let graph = parse_smiles(input)?;
    check_valence(&graph)?;
    kekulize(&graph)?;
    Ok(())
}
