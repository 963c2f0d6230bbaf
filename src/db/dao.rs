use async_trait::async_trait;

use crate::db::models::DbMolecule;
use crate::error::ChemdexError;

/// Data-access contract for molecule records.
///
/// Every call owns its connection (or transaction) for its own duration and
/// releases it on every exit path. `None` means "no record with that id";
/// all other failures come back as `Err`.
#[async_trait]
pub trait MoleculeDao: Send + Sync {
    /// Every stored record, ordered by id.
    async fn find_all(&self) -> Result<Vec<DbMolecule>, ChemdexError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<DbMolecule>, ChemdexError>;

    /// Records whose SMILES contains `fragment` as a literal, case-sensitive
    /// substring.
    async fn find_by_substructure(&self, fragment: &str)
    -> Result<Vec<DbMolecule>, ChemdexError>;

    /// Inserts a record and returns its generated id.
    async fn create(&self, smile: &str) -> Result<i64, ChemdexError>;

    /// Replaces the SMILES of `id` and returns the committed row.
    async fn update(&self, id: i64, smile: &str) -> Result<Option<DbMolecule>, ChemdexError>;

    /// Removes `id` and returns it; `None` if it was already absent.
    async fn delete(&self, id: i64) -> Result<Option<i64>, ChemdexError>;
}
