use super::extract::{MoleculeId, SearchSmiles, SmilesBody};
use crate::error::ChemdexError;
use crate::server::router::ChemdexState;
use axum::{Json, extract::State, http::StatusCode};
use chemdex_schema::ResponseMolecule;
use tracing::{debug, info};

/// GET /molecules
pub(super) async fn get_all_molecules(
    State(state): State<ChemdexState>,
) -> Result<Json<Vec<ResponseMolecule>>, ChemdexError> {
    let molecules = state.dao.find_all().await?;
    Ok(Json(molecules.into_iter().map(Into::into).collect()))
}

/// GET /molecules/search?smile=...
///
/// Literal substring match on the stored SMILES, not a chemical
/// substructure match.
pub(super) async fn search_molecules_by_substructure(
    State(state): State<ChemdexState>,
    SearchSmiles(fragment): SearchSmiles,
) -> Result<Json<Vec<ResponseMolecule>>, ChemdexError> {
    let molecules = state.dao.find_by_substructure(&fragment).await?;
    debug!(fragment = %fragment, matches = molecules.len(), "substructure search");
    Ok(Json(molecules.into_iter().map(Into::into).collect()))
}

/// GET /molecules/{id}
pub(super) async fn get_molecule_by_id(
    State(state): State<ChemdexState>,
    MoleculeId(id): MoleculeId,
) -> Result<Json<ResponseMolecule>, ChemdexError> {
    let molecule = state
        .dao
        .find_by_id(id)
        .await?
        .ok_or(ChemdexError::NotFound(id))?;
    Ok(Json(molecule.into()))
}

/// POST /molecules
pub(super) async fn create_molecule(
    State(state): State<ChemdexState>,
    SmilesBody(smile): SmilesBody,
) -> Result<(StatusCode, Json<i64>), ChemdexError> {
    let id = state.dao.create(&smile).await?;
    info!(id, smile = %smile, "molecule created");
    Ok((StatusCode::CREATED, Json(id)))
}

/// PUT /molecules/{id}
pub(super) async fn update_molecule_by_id(
    State(state): State<ChemdexState>,
    MoleculeId(id): MoleculeId,
    SmilesBody(smile): SmilesBody,
) -> Result<Json<ResponseMolecule>, ChemdexError> {
    let molecule = state
        .dao
        .update(id, &smile)
        .await?
        .ok_or(ChemdexError::NotFound(id))?;
    info!(molecule = %molecule, "molecule updated");
    Ok(Json(molecule.into()))
}

/// DELETE /molecules/{id}
pub(super) async fn delete_molecule_by_id(
    State(state): State<ChemdexState>,
    MoleculeId(id): MoleculeId,
) -> Result<StatusCode, ChemdexError> {
    state
        .dao
        .delete(id)
        .await?
        .ok_or(ChemdexError::NotFound(id))?;
    info!(id, "molecule deleted");
    Ok(StatusCode::NO_CONTENT)
}
