use crate::chem::validate_smiles;
use crate::error::ChemdexError;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use chemdex_schema::{RequestMolecule, SearchQuery};
use tracing::debug;

/// Checks that `smile` is present, non-empty and well-formed.
pub(crate) fn require_valid_smiles(smile: Option<String>) -> Result<String, ChemdexError> {
    let Some(smile) = smile.filter(|s| !s.is_empty()) else {
        return Err(ChemdexError::Validation(
            "SMILES is not specified.".to_string(),
        ));
    };
    if let Err(e) = validate_smiles(&smile) {
        debug!(smile = %smile, error = %e, "rejected SMILES");
        return Err(ChemdexError::Validation(format!(
            "'{smile}' is not a valid SMILES string."
        )));
    }
    Ok(smile)
}

/// `{id}` path segment as an integer; anything else is a 422.
pub struct MoleculeId(pub i64);

impl<S> FromRequestParts<S> for MoleculeId
where
    S: Send + Sync,
{
    type Rejection = ChemdexError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                ChemdexError::Validation(format!("invalid molecule id: {}", rejection.body_text()))
            })?;
        Ok(MoleculeId(id))
    }
}

/// Validated `smile` query parameter of the substructure search.
pub struct SearchSmiles(pub String);

impl<S> FromRequestParts<S> for SearchSmiles
where
    S: Send + Sync,
{
    type Rejection = ChemdexError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<SearchQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                ChemdexError::Validation(rejection.body_text())
            })?;
        require_valid_smiles(query.smile).map(SearchSmiles)
    }
}

/// Validated `{smile}` JSON body of create and update.
pub struct SmilesBody(pub String);

impl<S> FromRequest<S> for SmilesBody
where
    S: Send + Sync,
{
    type Rejection = ChemdexError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<RequestMolecule>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => ChemdexError::Validation(e.body_text()),
                other => ChemdexError::BadRequest(other.body_text()),
            })?;
        require_valid_smiles(Some(body.smile)).map(SmilesBody)
    }
}
