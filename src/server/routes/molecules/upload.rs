use crate::chem::{parse_smiles_list, validate_smiles};
use crate::error::ChemdexError;
use crate::server::router::ChemdexState;
use crate::utils::logging::debug_pretty_json;
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use chemdex_schema::{ResponseMolecule, UploadResponse};
use tracing::info;

const FILE_FIELD: &str = "file";

fn multipart_error(err: MultipartError) -> ChemdexError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ChemdexError::PayloadTooLarge
    } else {
        ChemdexError::Validation(err.body_text())
    }
}

/// Reads the `file` field of the multipart body as UTF-8 text.
async fn read_file_field(mut multipart: Multipart) -> Result<String, ChemdexError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return String::from_utf8(bytes.to_vec()).map_err(|_| {
            ChemdexError::Validation("uploaded file is not valid UTF-8 text".to_string())
        });
    }
    Err(ChemdexError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// POST /molecules/upload
///
/// Creates one molecule per comma-separated entry of the uploaded file.
/// Each entry is validated and inserted on its own, so invalid or duplicate
/// entries are reported in `failed` without aborting the batch. Store
/// failures other than constraint violations abort with 500.
pub(super) async fn upload_molecules(
    State(state): State<ChemdexState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ChemdexError> {
    let multipart = multipart.map_err(|rejection| ChemdexError::Validation(rejection.body_text()))?;
    let content = read_file_field(multipart).await?;

    let mut report = UploadResponse::default();
    for smile in parse_smiles_list(&content) {
        if let Err(e) = validate_smiles(&smile) {
            report.push_failed(smile, format!("invalid SMILES: {e}"));
            continue;
        }
        match state.dao.create(&smile).await {
            Ok(id) => report.push_created(ResponseMolecule { id, smile }),
            Err(e) if e.is_constraint_violation() => {
                report.push_failed(smile, "duplicate SMILES");
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        total = report.total,
        created = report.created_count,
        failed = report.failed_count,
        "molecule upload processed"
    );
    debug_pretty_json("upload report", &report);

    Ok((StatusCode::CREATED, Json(report)))
}
