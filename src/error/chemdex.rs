use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum ChemdexError {
    #[error("Molecule not found by id: {0}")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Database error: {0}")]
    Store(sqlx::Error),
}

impl ChemdexError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChemdexError::NotFound(_) => StatusCode::NOT_FOUND,
            ChemdexError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ChemdexError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ChemdexError::ConstraintViolation(_) => StatusCode::CONFLICT,
            ChemdexError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ChemdexError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, ChemdexError::ConstraintViolation(_))
    }
}

/// Classifies driver errors once, at the store boundary: unique and primary
/// key breaches are client errors, everything else is a store failure.
impl From<sqlx::Error> for ChemdexError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ChemdexError::ConstraintViolation(db_err.message().to_string())
            }
            _ => ChemdexError::Store(err),
        }
    }
}

impl IntoResponse for ChemdexError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match &self {
            ChemdexError::NotFound(_) => ApiErrorObject {
                code: "NOT_FOUND".to_string(),
                message: self.to_string(),
                details: None,
            },
            ChemdexError::Validation(message) => ApiErrorObject {
                code: "VALIDATION_ERROR".to_string(),
                message: message.clone(),
                details: None,
            },
            ChemdexError::BadRequest(message) => ApiErrorObject {
                code: "BAD_REQUEST".to_string(),
                message: message.clone(),
                details: None,
            },
            ChemdexError::ConstraintViolation(detail) => ApiErrorObject {
                code: "CONSTRAINT_VIOLATION".to_string(),
                message: "Molecule with this SMILES already exists.".to_string(),
                details: Some(Value::String(detail.clone())),
            },
            ChemdexError::PayloadTooLarge => ApiErrorObject {
                code: "PAYLOAD_TOO_LARGE".to_string(),
                message: "Uploaded file exceeds the size limit.".to_string(),
                details: None,
            },
            ChemdexError::Store(e) => {
                error!(error = %e, "store operation failed");
                ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                }
            }
        };
        (status, Json(ApiErrorBody { inner: body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
