use serde::{Deserialize, Serialize};

/// Body of `POST /molecules` and `PUT /molecules/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RequestMolecule {
    pub smile: String,
}

/// A stored molecule as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseMolecule {
    pub id: i64,
    pub smile: String,
}

/// Query string of `GET /molecules/search`.
///
/// `smile` stays optional here so a missing parameter can be reported with
/// the same 422 body as an invalid one instead of the extractor's default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub smile: Option<String>,
}
