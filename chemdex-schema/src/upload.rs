use serde::{Deserialize, Serialize};

use crate::ResponseMolecule;

/// Per-item report of `POST /molecules/upload`.
///
/// Every non-empty entry of the uploaded file lands in exactly one of
/// `created` or `failed`, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadResponse {
    pub total: usize,
    pub created_count: usize,
    pub failed_count: usize,
    pub created: Vec<ResponseMolecule>,
    pub failed: Vec<UploadFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadFailure {
    pub smile: String,
    pub reason: String,
}

impl UploadResponse {
    pub fn push_created(&mut self, molecule: ResponseMolecule) {
        self.total += 1;
        self.created_count += 1;
        self.created.push(molecule);
    }

    pub fn push_failed(&mut self, smile: impl Into<String>, reason: impl Into<String>) {
        self.total += 1;
        self.failed_count += 1;
        self.failed.push(UploadFailure {
            smile: smile.into(),
            reason: reason.into(),
        });
    }
}
