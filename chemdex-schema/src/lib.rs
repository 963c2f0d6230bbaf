pub mod molecule;
pub mod upload;

pub use molecule::{RequestMolecule, ResponseMolecule, SearchQuery};
pub use upload::{UploadFailure, UploadResponse};
