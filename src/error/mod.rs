mod chemdex;

pub use chemdex::{ApiErrorBody, ApiErrorObject, ChemdexError};
