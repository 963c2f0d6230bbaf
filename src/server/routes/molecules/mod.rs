pub mod extract;
pub mod handlers;
pub mod upload;

use crate::server::router::ChemdexState;
use axum::{Router, extract::DefaultBodyLimit, routing::get, routing::post};
use tower_http::limit::RequestBodyLimitLayer;

use handlers::{
    create_molecule, delete_molecule_by_id, get_all_molecules, get_molecule_by_id,
    search_molecules_by_substructure, update_molecule_by_id,
};
use upload::upload_molecules;

pub fn router(max_upload_bytes: usize) -> Router<ChemdexState> {
    // body limits cover the upload route only
    let upload = Router::new()
        .route("/molecules/upload", post(upload_molecules))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes));

    Router::new()
        .route("/molecules", get(get_all_molecules).post(create_molecule))
        .route("/molecules/search", get(search_molecules_by_substructure))
        .route(
            "/molecules/{id}",
            get(get_molecule_by_id)
                .put(update_molecule_by_id)
                .delete(delete_molecule_by_id),
        )
        .merge(upload)
}
