mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use chemdex::server::router::{ChemdexState, chemdex_router};
use chemdex::{ChemdexError, DbMolecule, MoleculeDao};
use common::{TestDb, delete, get, json_request, send};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn molecule_lifecycle_over_http() {
    let db = TestDb::new("route-lifecycle").await;
    let app = db.app();

    // create -> 201 + bare integer id
    let resp = send(&app, json_request("POST", "/molecules", r#"{"smile":"CCO"}"#)).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let id = resp.json().as_i64().expect("id should be an integer");
    assert_eq!(id, 1);

    // get by id -> 200 {id, smile}
    let resp = send(&app, get(&format!("/molecules/{id}"))).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), r#"{"id":1,"smile":"CCO"}"#);

    // list all
    let resp = send(&app, get("/molecules")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!([{"id": 1, "smile": "CCO"}]));

    // update -> 200 with the committed row
    let resp = send(
        &app,
        json_request("PUT", &format!("/molecules/{id}"), r#"{"smile":"CCC"}"#),
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({"id": 1, "smile": "CCC"}));

    let resp = send(&app, get(&format!("/molecules/{id}"))).await;
    assert_eq!(resp.json(), json!({"id": 1, "smile": "CCC"}));

    // delete -> 204 empty, then 404
    let resp = send(&app, delete(&format!("/molecules/{id}"))).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert!(resp.body.is_empty());

    let resp = send(&app, get(&format!("/molecules/{id}"))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = send(&app, delete(&format!("/molecules/{id}"))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_id_is_404_with_message() {
    let db = TestDb::new("route-404").await;
    let app = db.app();

    let resp = send(&app, get("/molecules/999")).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json(),
        json!({"error": {"code": "NOT_FOUND", "message": "Molecule not found by id: 999"}})
    );

    // PUT on a missing id does not create a record
    let resp = send(
        &app,
        json_request("PUT", "/molecules/1", r#"{"smile":"CCC"}"#),
    )
    .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = send(&app, get("/molecules")).await;
    assert_eq!(resp.json(), json!([]));
}

#[tokio::test]
async fn search_returns_literal_substring_matches() {
    let db = TestDb::new("route-search").await;
    let app = db.app();

    for smile in ["CCO", "COC"] {
        let body = json!({ "smile": smile }).to_string();
        let resp = send(&app, json_request("POST", "/molecules", &body)).await;
        assert_eq!(resp.status, StatusCode::CREATED);
    }

    let resp = send(&app, get("/molecules/search?smile=CC")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!([{"id": 1, "smile": "CCO"}]));

    let resp = send(&app, get("/molecules/search?smile=N")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!([]));
}

#[tokio::test]
async fn search_rejects_missing_or_invalid_smiles() {
    let db = TestDb::new("route-search-422").await;
    let app = db.app();

    let resp = send(&app, get("/molecules/search")).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.json()["error"]["message"],
        json!("SMILES is not specified.")
    );

    let resp = send(&app, get("/molecules/search?smile=")).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);

    let resp = send(&app, get("/molecules/search?smile=C1CC")).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.json()["error"]["message"],
        json!("'C1CC' is not a valid SMILES string.")
    );
}

#[tokio::test]
async fn create_validates_body_and_reports_conflicts() {
    let db = TestDb::new("route-create").await;
    let app = db.app();

    // malformed JSON -> 400
    let resp = send(&app, json_request("POST", "/molecules", "not-json")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["code"], json!("BAD_REQUEST"));

    // missing field -> 422
    let resp = send(&app, json_request("POST", "/molecules", "{}")).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);

    // invalid SMILES -> 422
    let resp = send(&app, json_request("POST", "/molecules", r#"{"smile":"C(("}"#)).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);

    // duplicate -> 409
    let resp = send(&app, json_request("POST", "/molecules", r#"{"smile":"CCO"}"#)).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let resp = send(&app, json_request("POST", "/molecules", r#"{"smile":"CCO"}"#)).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(resp.json()["error"]["code"], json!("CONSTRAINT_VIOLATION"));
}

#[tokio::test]
async fn non_integer_id_is_422() {
    let db = TestDb::new("route-bad-id").await;
    let app = db.app();

    let resp = send(&app, get("/molecules/abc")).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.json()["error"]["code"], json!("VALIDATION_ERROR"));

    let resp = send(&app, delete("/molecules/1.5")).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn deeply_nested_branches_are_422_not_a_crash() {
    let db = TestDb::new("route-deep-branches").await;
    let app = db.app();

    let deep = format!("C{}{}", "(C".repeat(100_000), ")".repeat(100_000));
    let body = json!({ "smile": deep }).to_string();
    let resp = send(&app, json_request("POST", "/molecules", &body)).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.json()["error"]["code"], json!("VALIDATION_ERROR"));

    let query = format!("C{}{}", "(C".repeat(4000), ")".repeat(4000));
    let resp = send(&app, get(&format!("/molecules/search?smile={query}"))).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);

    // the service is still answering
    let resp = send(&app, get("/molecules")).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn impossible_valence_and_aromaticity_are_422() {
    let db = TestDb::new("route-chemistry").await;
    let app = db.app();

    for smile in ["C(C)(C)(C)(C)C", "O(C)(C)(C)C", "c1cccc1"] {
        let body = json!({ "smile": smile }).to_string();
        let resp = send(&app, json_request("POST", "/molecules", &body)).await;
        assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY, "{smile}");
        assert_eq!(
            resp.json()["error"]["message"],
            json!(format!("'{smile}' is not a valid SMILES string."))
        );
    }

    let resp = send(&app, json_request("POST", "/molecules", r#"{"smile":"c1ccccc1"}"#)).await;
    assert_eq!(resp.status, StatusCode::CREATED);

    let resp = send(&app, json_request("PUT", "/molecules/1", r#"{"smile":"c1cccc1"}"#)).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    let resp = send(&app, get("/molecules/1")).await;
    assert_eq!(resp.json(), json!({"id": 1, "smile": "c1ccccc1"}));
}

#[tokio::test]
async fn request_id_is_echoed_and_unknown_paths_are_404() {
    let db = TestDb::new("route-misc").await;
    let app = db.app();

    let mut req = get("/molecules");
    req.headers_mut()
        .insert("x-request-id", "trace-me-123".parse().unwrap());
    let resp = send(&app, req).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.headers["x-request-id"], "trace-me-123");

    let resp = send(&app, get("/nope")).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    let generated = resp.headers["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 16);
}

/// Store that fails every call, to check the 5xx mapping.
struct UnavailableStore;

#[async_trait]
impl MoleculeDao for UnavailableStore {
    async fn find_all(&self) -> Result<Vec<DbMolecule>, ChemdexError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<DbMolecule>, ChemdexError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_by_substructure(
        &self,
        _fragment: &str,
    ) -> Result<Vec<DbMolecule>, ChemdexError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn create(&self, _smile: &str) -> Result<i64, ChemdexError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update(&self, _id: i64, _smile: &str) -> Result<Option<DbMolecule>, ChemdexError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _id: i64) -> Result<Option<i64>, ChemdexError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

#[tokio::test]
async fn store_failures_become_opaque_500s() {
    let app = chemdex_router(ChemdexState::new(Arc::new(UnavailableStore), 1024));

    for req in [
        get("/molecules"),
        get("/molecules/1"),
        get("/molecules/search?smile=CC"),
        json_request("POST", "/molecules", r#"{"smile":"CCO"}"#),
        json_request("PUT", "/molecules/1", r#"{"smile":"CCO"}"#),
        delete("/molecules/1"),
    ] {
        let resp = send(&app, req).await;
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.json(),
            json!({"error": {"code": "INTERNAL_ERROR", "message": "An internal server error occurred."}})
        );
    }
}
