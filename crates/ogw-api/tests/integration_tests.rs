//! # Integration Tests for ogw-api
//!
//! Drives the full router against catalog files in a temporary directory:
//! control reads and updates for every catalog, group management, mapping
//! upserts, raw file access, preconditions, and health probes.

use std::fs;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use ogw_api::state::{AppConfig, AppState};
use ogw_store::{
    StoreConfig, OPEN_PRIVACY_CATALOG_RISK, RESILIENCE_BASELINE_CATALOG, SDM_PRIVACY_CATALOG,
    SDM_PRIVACY_TO_SECURITY,
};

// -- Fixtures -----------------------------------------------------------------

fn sdm_catalog() -> Value {
    json!({"catalog": {"uuid": "sdm", "groups": [
        {"id": "sdm-del", "title": "Löschen", "controls": [
            {
                "id": "SDM-DEL-02",
                "title": "Löschkonzept",
                "class": "measure",
                "props": [
                    {"name": "sdm-module", "value": "DEL"},
                    {"name": "sdm-goal", "value": "nichtverkettung"},
                    {"name": "dsgvo-article", "value": "Art. 17"},
                    {"name": "related-mapping", "class": "bsi", "value": "CON.6"}
                ],
                "parts": [{"id": "SDM-DEL-02-description", "name": "description", "prose": "Fristen."}]
            },
            {"id": "SDM-DEL-01", "title": "Löschregeln"}
        ]}
    ]}})
}

fn resilience_catalog() -> Value {
    json!({"catalog": {"groups": [
        {"id": "ops", "controls": [{"id": "SEC-1", "title": "A"}]}
    ]}})
}

fn privacy_catalog() -> Value {
    json!({"catalog": {"groups": [
        {"id": "G", "title": "Vertraulichkeit", "controls": [
            {"id": "P-1", "title": "Backups", "props": [{"name": "tom-id", "value": "TOM-2"}]},
            {"id": "P-2", "title": "Zugriff", "props": [{"name": "tom-id", "value": "TOM-1"}]}
        ]},
        {"id": "H", "title": "Integrität", "controls": [{"id": "P-3", "title": "Logs"}]},
        {"id": "E", "controls": []}
    ]}})
}

fn mapping_document() -> Value {
    json!({"version": "1.0", "mappings": [
        {
            "sdm_control_id": "SDM-DEL-02",
            "sdm_title": "Löschkonzept",
            "security_controls": [{"catalog_id": "resilience", "control_id": "SEC-1"}],
            "standards": {"bsi": ["CON.6"]},
            "notes": null
        }
    ]})
}

/// Catalog files in a temporary directory plus the matching app config.
struct Workspace {
    dir: TempDir,
    config: StoreConfig,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = StoreConfig::new();
        for (name, doc) in [
            (SDM_PRIVACY_CATALOG, sdm_catalog()),
            (RESILIENCE_BASELINE_CATALOG, resilience_catalog()),
            (OPEN_PRIVACY_CATALOG_RISK, privacy_catalog()),
            (SDM_PRIVACY_TO_SECURITY, mapping_document()),
        ] {
            let path = dir.path().join(format!("{name}.json"));
            fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
            config = config.with_entry(name, path);
        }
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{name}.json"))
    }

    fn read(&self, name: &str) -> Value {
        serde_json::from_str(&fs::read_to_string(self.path(name)).unwrap()).unwrap()
    }

    fn app(&self) -> axum::Router {
        let state = AppState::new(AppConfig::with_store(self.config.clone()));
        ogw_api::app(state)
    }
}

/// Helper: read response body as JSON.
async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper: read response body as string.
async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn etag(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::ETAG)
        .expect("ETag header")
        .to_str()
        .unwrap()
        .to_string()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let ws = Workspace::new();
    let response = ws.app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe_reports_missing_files() {
    let ws = Workspace::new();
    let response = ws.app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");

    fs::remove_file(ws.path(SDM_PRIVACY_TO_SECURITY)).unwrap();
    let response = ws.app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["missing"], json!([SDM_PRIVACY_TO_SECURITY]));
}

#[tokio::test]
async fn test_index_and_openapi() {
    let ws = Workspace::new();
    let response = ws.app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");

    let response = ws.app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/api/privacy/groups"].is_object());
}

#[tokio::test]
async fn test_metrics_absent_without_recorder() {
    let ws = Workspace::new();
    let response = ws.app().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- SDM Controls -------------------------------------------------------------

#[tokio::test]
async fn test_sdm_list_is_sorted_and_tagged() {
    let ws = Workspace::new();
    let response = ws.app().oneshot(get("/api/sdm/controls")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(etag(&response).starts_with('"'));
    let body = body_json(response).await;
    let ids: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["SDM-DEL-01", "SDM-DEL-02"]);
    assert_eq!(body["items"][1]["groupId"], "sdm-del");
    assert_eq!(body["items"][1]["props"]["sdmModule"], "DEL");
}

#[tokio::test]
async fn test_sdm_get_unknown_control_is_404() {
    let ws = Workspace::new();
    let response = ws.app().oneshot(get("/api/sdm/controls/NOPE")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_sdm_update_replaces_related_mappings() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "PUT",
            "/api/sdm/controls/SDM-DEL-02",
            json!({"props": {"relatedMappings": [
                {"scheme": "iso27701", "value": "7.4.7"},
                {"scheme": "bsi", "value": "CON.6", "remarks": "Baustein"}
            ]}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let mappings = &body["updated"]["props"]["relatedMappings"];
    assert_eq!(mappings.as_array().unwrap().len(), 2);
    assert_eq!(mappings[0]["scheme"], "iso27701");
    assert!(body["diff"]["summary"]["added"].as_u64().unwrap() > 0);

    let stored = ws.read(SDM_PRIVACY_CATALOG);
    let props = stored["catalog"]["groups"][0]["controls"][0]["props"]
        .as_array()
        .unwrap();
    assert_eq!(props[0]["name"], "sdm-module");
    assert_eq!(
        props.iter().filter(|p| p["name"] == "related-mapping").count(),
        2
    );
}

// -- SDM Catalog --------------------------------------------------------------

#[tokio::test]
async fn test_sdm_catalog_update_writes_parts() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "PUT",
            "/api/sdm-catalog/controls/SDM-DEL-01",
            json!({"title": "Löschregeln festlegen", "implementation_hints": "Automatisieren."}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["updated"]["title"], "Löschregeln festlegen");
    assert_eq!(body["updated"]["description"], "");
    assert_eq!(body["updated"]["implementation_hints"], "Automatisieren.");
}

// -- Resilience ---------------------------------------------------------------

#[tokio::test]
async fn test_resilience_update_adds_single_domain_prop() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "PUT",
            "/api/resilience/controls/SEC-1",
            json!({"domain": "ops"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["updated"]["title"], "A");
    assert_eq!(body["updated"]["domain"], "ops");

    let stored = ws.read(RESILIENCE_BASELINE_CATALOG);
    let control = &stored["catalog"]["groups"][0]["controls"][0];
    assert_eq!(control["props"], json!([{"name": "domain", "value": "ops"}]));
    assert_eq!(control["title"], "A");
}

#[tokio::test]
async fn test_resilience_update_of_absent_control_leaves_file() {
    let ws = Workspace::new();
    let before = fs::read(ws.path(RESILIENCE_BASELINE_CATALOG)).unwrap();
    let response = ws
        .app()
        .oneshot(send_json(
            "PUT",
            "/api/resilience/controls/SEC-404",
            json!({"title": "X"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(fs::read(ws.path(RESILIENCE_BASELINE_CATALOG)).unwrap(), before);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let ws = Workspace::new();
    let request = Request::builder()
        .method("PUT")
        .uri("/api/resilience/controls/SEC-1")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = ws.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
}

// -- Preconditions ------------------------------------------------------------

#[tokio::test]
async fn test_stale_if_match_is_rejected() {
    let ws = Workspace::new();
    let app = ws.app();
    let response = app
        .clone()
        .oneshot(get("/api/resilience/controls/SEC-1"))
        .await
        .unwrap();
    let tag = etag(&response);

    let update = |title: &str| {
        Request::builder()
            .method("PUT")
            .uri("/api/resilience/controls/SEC-1")
            .header("content-type", "application/json")
            .header(header::IF_MATCH, tag.as_str())
            .body(Body::from(json!({ "title": title }).to_string()))
            .unwrap()
    };

    let first = app.clone().oneshot(update("B")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_ne!(etag(&first), tag);

    let second = app.oneshot(update("C")).await.unwrap();
    assert_eq!(second.status(), StatusCode::PRECONDITION_FAILED);
    let body = body_json(second).await;
    assert_eq!(body["error"]["code"], "PRECONDITION_FAILED");
    assert!(body["error"]["details"]["actual"].is_string());

    let stored = ws.read(RESILIENCE_BASELINE_CATALOG);
    assert_eq!(stored["catalog"]["groups"][0]["controls"][0]["title"], "B");
}

// -- Privacy Controls ---------------------------------------------------------

#[tokio::test]
async fn test_privacy_list_sorted_by_tom_id() {
    let ws = Workspace::new();
    let response = ws.app().oneshot(get("/api/privacy/controls")).await.unwrap();
    let body = body_json(response).await;
    let ids: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["P-3", "P-2", "P-1"]);
}

#[tokio::test]
async fn test_privacy_update_drops_blank_measures() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "PUT",
            "/api/privacy/controls/P-1",
            json!({"title": "Backups", "typical_measures": ["  ", "Encrypt backups", ""]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["updated"]["typical_measures"], json!(["Encrypt backups"]));

    let stored = ws.read(OPEN_PRIVACY_CATALOG_RISK);
    let parts = stored["catalog"]["groups"][0]["controls"][0]["parts"]
        .as_array()
        .unwrap();
    let measures = parts
        .iter()
        .find(|p| p["name"] == "typical-measures")
        .unwrap();
    assert_eq!(
        measures["parts"],
        json!([{"id": "P-1-typical-measure-1", "name": "measure", "prose": "Encrypt backups"}])
    );
}

// -- Privacy Groups -----------------------------------------------------------

#[tokio::test]
async fn test_group_listing_and_creation() {
    let ws = Workspace::new();
    let response = ws.app().oneshot(get("/api/privacy/groups")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"][0]["id"], "E");
    assert_eq!(body["items"][0]["title"], "E");
    assert_eq!(body["items"][1]["controlCount"], 2);

    let response = ws
        .app()
        .oneshot(send_json(
            "POST",
            "/api/privacy/groups",
            json!({"id": "N", "title": "Neu", "description": "Neue Gruppe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["updated"]["controlCount"], 0);
    assert_eq!(body["updated"]["description"], "Neue Gruppe");

    let response = ws
        .app()
        .oneshot(send_json(
            "POST",
            "/api/privacy/groups",
            json!({"id": "N", "title": "Doppelt"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_group_create_requires_title() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "POST",
            "/api/privacy/groups",
            json!({"id": "N", "title": " "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_group_update_unknown_is_404() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "PATCH",
            "/api/privacy/groups/X",
            json!({"title": "Y"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_non_empty_group_without_override_fails() {
    let ws = Workspace::new();
    let before = fs::read(ws.path(OPEN_PRIVACY_CATALOG_RISK)).unwrap();
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/privacy/groups/G")
        .body(Body::empty())
        .unwrap();
    let response = ws.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["details"]["controlCount"], 2);
    assert_eq!(fs::read(ws.path(OPEN_PRIVACY_CATALOG_RISK)).unwrap(), before);
}

#[tokio::test]
async fn test_delete_group_with_reassignment_appends_controls() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "DELETE",
            "/api/privacy/groups/G",
            json!({"reassignTo": "H"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deleted"], "G");
    assert_eq!(body["reassignedTo"], "H");
    assert_eq!(body["removedControlCount"], 0);

    let stored = ws.read(OPEN_PRIVACY_CATALOG_RISK);
    let groups = stored["catalog"]["groups"].as_array().unwrap();
    assert!(groups.iter().all(|g| g["id"] != "G"));
    let h = groups.iter().find(|g| g["id"] == "H").unwrap();
    let ids: Vec<&str> = h["controls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["P-3", "P-1", "P-2"]);
}

#[tokio::test]
async fn test_delete_group_into_itself_is_unprocessable() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "DELETE",
            "/api/privacy/groups/G",
            json!({"reassignTo": "G"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_group_with_override_removes_controls() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "DELETE",
            "/api/privacy/groups/G",
            json!({"allowDeleteNonEmpty": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["removedControlCount"], 2);
    assert!(!body["diff"]["details"].as_array().unwrap().is_empty());

    let stored = ws.read(OPEN_PRIVACY_CATALOG_RISK);
    let ids: Vec<&str> = stored["catalog"]["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["H", "E"]);
}

// -- Mapping ------------------------------------------------------------------

#[tokio::test]
async fn test_mapping_upsert_replaces_in_place_then_appends() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "PUT",
            "/api/mapping/SDM-DEL-02",
            json!({"sdmTitle": "Löschkonzept v2", "notes": "geprüft"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["updated"]["sdmControlId"], "SDM-DEL-02");

    let response = ws
        .app()
        .oneshot(send_json(
            "PUT",
            "/api/mapping/SDM-DEL-01",
            json!({"sdmTitle": "Löschregeln"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = ws.read(SDM_PRIVACY_TO_SECURITY);
    let mappings = stored["mappings"].as_array().unwrap();
    assert_eq!(mappings.len(), 2);
    assert_eq!(mappings[0]["sdm_title"], "Löschkonzept v2");
    assert_eq!(mappings[1]["sdm_control_id"], "SDM-DEL-01");
    assert_eq!(stored["version"], "1.0");

    let response = ws.app().oneshot(get("/api/mapping")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"][0]["sdmControlId"], "SDM-DEL-01");
}

#[tokio::test]
async fn test_mapping_delete_then_404() {
    let ws = Workspace::new();
    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri("/api/mapping/SDM-DEL-02")
            .body(Body::empty())
            .unwrap()
    };
    let response = ws.app().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["removed"], 1);

    let response = ws.app().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ws.app().oneshot(get("/api/mapping/SDM-DEL-02")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Files --------------------------------------------------------------------

#[tokio::test]
async fn test_files_list_and_read() {
    let ws = Workspace::new();
    fs::remove_file(ws.path(SDM_PRIVACY_TO_SECURITY)).unwrap();

    let response = ws.app().oneshot(get("/api/files")).await.unwrap();
    let body = body_json(response).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    let mapping = items
        .iter()
        .find(|f| f["name"] == SDM_PRIVACY_TO_SECURITY)
        .unwrap();
    assert_eq!(mapping["exists"], false);

    let uri = format!("/api/files/{RESILIENCE_BASELINE_CATALOG}");
    let response = ws.app().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], RESILIENCE_BASELINE_CATALOG);
    assert!(body["content"].as_str().unwrap().contains("SEC-1"));
}

#[tokio::test]
async fn test_unknown_file_name_is_invalid_argument() {
    let ws = Workspace::new();
    let response = ws.app().oneshot(get("/api/files/passwd")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_missing_catalog_file_is_misconfiguration() {
    let ws = Workspace::new();
    fs::remove_file(ws.path(SDM_PRIVACY_CATALOG)).unwrap();
    let response = ws.app().oneshot(get("/api/sdm/controls")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"]["code"],
        "CATALOG_MISCONFIGURED"
    );
}

#[tokio::test]
async fn test_save_preview_then_write() {
    let ws = Workspace::new();
    let before = fs::read_to_string(ws.path(RESILIENCE_BASELINE_CATALOG)).unwrap();
    let content = json!({"catalog": {"groups": []}}).to_string();

    let response = ws
        .app()
        .oneshot(send_json(
            "POST",
            "/api/save",
            json!({"name": RESILIENCE_BASELINE_CATALOG, "content": content}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["mode"], "preview");
    assert_eq!(body["written"], false);
    assert_eq!(body["diff"]["summary"]["removed"], 1);
    assert_eq!(body["diff"]["details"][0]["path"], "/catalog/groups/0");
    assert_eq!(
        fs::read_to_string(ws.path(RESILIENCE_BASELINE_CATALOG)).unwrap(),
        before
    );

    let response = ws
        .app()
        .oneshot(send_json(
            "POST",
            "/api/save",
            json!({
                "name": RESILIENCE_BASELINE_CATALOG,
                "content": content,
                "previewOnly": false,
                "commitMessage": "clear baseline"
            }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["mode"], "saved");
    assert_eq!(body["written"], true);
    assert_eq!(
        fs::read_to_string(ws.path(RESILIENCE_BASELINE_CATALOG)).unwrap(),
        content
    );
}

#[tokio::test]
async fn test_save_rejects_invalid_json_content() {
    let ws = Workspace::new();
    let response = ws
        .app()
        .oneshot(send_json(
            "POST",
            "/api/save",
            json!({"name": RESILIENCE_BASELINE_CATALOG, "content": "{oops", "previewOnly": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let stored = ws.read(RESILIENCE_BASELINE_CATALOG);
    assert_eq!(stored, resilience_catalog());
}
