#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};
use tempfile::TempDir;
use tom_catalog_service::{MatchConfig, MatchManagerRegistry, TargetService};
use tom_catalog_storage::Storage;

use crate::{AppState, create_router};

async fn spawn_server(manager: &str) -> (String, TempDir) {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(Storage::with_pool_size(&dir.path().join("test.db"), 4).unwrap());
    let config = MatchConfig { manager: manager.to_owned(), ..MatchConfig::default() };
    let service =
        TargetService::from_config(storage, &MatchManagerRegistry::with_builtins(), &config).unwrap();
    let router = create_router(Arc::new(AppState { target_service: Arc::new(service) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    (format!("http://{addr}"), dir)
}

#[tokio::test]
async fn health_and_version() {
    let (base, _dir) = spawn_server("fuzzy-cone").await;
    let client = reqwest::Client::new();

    let health = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await.unwrap(), "ok");

    let version: Value = client.get(format!("{base}/api/version")).send().await.unwrap().json().await.unwrap();
    assert_eq!(version["match_manager"], "fuzzy-cone");
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn create_then_reject_duplicate_with_conflicts() {
    let (base, _dir) = spawn_server("default").await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{base}/api/targets"))
        .json(&json!({"name": "SN2023abc", "ra": 10.68458, "dec": 41.26906, "aliases": ["AT 2023abc"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["aliases"][0]["name"], "AT 2023abc");

    let dup = client
        .post(format!("{base}/api/targets"))
        .json(&json!({"name": "at2023abc", "ra": 200.0, "dec": -5.0}))
        .send()
        .await
        .unwrap();
    assert_eq!(dup.status(), StatusCode::CONFLICT);
    let body: Value = dup.json().await.unwrap();
    assert_eq!(body["conflicts"][0]["id"], id);
    assert!(body["error"].as_str().unwrap().contains("SN2023abc"));
}

#[tokio::test]
async fn invalid_target_is_bad_request() {
    let (base, _dir) = spawn_server("default").await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/targets"))
        .json(&json!({"name": "nowhere"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("ra and dec"));
}

#[tokio::test]
async fn update_alias_and_delete_round_trip() {
    let (base, _dir) = spawn_server("default").await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{base}/api/targets"))
        .json(&json!({"name": "M31", "ra": 10.68458, "dec": 41.26906}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let updated: Value = client
        .put(format!("{base}/api/targets/{id}"))
        .json(&json!({"extra": {"type": "galaxy"}}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["extra"]["type"], "galaxy");

    let alias = client
        .post(format!("{base}/api/targets/{id}/aliases"))
        .json(&json!({"name": "Andromeda"}))
        .send()
        .await
        .unwrap();
    assert_eq!(alias.status(), StatusCode::CREATED);
    let alias_id = alias.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let fetched: Value =
        client.get(format!("{base}/api/targets/{id}")).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched["aliases"][0]["name"], "Andromeda");

    let removed = client.delete(format!("{base}/api/aliases/{alias_id}")).send().await.unwrap();
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
    let again = client.delete(format!("{base}/api/aliases/{alias_id}")).send().await.unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let deleted = client.delete(format!("{base}/api/targets/{id}")).send().await.unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let missing = client.get(format!("{base}/api/targets/{id}")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_paginates() {
    let (base, _dir) = spawn_server("default").await;
    let client = reqwest::Client::new();
    for name in ["A", "B", "C"] {
        client
            .post(format!("{base}/api/targets"))
            .json(&json!({"name": name, "ra": 1.0, "dec": 1.0}))
            .send()
            .await
            .unwrap();
    }
    let page: Value = client
        .get(format!("{base}/api/targets?offset=1&limit=1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["total"], 3);
    assert_eq!(page["items"][0]["name"], "B");
}

#[tokio::test]
async fn match_endpoint_supports_fuzzy_and_exact() {
    let (base, _dir) = spawn_server("default").await;
    let client = reqwest::Client::new();
    client
        .post(format!("{base}/api/targets"))
        .json(&json!({"name": "My Target", "ra": 1.0, "dec": 1.0}))
        .send()
        .await
        .unwrap();

    let fuzzy: Value = client
        .get(format!("{base}/api/match?name=(mY)tAr-GeT"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fuzzy["manager"], "default");
    assert_eq!(fuzzy["matches"].as_array().unwrap().len(), 1);

    let exact: Value = client
        .get(format!("{base}/api/match?name=my_target&exact=true"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(exact["matches"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn cone_search_accepts_sexagesimal_and_validates() {
    let (base, _dir) = spawn_server("default").await;
    let client = reqwest::Client::new();
    client
        .post(format!("{base}/api/targets"))
        .json(&json!({"name": "SN2023abc", "ra": 10.68458, "dec": 41.26906}))
        .send()
        .await
        .unwrap();

    let decimal: Value = client
        .get(format!("{base}/api/cone-search?ra=10.68460&dec=41.26905&radius=12"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(decimal["matches"][0]["target"]["name"], "SN2023abc");

    // 00:42:44.3 +41:16:08.6 is within a few arcseconds of the stored position.
    let sexagesimal: Value = client
        .get(format!("{base}/api/cone-search?ra=00:42:44.3&dec=%2B41:16:08.6&radius=10"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sexagesimal["matches"].as_array().unwrap().len(), 1);

    let tight: Value = client
        .get(format!("{base}/api/cone-search?ra=10.68460&dec=41.26905&radius=0.001"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(tight["matches"].as_array().unwrap().is_empty());

    let bad = client
        .get(format!("{base}/api/cone-search?ra=10&dec=95&radius=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let negative = client
        .get(format!("{base}/api/cone-search?ra=10&dec=41&radius=-1"))
        .send()
        .await
        .unwrap();
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_with_null_position_clears_it() {
    let (base, _dir) = spawn_server("default").await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{base}/api/targets"))
        .json(&json!({"name": "2I/Borisov", "ra": 10.0, "dec": 10.0}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let rejected = client
        .put(format!("{base}/api/targets/{id}"))
        .json(&json!({"ra": null, "dec": null}))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let updated: Value = client
        .put(format!("{base}/api/targets/{id}"))
        .json(&json!({
            "target_type": "non_sidereal",
            "ra": null,
            "dec": null,
            "orbital_elements": {"scheme": "MPC_COMET", "eccentricity": 3.36}
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["target_type"], "non_sidereal");
    assert!(updated["ra"].is_null());
    assert!(updated["dec"].is_null());
}
