//! End-to-end tests against a live MongoDB on localhost:27017.
//!
//! Run with `cargo test -- --ignored` once MongoDB is up.

mod common;

use common::TestApp;
use mongodb::bson::doc;
use reqwest::{Client, StatusCode};
use serde_json::json;
use songs_service::models::Song;

const BUNDLED_SONGS: u64 = 12;

#[tokio::test]
#[ignore = "Requires MongoDB running on localhost:27017"]
async fn startup_replaces_collection_with_dataset() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let body: serde_json::Value = client
        .get(format!("{}/count", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(body["count"], BUNDLED_SONGS);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB running on localhost:27017"]
async fn create_update_delete_round_trip() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/song", app.address))
        .json(&json!({"id": 100, "title": "New", "lyrics": "words", "artist": "X"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored = app
        .db
        .collection::<Song>("songs")
        .find_one(doc! { "id": 100_i64 }, None)
        .await
        .unwrap()
        .expect("Song not found in DB");
    assert_eq!(stored.title.as_deref(), Some("New"));
    assert!(stored.oid.is_some());
    assert_eq!(stored.extra.get_str("artist").unwrap(), "X");

    let response = client
        .post(format!("{}/song", app.address))
        .json(&json!({"id": 100, "title": "Again", "lyrics": "again"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = client
        .put(format!("{}/song/100", app.address))
        .json(&json!({"title": "Renamed", "lyrics": "words"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["_id"]["$oid"], stored.oid.unwrap().to_hex());

    let response = client
        .delete(format!("{}/song/100", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/song/100", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB running on localhost:27017"]
async fn readiness_succeeds_against_live_store() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB running on localhost:27017"]
async fn empty_dataset_leaves_collection_empty() {
    let app = TestApp::spawn_with_dataset("[]").await;

    let body: serde_json::Value = Client::new()
        .get(format!("{}/count", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(body["count"], 0);

    app.cleanup().await;
}
