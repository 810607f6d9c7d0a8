#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use mongodb::Database;
use songs_service::config::SongsConfig;
use songs_service::models::Song;
use songs_service::services::{InMemorySongStore, SongStore};
use songs_service::startup::{build_router, AppState, Application};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Router over an in-memory store seeded with two songs.
pub struct TestRouter {
    pub router: Router,
    pub store: Arc<InMemorySongStore>,
}

impl TestRouter {
    pub async fn seeded() -> Self {
        let store = Arc::new(InMemorySongStore::new());
        store
            .replace_all(vec![Song::new(1, "A", "la"), Song::new(2, "B", "lo")])
            .await
            .expect("Failed to seed in-memory store");

        let router = build_router(AppState::new(store.clone()));
        Self { router, store }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn put_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.send(Method::PUT, uri, Some(body.to_string())).await
    }

    /// Sends `body` verbatim with a JSON content type.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, serde_json::Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => Request::builder().method(method).uri(uri).body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };
        (status, value)
    }
}

/// A running service backed by a live MongoDB on localhost.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: Database,
    pub dataset_path: Option<PathBuf>,
}

impl TestApp {
    /// Spawn against the bundled dataset.
    pub async fn spawn() -> Self {
        Self::spawn_with(None).await
    }

    /// Spawn with `dataset` (raw JSON) as the seed file.
    pub async fn spawn_with_dataset(dataset: &str) -> Self {
        let path = std::env::temp_dir().join(format!("songs-seed-{}.json", Uuid::new_v4()));
        std::fs::write(&path, dataset).expect("Failed to write seed dataset");
        Self::spawn_with(Some(path)).await
    }

    async fn spawn_with(dataset_path: Option<PathBuf>) -> Self {
        std::env::set_var("MONGODB_SERVICE", "localhost");

        let mut config = SongsConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = format!("songs_test_{}", Uuid::new_v4());
        if let Some(path) = &dataset_path {
            config.seed.data_path = path.clone();
        }

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().database().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            dataset_path,
        }
    }

    pub async fn cleanup(&self) {
        let _ = self.db.drop(None).await;
        if let Some(path) = &self.dataset_path {
            let _ = tokio::fs::remove_file(path).await;
        }
    }
}
