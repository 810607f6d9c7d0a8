//! Startup load of the bundled songs dataset.

use crate::models::Song;
use crate::services::store::SongStore;
use service_core::error::AppError;
use serde::Deserialize;
use std::path::Path;

/// One dataset entry. Unknown keys, including any exported `_id`, are ignored.
#[derive(Debug, Deserialize)]
struct SeedRecord {
    id: i64,
    title: String,
    lyrics: String,
}

/// Parse the dataset at `path`: a JSON array of `{id, title, lyrics}`.
///
/// The store assigns fresh identifiers on insert.
pub async fn load_dataset(path: &Path) -> Result<Vec<Song>, AppError> {
    let raw = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!("Failed to read seed dataset {}: {}", path.display(), e);
        AppError::from(e)
    })?;

    parse_dataset(&raw).map_err(|e| {
        tracing::error!("Failed to parse seed dataset {}: {}", path.display(), e);
        e
    })
}

fn parse_dataset(raw: &[u8]) -> Result<Vec<Song>, AppError> {
    let records: Vec<SeedRecord> = serde_json::from_slice(raw)?;
    Ok(records
        .into_iter()
        .map(|record| Song::new(record.id, record.title, record.lyrics))
        .collect())
}

/// Replace the collection contents with the dataset at `path`.
///
/// Returns the number of songs stored.
pub async fn seed(store: &dyn SongStore, path: &Path) -> Result<usize, AppError> {
    let songs = load_dataset(path).await?;
    let count = songs.len();

    store.replace_all(songs).await.map_err(|e| {
        tracing::error!("Failed to seed songs collection: {}", e);
        e
    })?;

    tracing::info!(count, path = %path.display(), "Seeded songs collection");
    Ok(count)
}
