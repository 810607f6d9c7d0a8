use crate::dtos::{
    CountResponse, CreateSongRequest, InsertedIdResponse, MessageResponse, SongListResponse,
    SongResponse, UpdateSongRequest,
};
use crate::models::Song;
use crate::services::record_song_mutation;
use crate::startup::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use service_core::error::AppError;

fn invalid_json() -> AppError {
    AppError::BadRequest(anyhow::anyhow!("Invalid JSON data"))
}

/// Parses a request body that must be a non-empty JSON object.
fn json_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = payload.map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection);
        invalid_json()
    })?;

    match &value {
        Value::Object(map) if !map.is_empty() => {}
        _ => return Err(invalid_json()),
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::debug!("Request body does not match the expected shape: {}", e);
        invalid_json()
    })
}

/// Only non-negative integer ids are routable; anything else is an
/// unknown resource.
fn song_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    match path {
        Ok(Path(id)) if id >= 0 => Ok(id),
        _ => Err(AppError::NotFound(anyhow::anyhow!("song not found"))),
    }
}

pub async fn count_songs(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let count = state.store.count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn list_songs(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let songs = state.store.list().await?;
    Ok(Json(SongListResponse {
        songs: songs.into_iter().map(SongResponse::from).collect(),
    }))
}

pub async fn get_song(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = song_id(path)?;
    let song = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("song with id {} not found", id)))?;

    Ok(Json(SongResponse::from(song)))
}

pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let CreateSongRequest {
        id,
        title,
        lyrics,
        mut extra,
    } = json_body(payload)?;

    let id =
        id.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing id in payload")))?;

    if let Some(existing) = state.store.find_by_id(id).await? {
        return Err(AppError::AlreadyExists(anyhow::anyhow!(
            "song with id {} already present",
            existing.id
        )));
    }

    // The store assigns `_id`.
    extra.remove("_id");
    let extra = mongodb::bson::to_document(&extra).map_err(|e| {
        tracing::debug!("Request body cannot be stored: {}", e);
        invalid_json()
    })?;

    let song = Song {
        oid: None,
        id,
        title,
        lyrics,
        extra,
    };

    let inserted_id = state.store.insert(song).await.map_err(|e| {
        tracing::error!(song_id = id, "Failed to insert song: {}", e);
        e
    })?;

    record_song_mutation("create");
    tracing::info!(song_id = id, inserted_id = %inserted_id, "Song created");

    Ok((
        StatusCode::CREATED,
        Json(InsertedIdResponse {
            inserted_id: inserted_id.into(),
        }),
    ))
}

pub async fn update_song(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let id = song_id(path)?;
    let request: UpdateSongRequest = json_body(payload)?;

    let (Some(title), Some(lyrics)) = (request.title, request.lyrics) else {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Missing title or lyrics in payload"
        )));
    };

    let song = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("song not found")))?;

    if !song.differs_from(&title, &lyrics) {
        return Ok(Json(MessageResponse::new("song found, but nothing updated")).into_response());
    }

    let matched = state
        .store
        .update_fields(id, &title, &lyrics)
        .await
        .map_err(|e| {
            tracing::error!(song_id = id, "Failed to update song: {}", e);
            e
        })?;

    // Re-read so the response reflects what is stored now.
    let updated = if matched {
        state.store.find_by_id(id).await?
    } else {
        None
    }
    .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("song not found")))?;

    record_song_mutation("update");
    tracing::info!(song_id = id, "Song updated");

    Ok(Json(SongResponse::from(updated)).into_response())
}

pub async fn delete_song(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = song_id(path)?;

    if state.store.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(anyhow::anyhow!("song not found")));
    }

    // Removed concurrently between the lookup and the delete.
    if !state.store.delete_by_id(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("song not found")));
    }

    record_song_mutation("delete");
    tracing::info!(song_id = id, "Song deleted");

    Ok(StatusCode::NO_CONTENT)
}
