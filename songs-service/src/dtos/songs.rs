use crate::models::Song;
use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extended JSON form of a store identifier: `{"$oid": "<hex>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectIdJson {
    #[serde(rename = "$oid")]
    pub oid: String,
}

impl From<ObjectId> for ObjectIdJson {
    fn from(oid: ObjectId) -> Self {
        Self { oid: oid.to_hex() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SongResponse {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub oid: Option<ObjectIdJson>,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Song> for SongResponse {
    fn from(song: Song) -> Self {
        let extra = match Bson::Document(song.extra).into_relaxed_extjson() {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self {
            oid: song.oid.map(ObjectIdJson::from),
            id: song.id,
            title: song.title,
            lyrics: song.lyrics,
            extra,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SongListResponse {
    pub songs: Vec<SongResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InsertedIdResponse {
    #[serde(rename = "inserted id")]
    pub inserted_id: ObjectIdJson,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `POST /song`. Only `id` is required; everything else the
/// client sends is stored with the song.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSongRequest {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub lyrics: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `PUT /song/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSongRequest {
    pub title: Option<String>,
    pub lyrics: Option<String>,
}
