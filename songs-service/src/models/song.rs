use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A song as stored in the `songs` collection.
///
/// `id` is the application key used by the API; `oid` is the store's own
/// `_id`, assigned on insert. Keys beyond the known ones are kept in
/// `extra` and stored alongside them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub oid: Option<ObjectId>,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

impl Song {
    pub fn new(id: i64, title: impl Into<String>, lyrics: impl Into<String>) -> Self {
        Self {
            oid: None,
            id,
            title: Some(title.into()),
            lyrics: Some(lyrics.into()),
            extra: Document::new(),
        }
    }

    /// True when `title` or `lyrics` differ from what is stored.
    pub fn differs_from(&self, title: &str, lyrics: &str) -> bool {
        self.title.as_deref() != Some(title) || self.lyrics.as_deref() != Some(lyrics)
    }
}
