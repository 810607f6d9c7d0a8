use crate::models::Song;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Operations the HTTP layer needs from the document store.
///
/// Songs are addressed by their application `id`, never by the store's
/// `_id`.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Round-trips to the store without touching data.
    async fn ping(&self) -> Result<(), AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    async fn list(&self) -> Result<Vec<Song>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Song>, AppError>;

    /// Stores `song` and returns the identifier the store assigned.
    async fn insert(&self, song: Song) -> Result<ObjectId, AppError>;

    /// Sets `title` and `lyrics` on the song with `id`. Returns whether a
    /// song matched.
    async fn update_fields(&self, id: i64, title: &str, lyrics: &str) -> Result<bool, AppError>;

    /// Returns whether a song was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Discards the whole collection and stores `songs` in its place.
    async fn replace_all(&self, songs: Vec<Song>) -> Result<(), AppError>;
}
