//! Process-local `SongStore`, used to drive the router without a database.

use crate::models::Song;
use crate::services::store::SongStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemorySongStore {
    songs: RwLock<Vec<Song>>,
    writes: AtomicUsize,
}

impl InMemorySongStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutating calls served so far (insert, update, delete, replace).
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SongStore for InMemorySongStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.songs.read().await.len() as u64)
    }

    async fn list(&self) -> Result<Vec<Song>, AppError> {
        Ok(self.songs.read().await.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Song>, AppError> {
        Ok(self.songs.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, mut song: Song) -> Result<ObjectId, AppError> {
        self.record_write();
        let oid = *song.oid.get_or_insert_with(ObjectId::new);
        self.songs.write().await.push(song);
        Ok(oid)
    }

    async fn update_fields(&self, id: i64, title: &str, lyrics: &str) -> Result<bool, AppError> {
        self.record_write();
        let mut songs = self.songs.write().await;
        match songs.iter_mut().find(|s| s.id == id) {
            Some(song) => {
                song.title = Some(title.to_string());
                song.lyrics = Some(lyrics.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        self.record_write();
        let mut songs = self.songs.write().await;
        match songs.iter().position(|s| s.id == id) {
            Some(index) => {
                songs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace_all(&self, songs: Vec<Song>) -> Result<(), AppError> {
        self.record_write();
        let songs = songs
            .into_iter()
            .map(|mut song| {
                song.oid.get_or_insert_with(ObjectId::new);
                song
            })
            .collect();
        *self.songs.write().await = songs;
        Ok(())
    }
}
