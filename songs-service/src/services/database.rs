use crate::config::MongoConfig;
use crate::models::Song;
use crate::services::store::SongStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{ClientOptions, Credential, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;

const SONGS_COLLECTION: &str = "songs";

#[derive(Clone)]
pub struct MongoSongStore {
    client: MongoClient,
    db: Database,
}

impl MongoSongStore {
    /// Builds the driver client. The driver connects lazily, so an
    /// unreachable server or bad credentials surface on first use.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        let uri = config.uri();
        tracing::info!(uri = %uri, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(&uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB address {}: {}", uri, e);
            AppError::from(e)
        })?;
        options.app_name = Some("songs-service".to_string());

        if let Some((username, password)) = config.credentials() {
            options.credential = Some(
                Credential::builder()
                    .username(username.to_string())
                    .password(password.expose_secret().to_string())
                    .build(),
            );
        }

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client for {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(&config.database);
        tracing::info!(database = %config.database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        // Non-unique: duplicate ids are rejected by the create handler.
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("song_id_lookup".to_string())
                    .build(),
            )
            .build();

        self.songs()
            .create_index(id_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create id index on songs collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on songs.id");

        Ok(())
    }

    pub fn songs(&self) -> Collection<Song> {
        self.db.collection(SONGS_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl SongStore for MongoSongStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.songs().count_documents(None, None).await?)
    }

    async fn list(&self) -> Result<Vec<Song>, AppError> {
        let cursor = self.songs().find(None, None).await?;
        let songs: Vec<Song> = cursor.try_collect().await?;
        Ok(songs)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Song>, AppError> {
        Ok(self.songs().find_one(doc! { "id": id }, None).await?)
    }

    async fn insert(&self, song: Song) -> Result<ObjectId, AppError> {
        let result = self.songs().insert_one(&song, None).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "store returned a non-ObjectId _id: {}",
                result.inserted_id
            ))
        })
    }

    async fn update_fields(&self, id: i64, title: &str, lyrics: &str) -> Result<bool, AppError> {
        let result = self
            .songs()
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "title": title, "lyrics": lyrics } },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = self.songs().delete_one(doc! { "id": id }, None).await?;
        Ok(result.deleted_count == 1)
    }

    async fn replace_all(&self, songs: Vec<Song>) -> Result<(), AppError> {
        let collection = self.songs();
        collection.drop(None).await?;

        // insert_many rejects an empty batch
        if !songs.is_empty() {
            collection.insert_many(songs, None).await?;
        }
        Ok(())
    }
}
