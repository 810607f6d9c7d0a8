pub mod database;
pub mod memory;
pub mod metrics;
pub mod seeder;
pub mod store;

pub use database::MongoSongStore;
pub use memory::InMemorySongStore;
pub use metrics::{get_metrics, init_metrics, record_song_mutation};
pub use seeder::{load_dataset, seed};
pub use store::SongStore;
