pub mod health;
pub mod songs;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use songs::{count_songs, create_song, delete_song, get_song, list_songs, update_song};
