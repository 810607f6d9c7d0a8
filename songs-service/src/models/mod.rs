pub mod song;

pub use song::Song;
