pub mod songs;

pub use songs::{
    CountResponse, CreateSongRequest, InsertedIdResponse, MessageResponse, ObjectIdJson,
    SongListResponse, SongResponse, UpdateSongRequest,
};
