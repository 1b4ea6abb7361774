mod favorite;
mod ids;
mod playlist;
mod repeat;
mod track;

pub use favorite::Favorite;
pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::{CreatePlaylist, Playlist, UpdatePlaylist};
pub use repeat::RepeatMode;
pub use track::{Track, TrackSnapshot};
