/// Collaborator traits for Tempo Player
///
/// Playback never calls these. They describe the services the UI layer
/// talks to next to the coordinator.
use crate::error::Result;
use crate::types::{
    CreatePlaylist, Favorite, Playlist, PlaylistId, Track, TrackSnapshot, UpdatePlaylist, UserId,
};
use async_trait::async_trait;

/// Third-party catalog, reached through the server's proxy
///
/// Failures are reported as `CoreError::ServiceUnavailable` so the UI can
/// offer a retry.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Free-text search
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>>;

    /// Popular tracks right now
    async fn trending(&self, limit: usize) -> Result<Vec<Track>>;

    /// Tracks carrying a tag (genre, mood, ...)
    async fn by_tag(&self, tag: &str, limit: usize) -> Result<Vec<Track>>;
}

/// Per-user favorite tracks
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// All favorites of a user, newest first
    async fn favorites(&self, user_id: &UserId) -> Result<Vec<Favorite>>;

    /// Mark a track as favorite; adding twice keeps a single entry
    async fn add_favorite(&self, user_id: &UserId, track: TrackSnapshot) -> Result<Favorite>;

    /// Remove a favorite; returns whether anything was removed
    async fn remove_favorite(&self, user_id: &UserId, track_id: &str) -> Result<bool>;

    /// Whether a track is among the user's favorites
    async fn is_favorite(&self, user_id: &UserId, track_id: &str) -> Result<bool>;
}

/// Per-user playlists
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// All playlists owned by a user
    async fn playlists(&self, user_id: &UserId) -> Result<Vec<Playlist>>;

    /// Get a playlist by ID
    async fn playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Create a playlist
    async fn create_playlist(&self, user_id: &UserId, playlist: CreatePlaylist)
        -> Result<Playlist>;

    /// Apply a partial update; `None` if the playlist does not exist
    async fn update_playlist(
        &self,
        id: &PlaylistId,
        update: UpdatePlaylist,
    ) -> Result<Option<Playlist>>;

    /// Delete a playlist; returns whether it existed
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<bool>;
}
