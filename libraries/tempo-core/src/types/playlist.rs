/// Playlist domain types
use crate::types::{PlaylistId, TrackSnapshot, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Owner user ID
    pub user_id: UserId,

    /// Playlist name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Tracks in playback order
    pub tracks: Vec<TrackSnapshot>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new, empty playlist
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            user_id,
            name: name.into(),
            description: None,
            tracks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update
    pub fn apply(&mut self, update: UpdatePlaylist) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(tracks) = update.tracks {
            self.tracks = tracks;
        }
    }

    /// Whether the playlist already holds a track
    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }
}

/// Data for creating a playlist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tracks: Vec<TrackSnapshot>,
}

/// Partial playlist update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePlaylist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub tracks: Option<Vec<TrackSnapshot>>,
}
