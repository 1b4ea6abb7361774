/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog track
///
/// Immutable once built by a catalog or collection view. The playback
/// coordinator receives tracks by value and never edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier
    pub id: TrackId,

    /// Track title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: Option<String>,

    /// Cover art URL
    pub artwork_url: Option<String>,

    /// Streamable media URL handed to the audio engine
    pub audio_url: String,

    /// Duration as reported by the catalog.
    ///
    /// The engine's figure wins once the media is loaded.
    pub duration: Duration,
}

impl Track {
    /// Create a track with the fields playback needs
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            name: name.into(),
            artist: artist.into(),
            album: None,
            artwork_url: None,
            audio_url: audio_url.into(),
            duration: Duration::ZERO,
        }
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the cover art URL
    #[must_use]
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }

    /// Set the catalog duration
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Denormalized copy of a track stored alongside favorites and playlists.
///
/// Field names match the catalog's JSON so stored rows can be rendered
/// without another catalog round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    #[serde(default)]
    pub album_name: String,
    #[serde(default)]
    pub album_image: String,
    pub audio: String,
    /// Seconds
    pub duration: u64,
}

impl From<&Track> for TrackSnapshot {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.as_str().to_string(),
            name: track.name.clone(),
            artist_name: track.artist.clone(),
            album_name: track.album.clone().unwrap_or_default(),
            album_image: track.artwork_url.clone().unwrap_or_default(),
            audio: track.audio_url.clone(),
            duration: track.duration.as_secs(),
        }
    }
}

impl From<TrackSnapshot> for Track {
    fn from(snapshot: TrackSnapshot) -> Self {
        Self {
            id: TrackId::new(snapshot.id),
            name: snapshot.name,
            artist: snapshot.artist_name,
            album: Some(snapshot.album_name).filter(|s| !s.is_empty()),
            artwork_url: Some(snapshot.album_image).filter(|s| !s.is_empty()),
            audio_url: snapshot.audio,
            duration: Duration::from_secs(snapshot.duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_optional_metadata() {
        let track = Track::new("42", "Song", "Artist", "https://cdn/42.mp3")
            .with_album("Album")
            .with_artwork("https://cdn/42.jpg")
            .with_duration(Duration::from_secs(215));

        assert_eq!(track.id.as_str(), "42");
        assert_eq!(track.album.as_deref(), Some("Album"));
        assert_eq!(track.duration, Duration::from_secs(215));
    }

    #[test]
    fn snapshot_without_album_restores_none() {
        let track = Track::new("7", "Untitled", "Someone", "https://cdn/7.mp3");
        let snapshot = TrackSnapshot::from(&track);
        assert_eq!(snapshot.album_name, "");

        let restored = Track::from(snapshot);
        assert_eq!(restored, track);
    }

    #[test]
    fn snapshot_uses_catalog_field_names() {
        let track = Track::new("9", "Song", "Band", "https://cdn/9.mp3")
            .with_duration(Duration::from_secs(61));
        let json = serde_json::to_value(TrackSnapshot::from(&track)).unwrap();

        assert_eq!(json["artist_name"], "Band");
        assert_eq!(json["audio"], "https://cdn/9.mp3");
        assert_eq!(json["duration"], 61);
    }
}
