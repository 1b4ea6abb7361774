//! Catalog wire format and request paths
//!
//! The catalog proxy forwards the third-party music API verbatim. This
//! module turns those responses into [`Track`] values and builds the proxy
//! paths a [`Catalog`](crate::traits::Catalog) implementation requests.

use crate::error::{CoreError, Result};
use crate::types::{Track, TrackId};
use serde::Deserialize;
use std::time::Duration;
use url::form_urlencoded;

/// Status string the catalog reports on success
const STATUS_SUCCESS: &str = "success";

/// Response envelope returned by every catalog listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub headers: ResponseHeaders,
    #[serde(default)]
    pub results: Vec<CatalogTrack>,
}

/// Status block of a catalog response
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseHeaders {
    pub status: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub results_count: usize,
}

/// One track as the catalog describes it
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    /// Seconds
    #[serde(default)]
    pub duration: u64,
    pub artist_name: String,
    #[serde(default)]
    pub album_name: String,
    #[serde(default)]
    pub album_image: String,
    #[serde(default)]
    pub image: String,
    pub audio: String,
}

impl From<CatalogTrack> for Track {
    fn from(raw: CatalogTrack) -> Self {
        let artwork = if raw.album_image.is_empty() {
            raw.image
        } else {
            raw.album_image
        };

        Self {
            id: TrackId::new(raw.id),
            name: raw.name,
            artist: raw.artist_name,
            album: Some(raw.album_name).filter(|s| !s.is_empty()),
            artwork_url: Some(artwork).filter(|s| !s.is_empty()),
            audio_url: raw.audio,
            duration: Duration::from_secs(raw.duration),
        }
    }
}

impl CatalogResponse {
    /// Convert into tracks, rejecting failed responses.
    ///
    /// Tracks without a playable URL are dropped; the engine could not
    /// load them anyway.
    pub fn into_tracks(self) -> Result<Vec<Track>> {
        if self.headers.status != STATUS_SUCCESS {
            return Err(CoreError::unavailable(format!(
                "catalog returned {} ({}): {}",
                self.headers.status, self.headers.code, self.headers.error_message
            )));
        }

        let total = self.results.len();
        let tracks: Vec<Track> = self
            .results
            .into_iter()
            .filter(|t| !t.audio.is_empty())
            .map(Track::from)
            .collect();

        if tracks.len() < total {
            tracing::debug!(
                "Dropped {} catalog tracks without a media URL",
                total - tracks.len()
            );
        }

        Ok(tracks)
    }
}

/// Parse a raw catalog response body into tracks
pub fn parse_tracks(body: &str) -> Result<Vec<Track>> {
    let response: CatalogResponse = serde_json::from_str(body)?;
    response.into_tracks()
}

/// A listing request against the catalog proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    /// Free-text search
    Search { query: String, limit: usize },
    /// Currently popular tracks
    Trending { limit: usize },
    /// Tracks carrying a genre/tag
    ByTag { tag: String, limit: usize },
}

impl CatalogRequest {
    /// Path and query string relative to the proxy base URL
    pub fn path_and_query(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let mut query = form_urlencoded::Serializer::new(String::new());

        let endpoint = match self {
            Self::Search { query: q, limit } => {
                query.append_pair("q", q);
                query.append_pair("limit", &limit.to_string());
                "search"
            }
            Self::Trending { limit } => {
                query.append_pair("limit", &limit.to_string());
                "trending"
            }
            Self::ByTag { tag, limit } => {
                query.append_pair("genre", tag);
                query.append_pair("limit", &limit.to_string());
                "genres"
            }
        };

        format!("{base}/{endpoint}?{}", query.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artwork_falls_back_to_track_image() {
        let raw = CatalogTrack {
            id: "1".to_string(),
            name: "Song".to_string(),
            duration: 200,
            artist_name: "Artist".to_string(),
            album_name: String::new(),
            album_image: String::new(),
            image: "https://img/1.jpg".to_string(),
            audio: "https://cdn/1.mp3".to_string(),
        };

        let track = Track::from(raw);
        assert_eq!(track.artwork_url.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(track.album, None);
        assert_eq!(track.duration, Duration::from_secs(200));
    }

    #[test]
    fn request_paths_are_encoded() {
        let search = CatalogRequest::Search {
            query: "lo fi & chill".to_string(),
            limit: 20,
        };
        assert_eq!(
            search.path_and_query("/api/jamendo/"),
            "/api/jamendo/search?q=lo+fi+%26+chill&limit=20"
        );

        let tag = CatalogRequest::ByTag {
            tag: "jazz".to_string(),
            limit: 5,
        };
        assert_eq!(
            tag.path_and_query("/api/jamendo"),
            "/api/jamendo/genres?genre=jazz&limit=5"
        );
        assert_eq!(
            CatalogRequest::Trending { limit: 10 }.path_and_query("/api/jamendo"),
            "/api/jamendo/trending?limit=10"
        );
    }
}
