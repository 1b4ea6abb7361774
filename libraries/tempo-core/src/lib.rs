//! Tempo Player Core
//!
//! Platform-agnostic domain types, collaborator traits, configuration and
//! error handling shared by the Tempo Player crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `Favorite` and their ids
//! - **Catalog wire format**: parsing of the catalog proxy's responses
//! - **Collaborator Traits**: `Catalog`, `FavoritesStore`, `PlaylistStore`
//! - **Configuration**: `PlayerConfig` loaded from file and environment
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use tempo_core::catalog::parse_tracks;
//!
//! let body = r#"{
//!     "headers": { "status": "success", "code": 0, "results_count": 1 },
//!     "results": [{
//!         "id": "1204669",
//!         "name": "Wish You Were Here",
//!         "duration": 237,
//!         "artist_name": "Some Band",
//!         "album_name": "Echoes",
//!         "album_image": "https://img/1204669.jpg",
//!         "audio": "https://cdn/1204669.mp3"
//!     }]
//! }"#;
//!
//! let tracks = parse_tracks(body).unwrap();
//! assert_eq!(tracks[0].artist, "Some Band");
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{CatalogSettings, PlaybackSettings, PlayerConfig};
pub use error::{CoreError, Result};
pub use traits::{Catalog, FavoritesStore, PlaylistStore};
pub use types::{
    CreatePlaylist, Favorite, Playlist, PlaylistId, RepeatMode, Track, TrackId, TrackSnapshot,
    UpdatePlaylist, UserId,
};
