/// Favorite domain type
use crate::types::{TrackId, TrackSnapshot, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A track a listener has marked as favorite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Owner
    pub user_id: UserId,

    /// Favorited catalog track
    pub track_id: TrackId,

    /// Track metadata captured when the favorite was added
    pub track: TrackSnapshot,

    /// When the favorite was added
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    /// Create a favorite stamped with the current time
    pub fn new(user_id: UserId, track: TrackSnapshot) -> Self {
        Self {
            user_id,
            track_id: TrackId::new(track.id.clone()),
            track,
            created_at: Utc::now(),
        }
    }
}
