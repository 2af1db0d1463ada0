//! Records exchanged with the music catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A candidate returned by an artist lookup, not yet in the library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDescriptor {
    pub artist_name: String,
    /// MusicBrainz artist ID.
    pub foreign_artist_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder_path: Option<String>,
}

/// An artist already in the library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    pub id: i64,
    pub artist_name: String,
    pub foreign_artist_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder_path: Option<String>,
    #[serde(default)]
    pub monitored: bool,
}

/// An album belonging to a library artist.
///
/// Fields this crate does not model are kept in `extra` so an update can
/// send the document back without dropping anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub monitored: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AlbumRecord {
    pub fn new(id: i64, title: impl Into<String>, monitored: bool) -> Self {
        Self {
            id,
            title: title.into(),
            monitored,
            extra: Map::new(),
        }
    }
}

/// What the catalog should monitor when an artist is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorNewAlbums {
    /// Monitor and search for every existing album.
    All,
    /// Monitor only the artist entry.
    None,
}

impl MonitorNewAlbums {
    pub fn from_flag(monitor_all: bool) -> Self {
        if monitor_all {
            MonitorNewAlbums::All
        } else {
            MonitorNewAlbums::None
        }
    }

    /// Value of Lidarr's `addOptions.monitor` field.
    pub fn as_str(self) -> &'static str {
        match self {
            MonitorNewAlbums::All => "all",
            MonitorNewAlbums::None => "none",
        }
    }

    pub fn searches_existing(self) -> bool {
        self == MonitorNewAlbums::All
    }
}
