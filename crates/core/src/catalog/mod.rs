//! Music catalog integration.
//!
//! The reconciliation engine talks to the library through the
//! [`MusicCatalog`] trait. [`LidarrClient`] implements it over Lidarr's v1
//! REST API; `testing::MockCatalog` implements it in memory.

mod lidarr;
mod types;

pub use lidarr::LidarrClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, TLS...).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client could not be built from its configuration.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Operations the reconciliation engine needs from a music library.
///
/// Every call is a complete request/response; list operations return the
/// full result set.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Search for artists by name. Order is the catalog's relevance order.
    async fn lookup_artist(&self, term: &str) -> Result<Vec<ArtistDescriptor>, CatalogError>;

    /// Every artist currently in the library.
    async fn list_artists(&self) -> Result<Vec<ArtistRecord>, CatalogError>;

    /// Add an artist to the library.
    async fn add_artist(
        &self,
        artist: &ArtistDescriptor,
        monitor: MonitorNewAlbums,
    ) -> Result<(), CatalogError>;

    /// Every album of one library artist.
    async fn list_albums(&self, artist_id: i64) -> Result<Vec<AlbumRecord>, CatalogError>;

    /// Mark an album as monitored. Succeeds if it already was.
    async fn set_album_monitored(&self, album: &AlbumRecord) -> Result<(), CatalogError>;
}
