//! Mock music catalog for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{
    AlbumRecord, ArtistDescriptor, ArtistRecord, CatalogError, MonitorNewAlbums, MusicCatalog,
};

/// Catalog operations, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOperation {
    LookupArtist,
    ListArtists,
    AddArtist,
    ListAlbums,
    SetAlbumMonitored,
}

/// A recorded catalog call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCatalogCall {
    LookupArtist { term: String },
    ListArtists,
    AddArtist {
        artist_name: String,
        foreign_artist_id: String,
        monitor: MonitorNewAlbums,
    },
    ListAlbums { artist_id: i64 },
    SetAlbumMonitored { album_id: i64 },
}

#[derive(Debug, Default)]
struct CatalogState {
    artists: Vec<ArtistRecord>,
    /// Lookup results keyed by lower-cased search term.
    lookups: HashMap<String, Vec<ArtistDescriptor>>,
    /// Albums by artist ID.
    albums: HashMap<i64, Vec<AlbumRecord>>,
    /// Albums handed to an artist when it gets created, by foreign ID.
    albums_on_create: HashMap<String, Vec<AlbumRecord>>,
    next_artist_id: i64,
}

/// Mock implementation of the MusicCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Seed library artists, lookup results and albums
/// - Creating an artist makes it visible to `list_artists`
/// - Track calls for assertions
/// - Fail selected operations
///
/// # Example
///
/// ```rust,ignore
/// use albumsync_core::testing::{MockCatalog, fixtures};
///
/// let catalog = MockCatalog::new();
/// catalog.add_lookup_result("daft punk", fixtures::artist_descriptor("Daft Punk")).await;
///
/// let results = catalog.lookup_artist("Daft Punk").await?;
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockCatalog {
    state: Arc<RwLock<CatalogState>>,
    calls: Arc<RwLock<Vec<RecordedCatalogCall>>>,
    failing: Arc<RwLock<HashSet<CatalogOperation>>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CatalogState {
                next_artist_id: 1,
                ..Default::default()
            })),
            calls: Arc::new(RwLock::new(Vec::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    // =========================================================================
    // Library Configuration
    // =========================================================================

    /// Put an artist in the library. Returns the assigned ID.
    pub async fn add_library_artist(&self, name: &str, albums: Vec<AlbumRecord>) -> i64 {
        let mut state = self.state.write().await;
        let id = state.next_artist_id;
        state.next_artist_id += 1;
        state.artists.push(ArtistRecord {
            id,
            artist_name: name.to_string(),
            foreign_artist_id: format!("mbid-{}", name.to_lowercase().replace(' ', "-")),
            root_folder_path: Some("/music".to_string()),
            monitored: true,
        });
        state.albums.insert(id, albums);
        id
    }

    /// Register a lookup result for a search term (matched ignoring case).
    pub async fn add_lookup_result(&self, term: &str, artist: ArtistDescriptor) {
        self.state
            .write()
            .await
            .lookups
            .entry(term.to_lowercase())
            .or_default()
            .push(artist);
    }

    /// Albums the artist with this foreign ID will have once created.
    pub async fn set_albums_on_create(&self, foreign_artist_id: &str, albums: Vec<AlbumRecord>) {
        self.state
            .write()
            .await
            .albums_on_create
            .insert(foreign_artist_id.to_string(), albums);
    }

    /// Snapshot of library artists.
    pub async fn artists(&self) -> Vec<ArtistRecord> {
        self.state.read().await.artists.clone()
    }

    /// Snapshot of one artist's albums.
    pub async fn albums(&self, artist_id: i64) -> Vec<AlbumRecord> {
        self.state
            .read()
            .await
            .albums
            .get(&artist_id)
            .cloned()
            .unwrap_or_default()
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCatalogCall> {
        self.calls.read().await.clone()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    /// Number of recorded calls matching a predicate.
    pub async fn count_calls(&self, predicate: impl Fn(&RecordedCatalogCall) -> bool) -> usize {
        self.calls.read().await.iter().filter(|c| predicate(c)).count()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Make every call of `operation` fail until [`Self::recover`] is called.
    pub async fn fail(&self, operation: CatalogOperation) {
        self.failing.write().await.insert(operation);
    }

    /// Stop failing `operation`.
    pub async fn recover(&self, operation: CatalogOperation) {
        self.failing.write().await.remove(&operation);
    }

    async fn check(&self, operation: CatalogOperation) -> Result<(), CatalogError> {
        if self.failing.read().await.contains(&operation) {
            return Err(CatalogError::ApiError {
                status: 500,
                message: format!("injected {:?} failure", operation),
            });
        }
        Ok(())
    }

    async fn record(&self, call: RecordedCatalogCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl MusicCatalog for MockCatalog {
    async fn lookup_artist(&self, term: &str) -> Result<Vec<ArtistDescriptor>, CatalogError> {
        self.record(RecordedCatalogCall::LookupArtist {
            term: term.to_string(),
        })
        .await;
        self.check(CatalogOperation::LookupArtist).await?;

        Ok(self
            .state
            .read()
            .await
            .lookups
            .get(&term.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    async fn list_artists(&self) -> Result<Vec<ArtistRecord>, CatalogError> {
        self.record(RecordedCatalogCall::ListArtists).await;
        self.check(CatalogOperation::ListArtists).await?;

        Ok(self.state.read().await.artists.clone())
    }

    async fn add_artist(
        &self,
        artist: &ArtistDescriptor,
        monitor: MonitorNewAlbums,
    ) -> Result<(), CatalogError> {
        self.record(RecordedCatalogCall::AddArtist {
            artist_name: artist.artist_name.clone(),
            foreign_artist_id: artist.foreign_artist_id.clone(),
            monitor,
        })
        .await;
        self.check(CatalogOperation::AddArtist).await?;

        let mut state = self.state.write().await;
        if state
            .artists
            .iter()
            .any(|a| a.foreign_artist_id == artist.foreign_artist_id)
        {
            return Err(CatalogError::ApiError {
                status: 400,
                message: "This artist has already been added".to_string(),
            });
        }

        let id = state.next_artist_id;
        state.next_artist_id += 1;
        state.artists.push(ArtistRecord {
            id,
            artist_name: artist.artist_name.clone(),
            foreign_artist_id: artist.foreign_artist_id.clone(),
            root_folder_path: artist.root_folder_path.clone(),
            monitored: true,
        });

        let mut albums = state
            .albums_on_create
            .remove(&artist.foreign_artist_id)
            .unwrap_or_default();
        if monitor == MonitorNewAlbums::All {
            for album in &mut albums {
                album.monitored = true;
            }
        }
        state.albums.insert(id, albums);

        Ok(())
    }

    async fn list_albums(&self, artist_id: i64) -> Result<Vec<AlbumRecord>, CatalogError> {
        self.record(RecordedCatalogCall::ListAlbums { artist_id }).await;
        self.check(CatalogOperation::ListAlbums).await?;

        Ok(self
            .state
            .read()
            .await
            .albums
            .get(&artist_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_album_monitored(&self, album: &AlbumRecord) -> Result<(), CatalogError> {
        self.record(RecordedCatalogCall::SetAlbumMonitored { album_id: album.id })
            .await;
        self.check(CatalogOperation::SetAlbumMonitored).await?;

        let mut state = self.state.write().await;
        let stored = state
            .albums
            .values_mut()
            .flat_map(|albums| albums.iter_mut())
            .find(|a| a.id == album.id);

        match stored {
            Some(stored) => {
                stored.monitored = true;
                Ok(())
            }
            None => Err(CatalogError::ApiError {
                status: 404,
                message: format!("Album {} not found", album.id),
            }),
        }
    }
}
