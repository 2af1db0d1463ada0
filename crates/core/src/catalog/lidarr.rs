//! Lidarr v1 API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::LidarrConfig;

use super::{
    AlbumRecord, ArtistDescriptor, ArtistRecord, CatalogError, MonitorNewAlbums, MusicCatalog,
};

/// Lidarr API client.
pub struct LidarrClient {
    client: Client,
    config: LidarrConfig,
}

impl LidarrClient {
    /// Create a new Lidarr client. The API key is attached to every request.
    pub fn new(config: LidarrConfig) -> Result<Self, CatalogError> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| CatalogError::NotConfigured("API key is not a valid header value".into()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("X-Api-Key", api_key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the base URL without trailing slash.
    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url(), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Lidarr GET");

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(format!("{}: {}", path, e)))
    }

    fn add_artist_payload(
        &self,
        artist: &ArtistDescriptor,
        monitor: MonitorNewAlbums,
    ) -> AddArtistPayload {
        AddArtistPayload {
            artist_name: artist.artist_name.clone(),
            foreign_artist_id: artist.foreign_artist_id.clone(),
            metadata_profile_id: self.config.metadata_profile_id,
            quality_profile_id: self.config.quality_profile_id,
            monitored: true,
            root_folder_path: artist
                .root_folder_path
                .clone()
                .unwrap_or_else(|| self.config.root_folder_path.clone()),
            add_options: AddOptions {
                search_for_missing_albums: monitor.searches_existing(),
                monitor: monitor.as_str(),
            },
        }
    }
}

/// Turn a non-success status into an error, keeping a short body excerpt.
async fn check_status(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CatalogError::ApiError {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    })
}

#[async_trait]
impl MusicCatalog for LidarrClient {
    async fn lookup_artist(&self, term: &str) -> Result<Vec<ArtistDescriptor>, CatalogError> {
        self.get_json(&format!("/artist/lookup?term={}", urlencoding::encode(term)))
            .await
    }

    async fn list_artists(&self) -> Result<Vec<ArtistRecord>, CatalogError> {
        self.get_json("/artist").await
    }

    async fn add_artist(
        &self,
        artist: &ArtistDescriptor,
        monitor: MonitorNewAlbums,
    ) -> Result<(), CatalogError> {
        let url = self.endpoint("/artist");
        let payload = self.add_artist_payload(artist, monitor);
        debug!(
            artist = %artist.artist_name,
            monitor = monitor.as_str(),
            "Lidarr add artist"
        );

        let response = self.client.post(&url).json(&payload).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn list_albums(&self, artist_id: i64) -> Result<Vec<AlbumRecord>, CatalogError> {
        self.get_json(&format!("/album?artistId={}", artist_id)).await
    }

    async fn set_album_monitored(&self, album: &AlbumRecord) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("/album/{}", album.id));
        let mut updated = album.clone();
        updated.monitored = true;
        debug!(album_id = album.id, title = %album.title, "Lidarr monitor album");

        let response = self.client.put(&url).json(&updated).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

// ============================================================================
// Lidarr API Request Types (private)
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddArtistPayload {
    artist_name: String,
    foreign_artist_id: String,
    metadata_profile_id: u32,
    quality_profile_id: u32,
    monitored: bool,
    root_folder_path: String,
    add_options: AddOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddOptions {
    search_for_missing_albums: bool,
    monitor: &'static str,
}
