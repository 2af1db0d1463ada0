use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::report::Verbosity;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub lidarr: LidarrConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
}

/// Connection settings for the Lidarr instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LidarrConfig {
    /// Base URL (e.g., "http://localhost:8686")
    pub url: String,
    /// Static API key sent as `X-Api-Key` on every request
    pub api_key: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Root folder for new artists when the lookup result carries none
    #[serde(default = "default_root_folder")]
    pub root_folder_path: String,
    #[serde(default = "default_profile_id")]
    pub quality_profile_id: u32,
    #[serde(default = "default_profile_id")]
    pub metadata_profile_id: u32,
}

fn default_timeout() -> u32 {
    30
}

fn default_root_folder() -> String {
    "/music".to_string()
}

fn default_profile_id() -> u32 {
    1
}

/// What a run does with the CSV entries.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Make sure every artist exists, monitoring nothing beyond the artist.
    ArtistsOnly,
    /// Make sure every artist exists and have Lidarr monitor all their albums.
    ArtistsWithAllAlbums,
    /// Make sure every (artist, album) pair exists and the album is monitored.
    #[default]
    SpecificAlbums,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunMode::ArtistsOnly => "artists only",
            RunMode::ArtistsWithAllAlbums => "artists with all albums",
            RunMode::SpecificAlbums => "specific albums",
        };
        f.write_str(name)
    }
}

/// Per-run behaviour. Fixed once reconciliation starts.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub struct RunConfig {
    #[serde(default)]
    pub mode: RunMode,
    /// Fuzzy album title matching (only used by `specific_albums`)
    #[serde(default)]
    pub fuzzy: bool,
}

/// Where outcome lines go.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_verbosity")]
    pub console: Verbosity,
    #[serde(default = "default_verbosity")]
    pub log: Verbosity,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            console: default_verbosity(),
            log: default_verbosity(),
            log_file: default_log_file(),
        }
    }
}

fn default_verbosity() -> Verbosity {
    Verbosity::ErrorsOnly
}

fn default_log_file() -> PathBuf {
    PathBuf::from("lidarr_output.log")
}

/// Delays inserted between units of work to stay under Lidarr's rate limits.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct PacingConfig {
    /// Pause after each artist or entry that reached Lidarr.
    #[serde(default = "default_unit_delay")]
    pub unit_delay_ms: u64,
    /// Pause after creating an artist, before its albums are listed.
    #[serde(default = "default_artist_created_delay")]
    pub artist_created_delay_ms: u64,
}

fn default_unit_delay() -> u64 {
    500
}

fn default_artist_created_delay() -> u64 {
    1000
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            unit_delay_ms: default_unit_delay(),
            artist_created_delay_ms: default_artist_created_delay(),
        }
    }
}

impl PacingConfig {
    /// No pauses at all.
    pub fn none() -> Self {
        Self {
            unit_delay_ms: 0,
            artist_created_delay_ms: 0,
        }
    }

    pub fn unit_delay(&self) -> Duration {
        Duration::from_millis(self.unit_delay_ms)
    }

    pub fn artist_created_delay(&self) -> Duration {
        Duration::from_millis(self.artist_created_delay_ms)
    }
}

/// Sanitized config for logging (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub lidarr: SanitizedLidarrConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
    pub pacing: PacingConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedLidarrConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
    pub root_folder_path: String,
    pub quality_profile_id: u32,
    pub metadata_profile_id: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            lidarr: SanitizedLidarrConfig {
                url: config.lidarr.url.clone(),
                api_key_configured: !config.lidarr.api_key.is_empty(),
                timeout_secs: config.lidarr.timeout_secs,
                root_folder_path: config.lidarr.root_folder_path.clone(),
                quality_profile_id: config.lidarr.quality_profile_id,
                metadata_profile_id: config.lidarr.metadata_profile_id,
            },
            run: config.run,
            output: config.output.clone(),
            pacing: config.pacing,
        }
    }
}
