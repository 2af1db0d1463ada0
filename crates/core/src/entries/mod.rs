//! CSV entry loading.
//!
//! Reads the artist/album pairs of a playlist export into an [`EntrySet`].

mod loader;
mod types;

pub use loader::{load_entries, parse_entries, ALBUM_COLUMN, ARTIST_COLUMN};
pub use types::{Entry, EntrySet};

use thiserror::Error;

/// Errors that make the input unusable. All of them are run-fatal.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Failed to open CSV file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
}
