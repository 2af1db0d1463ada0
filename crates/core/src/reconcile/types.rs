use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::config::RunMode;
use crate::report::Outcome;

/// Why a single entry could not be reconciled.
///
/// Always scoped to one entry: the run reports it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// Lookup returned nothing (or failed).
    #[error("Artist not found: {artist}")]
    ArtistNotFound { artist: String },

    #[error("Failed to add artist: {artist}")]
    ArtistCreateFailed { artist: String, reason: String },

    /// Created, but absent from the refreshed library listing.
    #[error("Artist added but not yet in library: {artist}")]
    ArtistNotVisible { artist: String },

    #[error("Album not found: {album} by {artist}")]
    AlbumNotFound { artist: String, album: String },

    #[error("Failed to monitor album: {album} by {artist}")]
    AlbumUpdateFailed {
        artist: String,
        album: String,
        reason: String,
    },
}

impl ReconcileError {
    fn marker(&self) -> &'static str {
        match self {
            ReconcileError::AlbumNotFound { .. } => "⚠️",
            _ => "❌",
        }
    }
}

impl From<&ReconcileError> for Outcome {
    fn from(err: &ReconcileError) -> Self {
        Outcome::error(format!("{} {}", err.marker(), err))
    }
}

/// Totals for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub mode: RunMode,
    /// Artists (artists modes) or entries (specific albums) processed.
    pub units: usize,
    /// Entries skipped as case-insensitive duplicates.
    pub duplicates_skipped: usize,
    pub successes: usize,
    pub errors: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub(crate) fn start(mode: RunMode) -> Self {
        let now = Utc::now();
        Self {
            mode,
            units: 0,
            duplicates_skipped: 0,
            successes: 0,
            errors: 0,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::OutcomeKind;

    #[test]
    fn test_error_outcome_markers() {
        let outcome = Outcome::from(&ReconcileError::AlbumNotFound {
            artist: "Air".to_string(),
            album: "Talkie Walkie".to_string(),
        });
        assert_eq!(outcome.kind, OutcomeKind::Error);
        assert_eq!(outcome.message, "⚠️ Album not found: Talkie Walkie by Air");

        let outcome = Outcome::from(&ReconcileError::ArtistCreateFailed {
            artist: "Air".to_string(),
            reason: "HTTP 500".to_string(),
        });
        assert_eq!(outcome.message, "❌ Failed to add artist: Air");
    }
}
