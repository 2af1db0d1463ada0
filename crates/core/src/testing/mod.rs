//! Testing utilities and an in-memory catalog.
//!
//! [`MockCatalog`] stands in for a Lidarr instance so the reconciliation
//! engine can be exercised without a server.
//!
//! # Example
//!
//! ```rust,ignore
//! use albumsync_core::testing::{fixtures, MockCatalog};
//!
//! let catalog = MockCatalog::new();
//! catalog.add_library_artist("Air", vec![fixtures::album(1, "Moon Safari", false)]).await;
//! catalog.add_lookup_result("Justice", fixtures::artist_descriptor("Justice")).await;
//! ```

mod mock_catalog;

pub use mock_catalog::{CatalogOperation, MockCatalog, RecordedCatalogCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{AlbumRecord, ArtistDescriptor, ArtistRecord};
    use crate::entries::{Entry, EntrySet};

    /// Foreign ID the mock derives from an artist name.
    pub fn foreign_id(name: &str) -> String {
        format!("mbid-{}", name.to_lowercase().replace(' ', "-"))
    }

    /// Lookup candidate for `name`.
    pub fn artist_descriptor(name: &str) -> ArtistDescriptor {
        ArtistDescriptor {
            artist_name: name.to_string(),
            foreign_artist_id: foreign_id(name),
            root_folder_path: None,
        }
    }

    pub fn artist_record(id: i64, name: &str) -> ArtistRecord {
        ArtistRecord {
            id,
            artist_name: name.to_string(),
            foreign_artist_id: foreign_id(name),
            root_folder_path: Some("/music".to_string()),
            monitored: true,
        }
    }

    pub fn album(id: i64, title: &str, monitored: bool) -> AlbumRecord {
        AlbumRecord::new(id, title, monitored)
    }

    /// Entry set from (artist, album) pairs, in order.
    pub fn entries(pairs: &[(&str, &str)]) -> EntrySet {
        pairs
            .iter()
            .map(|(artist, album)| Entry::new(*artist, *album))
            .collect()
    }
}
