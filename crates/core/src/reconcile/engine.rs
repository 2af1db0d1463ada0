//! The reconciliation engine.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::catalog::{ArtistDescriptor, ArtistRecord, MonitorNewAlbums, MusicCatalog};
use crate::config::{PacingConfig, RunConfig, RunMode};
use crate::entries::{Entry, EntrySet};
use crate::matching::{find_album, MatchPolicy};
use crate::report::{Outcome, Reporter};

use super::cache::ArtistCache;
use super::types::{ReconcileError, RunSummary};

/// Drives one run: owns the artist cache, the reporter and the pacing.
pub struct Reconciler {
    catalog: Arc<dyn MusicCatalog>,
    run: RunConfig,
    pacing: PacingConfig,
    reporter: Reporter,
    cache: ArtistCache,
}

impl Reconciler {
    pub fn new(
        catalog: Arc<dyn MusicCatalog>,
        run: RunConfig,
        pacing: PacingConfig,
        reporter: Reporter,
    ) -> Self {
        Self {
            catalog,
            run,
            pacing,
            reporter,
            cache: ArtistCache::new(),
        }
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn into_reporter(self) -> Reporter {
        self.reporter
    }

    /// Reconcile every entry according to the configured mode.
    ///
    /// Entry-level failures are reported and never abort the run.
    pub async fn run(&mut self, entries: &EntrySet) -> RunSummary {
        let mut summary = RunSummary::start(self.run.mode);
        let before = self.reporter.tally();

        let planned = planned_units(self.run.mode, entries);
        info!(
            mode = %self.run.mode,
            fuzzy = self.run.fuzzy,
            entries = entries.len(),
            units = planned,
            "Starting reconciliation"
        );
        let unit_name = match self.run.mode {
            RunMode::SpecificAlbums => "albums",
            _ => "artists",
        };
        self.reporter.report(&Outcome::info(format!(
            "🎧 Mode: {} ({} {})",
            self.run.mode, planned, unit_name
        )));

        self.refresh_cache().await;

        match self.run.mode {
            RunMode::ArtistsOnly => {
                self.sync_artists(entries, MonitorNewAlbums::None, &mut summary)
                    .await
            }
            RunMode::ArtistsWithAllAlbums => {
                self.sync_artists(entries, MonitorNewAlbums::All, &mut summary)
                    .await
            }
            RunMode::SpecificAlbums => self.sync_albums(entries, &mut summary).await,
        }

        let after = self.reporter.tally();
        summary.successes = after.successes - before.successes;
        summary.errors = after.errors - before.errors;
        summary.finished_at = Utc::now();

        info!(
            units = summary.units,
            successes = summary.successes,
            errors = summary.errors,
            duplicates = summary.duplicates_skipped,
            "Reconciliation finished"
        );
        self.reporter.report(&Outcome::info(format!(
            "📋 Done: {} processed, {} succeeded, {} failed",
            summary.units, summary.successes, summary.errors
        )));

        summary
    }

    // =========================================================================
    // Artists modes
    // =========================================================================

    async fn sync_artists(
        &mut self,
        entries: &EntrySet,
        monitor: MonitorNewAlbums,
        summary: &mut RunSummary,
    ) {
        for name in entries.unique_artists() {
            summary.units += 1;

            if self.cache.get(name).is_some() {
                self.reporter
                    .report(&Outcome::success(format!("✔️ Artist already in Lidarr: {}", name)));
                continue;
            }

            match self.create_artist(name, monitor).await {
                Ok(_) => self
                    .reporter
                    .report(&Outcome::success(format!("✅ Added artist: {}", name))),
                Err(e) => self.reporter.report(&Outcome::from(&e)),
            }

            self.pause(self.pacing.unit_delay()).await;
        }
    }

    // =========================================================================
    // Specific albums mode
    // =========================================================================

    async fn sync_albums(&mut self, entries: &EntrySet, summary: &mut RunSummary) {
        let mut seen = HashSet::new();

        for entry in entries {
            if !seen.insert(entry.dedup_key()) {
                debug!(artist = %entry.artist, album = %entry.album, "Skipping duplicate entry");
                summary.duplicates_skipped += 1;
                continue;
            }
            summary.units += 1;

            match self.sync_album(entry).await {
                Ok(outcome) => self.reporter.report(&outcome),
                Err(e) => self.reporter.report(&Outcome::from(&e)),
            }

            self.pause(self.pacing.unit_delay()).await;
        }
    }

    /// Resolve the artist, match the album and make sure it is monitored.
    async fn sync_album(&mut self, entry: &Entry) -> Result<Outcome, ReconcileError> {
        let artist = self.resolve_artist(&entry.artist).await?;

        let albums = match self.catalog.list_albums(artist.id).await {
            Ok(albums) => albums,
            Err(e) => {
                warn!(
                    artist = %entry.artist,
                    artist_id = artist.id,
                    "Failed to list albums, treating as none: {}",
                    e
                );
                Vec::new()
            }
        };

        let policy = MatchPolicy::from_fuzzy(self.run.fuzzy);
        let album = find_album(&entry.album, &albums, policy).ok_or_else(|| {
            ReconcileError::AlbumNotFound {
                artist: entry.artist.clone(),
                album: entry.album.clone(),
            }
        })?;

        if album.monitored {
            return Ok(Outcome::success(format!(
                "✔️ Already monitored: {} by {}",
                album.title, entry.artist
            )));
        }

        self.catalog.set_album_monitored(album).await.map_err(|e| {
            warn!(album_id = album.id, "Monitor update failed: {}", e);
            ReconcileError::AlbumUpdateFailed {
                artist: entry.artist.clone(),
                album: album.title.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Outcome::success(format!(
            "✅ Monitoring album: {} by {}",
            album.title, entry.artist
        )))
    }

    /// Library record for `name`, creating the artist when it is missing.
    ///
    /// After a creation the whole cache is re-read so the new artist (and its
    /// ID) is known before albums are listed.
    async fn resolve_artist(&mut self, name: &str) -> Result<ArtistRecord, ReconcileError> {
        if let Some(artist) = self.cache.get(name) {
            return Ok(artist.clone());
        }

        let created = self.create_artist(name, MonitorNewAlbums::None).await?;
        self.reporter
            .report(&Outcome::info(format!("✅ Added artist: {}", name)));

        self.pause(self.pacing.artist_created_delay()).await;
        self.refresh_cache().await;

        self.cache
            .get(name)
            .or_else(|| self.cache.get_by_foreign_id(&created.foreign_artist_id))
            .cloned()
            .ok_or_else(|| ReconcileError::ArtistNotVisible {
                artist: name.to_string(),
            })
    }

    // =========================================================================
    // Shared steps
    // =========================================================================

    /// Look the artist up and add the first candidate to the library.
    ///
    /// A failed lookup counts as "no candidates".
    async fn create_artist(
        &self,
        name: &str,
        monitor: MonitorNewAlbums,
    ) -> Result<ArtistDescriptor, ReconcileError> {
        let candidates = match self.catalog.lookup_artist(name).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(artist = %name, "Artist lookup failed, treating as not found: {}", e);
                Vec::new()
            }
        };

        let Some(candidate) = candidates.into_iter().next() else {
            return Err(ReconcileError::ArtistNotFound {
                artist: name.to_string(),
            });
        };

        debug!(
            artist = %name,
            candidate = %candidate.artist_name,
            foreign_id = %candidate.foreign_artist_id,
            "Adding artist"
        );

        self.catalog
            .add_artist(&candidate, monitor)
            .await
            .map_err(|e| {
                warn!(artist = %name, "Add artist failed: {}", e);
                ReconcileError::ArtistCreateFailed {
                    artist: name.to_string(),
                    reason: e.to_string(),
                }
            })?;

        Ok(candidate)
    }

    /// Replace the artist cache with the library's current listing.
    ///
    /// A failed listing leaves an empty cache, so every artist looks missing.
    async fn refresh_cache(&mut self) {
        match self.catalog.list_artists().await {
            Ok(artists) => {
                debug!(count = artists.len(), "Artist cache refreshed");
                self.cache.replace(artists);
            }
            Err(e) => {
                warn!("Failed to list library artists, treating library as empty: {}", e);
                self.cache.replace(Vec::new());
            }
        }
    }

    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Number of units a run in `mode` will process.
fn planned_units(mode: RunMode, entries: &EntrySet) -> usize {
    match mode {
        RunMode::ArtistsOnly | RunMode::ArtistsWithAllAlbums => entries.unique_artists().len(),
        RunMode::SpecificAlbums => entries
            .iter()
            .map(Entry::dedup_key)
            .collect::<HashSet<_>>()
            .len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AlbumRecord;
    use crate::report::{MemorySink, Verbosity};
    use crate::testing::{fixtures, CatalogOperation, MockCatalog, RecordedCatalogCall};

    fn reconciler(catalog: &MockCatalog, mode: RunMode, fuzzy: bool) -> (Reconciler, MemorySink) {
        let sink = MemorySink::new();
        let reporter = Reporter::console_only(Verbosity::All, Box::new(sink.clone()));
        let reconciler = Reconciler::new(
            Arc::new(catalog.clone()),
            RunConfig { mode, fuzzy },
            PacingConfig::none(),
            reporter,
        );
        (reconciler, sink)
    }

    fn entries(pairs: &[(&str, &str)]) -> EntrySet {
        pairs.iter().map(|(a, b)| Entry::new(*a, *b)).collect()
    }

    /// Outcome lines without the run banner and summary.
    fn body(sink: &MemorySink) -> Vec<String> {
        let lines = sink.lines();
        lines[1..lines.len() - 1].to_vec()
    }

    #[test]
    fn test_planned_units() {
        let set = entries(&[("A", "X"), ("a", "x"), ("A", "Y"), ("B", "X")]);
        assert_eq!(planned_units(RunMode::SpecificAlbums, &set), 3);
        assert_eq!(planned_units(RunMode::ArtistsOnly, &set), 2);
    }

    #[tokio::test]
    async fn test_dedup_ignores_case() {
        let catalog = MockCatalog::new();
        catalog
            .add_library_artist("A", vec![fixtures::album(1, "X", true)])
            .await;
        let (mut reconciler, sink) = reconciler(&catalog, RunMode::SpecificAlbums, false);

        let summary = reconciler
            .run(&entries(&[("A", "X"), ("a", "x"), ("A", "X")]))
            .await;

        assert_eq!(summary.units, 1);
        assert_eq!(summary.duplicates_skipped, 1);
        assert_eq!(body(&sink).len(), 1);
        assert_eq!(
            catalog
                .count_calls(|c| matches!(c, RecordedCatalogCall::ListAlbums { .. }))
                .await,
            1
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_artist_not_found() {
        let catalog = MockCatalog::new();
        catalog
            .add_lookup_result("Air", fixtures::artist_descriptor("Air"))
            .await;
        catalog.fail(CatalogOperation::LookupArtist).await;
        let (mut reconciler, sink) = reconciler(&catalog, RunMode::SpecificAlbums, false);

        let summary = reconciler.run(&entries(&[("Air", "Moon Safari")])).await;

        assert_eq!(summary.errors, 1);
        assert_eq!(body(&sink), vec!["❌ Artist not found: Air"]);
        assert_eq!(
            catalog
                .count_calls(|c| matches!(c, RecordedCatalogCall::AddArtist { .. }))
                .await,
            0
        );
    }

    #[tokio::test]
    async fn test_album_list_failure_is_album_not_found() {
        let catalog = MockCatalog::new();
        catalog
            .add_library_artist("Air", vec![fixtures::album(1, "Moon Safari", false)])
            .await;
        catalog.fail(CatalogOperation::ListAlbums).await;
        let (mut reconciler, sink) = reconciler(&catalog, RunMode::SpecificAlbums, false);

        reconciler.run(&entries(&[("Air", "Moon Safari")])).await;

        assert_eq!(body(&sink), vec!["⚠️ Album not found: Moon Safari by Air"]);
    }

    #[tokio::test]
    async fn test_update_failure_reported_and_run_continues() {
        let catalog = MockCatalog::new();
        catalog
            .add_library_artist(
                "Air",
                vec![
                    fixtures::album(1, "Moon Safari", false),
                    fixtures::album(2, "Talkie Walkie", true),
                ],
            )
            .await;
        catalog.fail(CatalogOperation::SetAlbumMonitored).await;
        let (mut reconciler, sink) = reconciler(&catalog, RunMode::SpecificAlbums, false);

        let summary = reconciler
            .run(&entries(&[("Air", "Moon Safari"), ("Air", "Talkie Walkie")]))
            .await;

        assert_eq!(summary.errors, 1);
        assert_eq!(summary.successes, 1);
        assert_eq!(
            body(&sink),
            vec![
                "❌ Failed to monitor album: Moon Safari by Air",
                "✔️ Already monitored: Talkie Walkie by Air",
            ]
        );
    }

    #[tokio::test]
    async fn test_created_artist_found_by_foreign_id() {
        let catalog = MockCatalog::new();
        // Lookup for the CSV spelling returns a differently named artist.
        let mut descriptor = fixtures::artist_descriptor("The Beatles");
        descriptor.foreign_artist_id = "mbid-beatles".to_string();
        catalog.add_lookup_result("Beatles", descriptor).await;
        catalog
            .set_albums_on_create("mbid-beatles", vec![fixtures::album(9, "Abbey Road", false)])
            .await;
        let (mut reconciler, sink) = reconciler(&catalog, RunMode::SpecificAlbums, false);

        let summary = reconciler.run(&entries(&[("Beatles", "Abbey Road")])).await;

        assert_eq!(summary.errors, 0);
        assert_eq!(
            body(&sink),
            vec![
                "✅ Added artist: Beatles",
                "✅ Monitoring album: Abbey Road by Beatles",
            ]
        );
    }

    #[tokio::test]
    async fn test_artist_creation_is_info_in_album_mode() {
        let catalog = MockCatalog::new();
        catalog
            .add_lookup_result("Justice", fixtures::artist_descriptor("Justice"))
            .await;
        let (mut reconciler, _) = reconciler(&catalog, RunMode::SpecificAlbums, false);

        reconciler.run(&entries(&[("Justice", "Cross")])).await;

        // Banner, "Added artist", summary; the missing album is the only error.
        let tally = reconciler.reporter().tally();
        assert_eq!(tally.infos, 3);
        assert_eq!(tally.errors, 1);
        assert_eq!(tally.successes, 0);
    }

    #[tokio::test]
    async fn test_artists_mode_processes_each_artist_once() {
        let catalog = MockCatalog::new();
        catalog
            .add_lookup_result("Air", fixtures::artist_descriptor("Air"))
            .await;
        let (mut reconciler, sink) = reconciler(&catalog, RunMode::ArtistsOnly, false);

        let summary = reconciler
            .run(&entries(&[
                ("Air", "Moon Safari"),
                ("AIR", "Talkie Walkie"),
                ("Air", "10 000 Hz Legend"),
            ]))
            .await;

        assert_eq!(summary.units, 1);
        assert_eq!(body(&sink), vec!["✅ Added artist: Air"]);
        assert_eq!(
            catalog
                .count_calls(|c| matches!(c, RecordedCatalogCall::LookupArtist { .. }))
                .await,
            1
        );
    }

    #[tokio::test]
    async fn test_artists_mode_create_failure() {
        let catalog = MockCatalog::new();
        catalog
            .add_lookup_result("Air", fixtures::artist_descriptor("Air"))
            .await;
        catalog.fail(CatalogOperation::AddArtist).await;
        let (mut reconciler, sink) = reconciler(&catalog, RunMode::ArtistsOnly, false);

        let summary = reconciler.run(&entries(&[("Air", "Moon Safari")])).await;

        assert!(summary.has_errors());
        assert_eq!(body(&sink), vec!["❌ Failed to add artist: Air"]);
    }

    #[tokio::test]
    async fn test_artist_list_failure_treated_as_empty_library() {
        let catalog = MockCatalog::new();
        catalog.add_library_artist("Air", Vec::new()).await;
        catalog.fail(CatalogOperation::ListArtists).await;
        let (mut reconciler, sink) = reconciler(&catalog, RunMode::ArtistsOnly, false);

        reconciler.run(&entries(&[("Air", "Moon Safari")])).await;

        // Nothing to look up, so the artist is reported as not found.
        assert_eq!(body(&sink), vec!["❌ Artist not found: Air"]);
    }

    #[tokio::test]
    async fn test_fuzzy_flag_is_honoured() {
        let catalog = MockCatalog::new();
        catalog
            .add_library_artist("Air", vec![AlbumRecord::new(1, "Moon Safari", false)])
            .await;

        let (mut exact, exact_sink) = reconciler(&catalog, RunMode::SpecificAlbums, false);
        exact
            .run(&entries(&[("Air", "Moon Safari (Deluxe)")]))
            .await;
        assert_eq!(exact_sink.lines()[1], "⚠️ Album not found: Moon Safari (Deluxe) by Air");

        let (mut fuzzy, fuzzy_sink) = reconciler(&catalog, RunMode::SpecificAlbums, true);
        fuzzy
            .run(&entries(&[("Air", "Moon Safari (Deluxe)")]))
            .await;
        assert_eq!(fuzzy_sink.lines()[1], "✅ Monitoring album: Moon Safari by Air");
        assert_eq!(fuzzy.reporter().tally().errors, 0);
    }
}
