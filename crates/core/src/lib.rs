pub mod catalog;
pub mod config;
pub mod entries;
pub mod matching;
pub mod reconcile;
pub mod report;
pub mod testing;

pub use catalog::{
    AlbumRecord, ArtistDescriptor, ArtistRecord, CatalogError, LidarrClient, MonitorNewAlbums,
    MusicCatalog,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, LidarrConfig,
    OutputConfig, PacingConfig, RunConfig, RunMode, SanitizedConfig,
};
pub use entries::{load_entries, parse_entries, Entry, EntryError, EntrySet};
pub use matching::{find_album, find_title_match, normalize, similarity_ratio, MatchPolicy};
pub use reconcile::{ReconcileError, Reconciler, RunSummary};
pub use report::{
    ConsoleSink, LogFileSink, MemorySink, Outcome, OutcomeKind, OutcomeTally, OutputSink,
    Reporter, Verbosity,
};
