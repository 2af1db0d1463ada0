//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use albumsync_core::{Config, RunMode, Verbosity};

/// Sync the artists and albums of a playlist CSV export into Lidarr.
#[derive(Debug, Parser)]
#[command(name = "albumsync", version)]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = "ALBUMSYNC_CONFIG", default_value = "albumsync.toml")]
    pub config: PathBuf,

    /// CSV export with "Artist Name(s)" and "Album Name" columns
    #[arg(long, env = "ALBUMSYNC_CSV")]
    pub csv: PathBuf,

    /// What to reconcile (overrides run.mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Fuzzy album title matching (overrides run.fuzzy)
    #[arg(long)]
    pub fuzzy: bool,

    /// Console verbosity (overrides output.console)
    #[arg(long, value_enum)]
    pub console: Option<VerbosityArg>,

    /// Log file verbosity (overrides output.log)
    #[arg(long, value_enum)]
    pub log: Option<VerbosityArg>,

    /// Log file path (overrides output.log_file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the run summary as JSON on stdout when done
    #[arg(long)]
    pub json_summary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Artists,
    ArtistsAllAlbums,
    Albums,
}

impl From<ModeArg> for RunMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Artists => RunMode::ArtistsOnly,
            ModeArg::ArtistsAllAlbums => RunMode::ArtistsWithAllAlbums,
            ModeArg::Albums => RunMode::SpecificAlbums,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VerbosityArg {
    All,
    Errors,
    Successes,
    Disabled,
}

impl From<VerbosityArg> for Verbosity {
    fn from(arg: VerbosityArg) -> Self {
        match arg {
            VerbosityArg::All => Verbosity::All,
            VerbosityArg::Errors => Verbosity::ErrorsOnly,
            VerbosityArg::Successes => Verbosity::SuccessesOnly,
            VerbosityArg::Disabled => Verbosity::Disabled,
        }
    }
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.run.mode = mode.into();
        }
        if self.fuzzy {
            config.run.fuzzy = true;
        }
        if let Some(console) = self.console {
            config.output.console = console.into();
        }
        if let Some(log) = self.log {
            config.output.log = log.into();
        }
        if let Some(path) = &self.log_file {
            config.output.log_file = path.clone();
        }
    }
}
